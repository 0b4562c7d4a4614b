use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use slop_logs::{LineReader, LineSource, Reassembler, scan};
use slop_render::RecordPrinter;

mod config;

use config::{CliOverrides, FileConfig, Settings};

/// slop - reassemble multi-line Spring Boot logs from stdin
#[derive(Parser, Debug)]
#[command(name = "slop")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level you want to filter for (exact match, e.g. ERROR)
    #[arg(long, value_name = "LEVEL")]
    level: Option<String>,

    /// Search term you want to filter for
    #[arg(long, value_name = "TEXT")]
    grep: Option<String>,

    /// Human-readable output instead of JSON
    #[arg(long)]
    pretty: bool,

    /// Disable colors in pretty output
    #[arg(long)]
    no_color: bool,

    /// Fold indented lines into records of any level
    #[arg(long)]
    lenient: bool,

    /// Config file (default: ~/.slop/config.toml)
    #[arg(long, value_name = "PATH", env = "SLOP_CONFIG")]
    config: Option<PathBuf>,

    /// Increase diagnostic output on stderr (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            level: self.level.clone(),
            grep: self.grep.clone(),
            pretty: self.pretty,
            no_color: self.no_color,
            lenient: self.lenient,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Diagnostics go to stderr; stdout carries records
    let default_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_writer(io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    if let Err(e) = config::setup_app_dir() {
        tracing::warn!(error = %format!("{:#}", e), "could not set up application directory");
    }

    let file = FileConfig::load(args.config.as_deref())?;
    let stdout = io::stdout();
    let settings = Settings::resolve(file, args.overrides(), stdout.is_terminal());
    tracing::debug!(?settings, "resolved settings");

    let mut source = LineReader::new(io::stdin().lock());
    process(&mut source, stdout.lock(), settings)
}

/// Reassemble `source` and print the records that pass the filter to `out`.
///
/// A closed downstream pipe ends the run cleanly; any other failure is fatal.
fn process<S, W>(source: &mut S, out: W, settings: Settings) -> Result<()>
where
    S: LineSource + ?Sized,
    W: Write,
{
    let mut reassembler = Reassembler::new(settings.policy);
    let mut printer =
        RecordPrinter::new(out, settings.filter, settings.mode).with_color(settings.color);

    match scan(source, &mut reassembler, &mut printer) {
        Ok(stats) => {
            tracing::info!(
                lines = stats.lines,
                records = stats.records,
                shown = printer.shown(),
                "finished"
            );
            Ok(())
        }
        Err(e) if e.is_broken_pipe() => {
            tracing::debug!("output closed, stopping");
            Ok(())
        }
        Err(e) => Err(e).context("failed to process log stream"),
    }
}
