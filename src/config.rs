//! Configuration for slop
//!
//! Settings come from an optional TOML file (`~/.slop/config.toml` by
//! default) with command-line flags layered on top.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use slop_logs::{ContinuationPolicy, RecordFilter};
use slop_render::OutputMode;

/// Application directory under the user's home
const APP_DIR_NAME: &str = ".slop";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Contents of the config file. Every key is optional.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Level token to keep
    pub level: Option<String>,
    /// Substring to search for in raw record text
    pub grep: Option<String>,
    /// Pretty output instead of JSON
    pub pretty: bool,
    /// ANSI colors in pretty output
    pub color: bool,
    pub continuation: ContinuationPolicy,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            level: None,
            grep: None,
            pretty: false,
            color: true,
            continuation: ContinuationPolicy::Strict,
        }
    }
}

impl FileConfig {
    /// Load the config file.
    ///
    /// An explicit `path` must exist. Without one the default location is
    /// tried and a missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            Some(path) => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Values given on the command line; unset flags defer to the file
#[derive(Clone, Debug, Default)]
pub struct CliOverrides {
    pub level: Option<String>,
    pub grep: Option<String>,
    pub pretty: bool,
    pub no_color: bool,
    pub lenient: bool,
}

/// Effective settings for one run
#[derive(Clone, Debug)]
pub struct Settings {
    pub filter: RecordFilter,
    pub mode: OutputMode,
    pub color: bool,
    pub policy: ContinuationPolicy,
}

impl Settings {
    /// Merge file values with command-line overrides.
    ///
    /// Colors are only enabled when `is_terminal` says stdout is a terminal.
    pub fn resolve(file: FileConfig, cli: CliOverrides, is_terminal: bool) -> Self {
        let level = cli.level.or(file.level).unwrap_or_default();
        let grep = cli.grep.or(file.grep).unwrap_or_default();

        let mode = if cli.pretty || file.pretty {
            OutputMode::Pretty
        } else {
            OutputMode::Json
        };

        let policy = if cli.lenient {
            ContinuationPolicy::Lenient
        } else {
            file.continuation
        };

        Self {
            filter: RecordFilter::new().with_level(level).with_content(grep),
            mode,
            color: file.color && !cli.no_color && is_terminal,
            policy,
        }
    }
}

/// `~/.slop`
pub fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_DIR_NAME))
}

fn default_config_path() -> Option<PathBuf> {
    app_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Create the application directory if it does not exist yet
pub fn setup_app_dir() -> Result<PathBuf> {
    let dir = app_dir().context("could not determine home directory")?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    Ok(dir)
}
