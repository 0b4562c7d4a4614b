use std::io::{self, Write};

use crossterm::style::Stylize;

use slop_types::LogRecord;

use crate::theme::Theme;
use crate::timing::describe_delta;

/// Write a record as a labelled block followed by a blank line
pub fn write_pretty<W: Write>(
    out: &mut W,
    record: &LogRecord,
    previous_timestamp: Option<&str>,
    color: bool,
) -> io::Result<()> {
    let level_line = format!("LEVEL:   {}", record.level);
    match Theme::level_color(record.severity()).filter(|_| color) {
        Some(fg) => writeln!(out, "{}", level_line.with(fg))?,
        None => writeln!(out, "{}", level_line)?,
    }

    let diff = describe_delta(previous_timestamp, &record.timestamp);

    writeln!(out, "TIME:    {}", record.timestamp)?;
    writeln!(out, "DIFF:    {}", diff)?;
    writeln!(out, "THREAD:  {}", record.thread)?;
    writeln!(out, "CLASS:   {}", record.source)?;
    writeln!(out, "MESSAGE: {}", record.message)?;
    writeln!(out)?;
    Ok(())
}
