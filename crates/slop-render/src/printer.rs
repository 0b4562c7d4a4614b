use std::io::Write;

use slop_logs::{RecordFilter, RecordSink, SinkError};
use slop_types::LogRecord;

use crate::json::write_json;
use crate::pretty::write_pretty;

/// Output format for shown records
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Tab-indented JSON objects
    #[default]
    Json,
    /// Labelled, colorized blocks
    Pretty,
}

/// Sink that filters records and writes the survivors to `out`
pub struct RecordPrinter<W> {
    out: W,
    filter: RecordFilter,
    mode: OutputMode,
    color: bool,
    shown: usize,
}

impl<W: Write> RecordPrinter<W> {
    pub fn new(out: W, filter: RecordFilter, mode: OutputMode) -> Self {
        Self {
            out,
            filter,
            mode,
            color: true,
            shown: 0,
        }
    }

    /// Enable or disable ANSI colors in pretty mode
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Number of records that passed the filter
    pub fn shown(&self) -> usize {
        self.shown
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordSink for RecordPrinter<W> {
    fn emit(
        &mut self,
        record: LogRecord,
        previous_timestamp: Option<&str>,
    ) -> Result<(), SinkError> {
        if !self.filter.matches(&record) {
            tracing::trace!(level = %record.level, "record filtered out");
            return Ok(());
        }

        match self.mode {
            OutputMode::Json => write_json(&mut self.out, &record)?,
            OutputMode::Pretty => {
                write_pretty(&mut self.out, &record, previous_timestamp, self.color)?
            }
        }
        self.out.flush()?;
        self.shown += 1;
        Ok(())
    }
}
