use slop_types::LogRecord;

use crate::error::SinkError;

/// Consumer of completed records
pub trait RecordSink {
    /// Take ownership of a finalized record.
    ///
    /// `previous_timestamp` is the raw timestamp of the record flushed just
    /// before this one, whether or not the sink displayed it.
    fn emit(
        &mut self,
        record: LogRecord,
        previous_timestamp: Option<&str>,
    ) -> Result<(), SinkError>;
}

/// Collects records in flush order
impl RecordSink for Vec<LogRecord> {
    fn emit(
        &mut self,
        record: LogRecord,
        _previous_timestamp: Option<&str>,
    ) -> Result<(), SinkError> {
        self.push(record);
        Ok(())
    }
}
