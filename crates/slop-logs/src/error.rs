use std::io;

use thiserror::Error;

/// Failure while handing a record to a sink
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write record: {0}")]
    Io(#[from] io::Error),

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failure that aborts a scan
#[derive(Debug, Error)]
pub enum ScanError {
    /// The input source failed. The in-progress record is discarded.
    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl ScanError {
    /// Whether the sink failed because its reader went away (e.g. `| head`)
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Self::Sink(SinkError::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe)
    }
}
