//! Log reassembly for slop
//!
//! This crate turns a stream of physical lines into complete records and
//! hands them to a sink, along with the filter the sink applies.

mod error;
mod filter;
mod parser;
mod reassembler;
mod sink;
mod source;

pub use error::{ScanError, SinkError};
pub use filter::RecordFilter;
pub use parser::{Classification, ContinuationPolicy, LineParser};
pub use reassembler::{Reassembler, ScanStats, scan};
pub use sink::RecordSink;
pub use source::{LineReader, LineSource};

// Re-export types used in our public API
pub use slop_types::{LogRecord, ParseState, Severity};
