//! Record rendering for slop
//!
//! This crate provides the sink that filters completed records and prints
//! them as JSON or as colorized, human-readable blocks.

mod json;
mod pretty;
mod printer;
mod theme;
pub mod timing;

pub use json::write_json;
pub use pretty::write_pretty;
pub use printer::{OutputMode, RecordPrinter};
pub use theme::Theme;
pub use timing::{TimestampParseError, describe_delta, parse_timestamp};
