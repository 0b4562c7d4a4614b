//! Shared types for slop
//!
//! This crate contains the record model passed between the reassembler and
//! the renderers.

use serde::Serialize;

// ============================================================================
// Parse State
// ============================================================================

/// Lifecycle of a record inside the reassembler
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParseState {
    /// No record in progress
    #[default]
    Empty,
    /// Header line seen
    Started,
    /// At least one continuation line appended
    Continued,
    /// Finalized and handed off
    Complete,
}

impl ParseState {
    /// Whether a record is currently being accumulated
    pub fn in_progress(&self) -> bool {
        matches!(self, Self::Started | Self::Continued)
    }
}

// ============================================================================
// Severity
// ============================================================================

/// Display classification of a free-form level token.
///
/// The record keeps the token verbatim; this only groups the tokens that get
/// special treatment (continuation policy, colors).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warn,
    Info,
    Other,
}

impl Severity {
    /// Classify a level token. Matching is exact and case-sensitive.
    pub fn from_token(token: &str) -> Self {
        match token {
            "ERROR" => Self::Error,
            "WARN" => Self::Warn,
            "INFO" => Self::Info,
            _ => Self::Other,
        }
    }

    /// ERROR and WARN records accept indented continuation lines
    pub fn is_verbose(&self) -> bool {
        matches!(self, Self::Error | Self::Warn)
    }
}

// ============================================================================
// Log Record
// ============================================================================

/// One logical log entry, possibly spanning several physical lines
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// Timestamp text exactly as it appeared in the header
    pub timestamp: String,

    /// Severity token, accepted verbatim
    pub level: String,

    /// Raw PID token
    pub process_id: String,

    /// Thread name from the header brackets
    pub thread: String,

    /// Logger / class name
    pub source: String,

    /// Message body, continuation lines appended with '\n'
    pub message: String,

    /// All original lines of this record joined with '\n'
    pub raw: String,

    pub parse_state: ParseState,
}

impl LogRecord {
    /// Create a freshly started record from its header fields
    pub fn new(
        timestamp: String,
        level: String,
        process_id: String,
        thread: String,
        source: String,
        message: String,
        raw: String,
    ) -> Self {
        Self {
            timestamp,
            level,
            process_id,
            thread,
            source,
            message,
            raw,
            parse_state: ParseState::Started,
        }
    }

    /// Append a continuation line to both the message and the raw text
    pub fn append_line(&mut self, line: &str) {
        self.raw.push('\n');
        self.raw.push_str(line);
        self.message.push('\n');
        self.message.push_str(line);
        self.parse_state = ParseState::Continued;
    }

    /// Mark the record as finalized
    pub fn complete(mut self) -> Self {
        self.parse_state = ParseState::Complete;
        self
    }

    pub fn severity(&self) -> Severity {
        Severity::from_token(&self.level)
    }

    /// Number of physical lines folded into this record
    pub fn line_count(&self) -> usize {
        self.raw.lines().count()
    }
}
