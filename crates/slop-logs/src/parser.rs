use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use slop_types::LogRecord;

// Whitespace classes are ASCII-only (`[\t\n\f\r ]`); Unicode spaces such as
// U+00A0 never separate fields or indent a continuation line.

/// Spring Boot header: `<time> <LEVEL> <pid> --- [<thread>] <source> : <message>`
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<time>[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}T[0-9]{1,2}:[0-9]{1,2}:[0-9]{1,2}[,.][0-9]{3}(?:Z|[+-][0-9]{2}:[0-9]{2})?)",
        r"[\t\n\f\r ]+(?P<level>[A-Z]+)",
        r"[\t\n\f\r ]+(?P<pid>[0-9]+)",
        r"[\t\n\f\r ]+---[\t\n\f\r ]+\[(?P<thread>.*?)\]",
        r"[\t\n\f\r ]+(?P<source>.*?)[\t\n\f\r ]*:[\t\n\f\r ]*(?P<message>.*)",
    ))
    .expect("header pattern is valid")
});

/// Stack frame (`\tat com.Foo.bar(...)`) or exception cause line
static STACK_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\t\n\f\r ]+at[\t\n\f\r ]+.*|^[\t\n\f\r ]*Caused by:.*")
        .expect("stack pattern is valid")
});

/// Which non-header lines may extend an in-progress record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContinuationPolicy {
    /// Indented lines are only folded into ERROR/WARN records; stack frames
    /// and `Caused by:` lines are folded into any record.
    #[default]
    Strict,
    /// Any indented line, stack frame or `Caused by:` line is folded into
    /// the current record regardless of its level.
    Lenient,
}

/// Outcome of classifying a single input line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    /// The line is a header. `completes_previous` is set when a record was
    /// already in progress and must be flushed before this one replaces it.
    NewRecord {
        record: LogRecord,
        completes_previous: bool,
    },

    /// The line extends the in-progress record
    Continuation,

    /// The line is dropped
    Ignored,
}

/// Line classifier for Spring Boot style logs
pub struct LineParser;

impl LineParser {
    /// Classify `line` against the record currently being accumulated.
    ///
    /// Pure: neither argument is modified, so the same inputs always give the
    /// same outcome.
    pub fn classify(
        line: &str,
        current: Option<&LogRecord>,
        policy: ContinuationPolicy,
    ) -> Classification {
        if let Some(record) = Self::parse_header(line) {
            return Classification::NewRecord {
                record,
                completes_previous: current.is_some_and(|c| c.parse_state.in_progress()),
            };
        }

        match current {
            Some(record) if record.parse_state.in_progress() => {
                if Self::accepts_continuation(line, record, policy) {
                    Classification::Continuation
                } else {
                    Classification::Ignored
                }
            }
            _ => Classification::Ignored,
        }
    }

    /// Parse a header line into a freshly started record
    pub fn parse_header(line: &str) -> Option<LogRecord> {
        let caps = HEADER.captures(line)?;

        Some(LogRecord::new(
            collapse_whitespace(&caps["time"]),
            collapse_whitespace(&caps["level"]),
            collapse_whitespace(&caps["pid"]),
            collapse_whitespace(&caps["thread"]),
            collapse_whitespace(&caps["source"]),
            caps["message"].trim().to_string(),
            line.to_string(),
        ))
    }

    /// Whether the line is a stack frame or a `Caused by:` line
    pub fn is_stack_line(line: &str) -> bool {
        STACK_LINE.is_match(line)
    }

    fn accepts_continuation(line: &str, record: &LogRecord, policy: ContinuationPolicy) -> bool {
        let stack_line = Self::is_stack_line(line);
        let shaped = stack_line || line.starts_with('\t') || line.starts_with(' ');

        match policy {
            ContinuationPolicy::Strict => (record.severity().is_verbose() || stack_line) && shaped,
            ContinuationPolicy::Lenient => shaped,
        }
    }
}

/// Trim and fold internal whitespace runs into single spaces
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
