//! Timestamp parsing and the inter-record delta shown in pretty output.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid timestamp {timestamp:?}: {source}")]
pub struct TimestampParseError {
    pub timestamp: String,
    #[source]
    pub source: chrono::ParseError,
}

/// Parse a raw header timestamp.
///
/// Accepts `,` as the fractional separator. Timestamps without a zone are
/// read as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, TimestampParseError> {
    let normalized = raw.replacen(',', ".", 1);

    DateTime::parse_from_rfc3339(&normalized).or_else(|source| {
        NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| {
                tracing::debug!(timestamp = raw, "timestamp has no zone, reading it as UTC");
                naive.and_utc().fixed_offset()
            })
            .map_err(|_| TimestampParseError {
                timestamp: raw.to_string(),
                source,
            })
    })
}

/// Render a delta as whole minutes and remaining seconds
pub fn format_delta(delta: TimeDelta) -> String {
    format!(
        "{} minutes and {} seconds",
        delta.num_minutes(),
        delta.num_seconds() % 60
    )
}

/// Delta text between the previous record and this one.
///
/// Empty for the first record. Falls back to a zero delta, with a warning,
/// when either timestamp cannot be parsed.
pub fn describe_delta(previous: Option<&str>, current: &str) -> String {
    let Some(previous) = previous else {
        return String::new();
    };

    match (parse_timestamp(previous), parse_timestamp(current)) {
        (Ok(prev), Ok(cur)) => format_delta(cur.signed_duration_since(prev)),
        (prev, cur) => {
            for err in [prev.err(), cur.err()].into_iter().flatten() {
                tracing::warn!(
                    timestamp = %err.timestamp,
                    error = %err,
                    "failed to parse timestamp"
                );
            }
            format_delta(TimeDelta::zero())
        }
    }
}
