use slop_types::{LogRecord, ParseState};

use crate::error::ScanError;
use crate::parser::{Classification, ContinuationPolicy, LineParser};
use crate::sink::RecordSink;
use crate::source::LineSource;

/// Counters collected over one scan
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Lines read, including blank ones
    pub lines: usize,
    /// Non-blank lines that were neither headers nor continuations
    pub ignored: usize,
    /// Records flushed to the sink
    pub records: usize,
}

/// Line-by-line state machine folding physical lines into records.
///
/// Holds at most one record in progress. A record is handed back from
/// [`Reassembler::push`] when the next header arrives, or from
/// [`Reassembler::finish`] at end of input.
#[derive(Debug)]
pub struct Reassembler {
    current: Option<LogRecord>,
    policy: ContinuationPolicy,
    stats: ScanStats,
}

impl Reassembler {
    pub fn new(policy: ContinuationPolicy) -> Self {
        Self {
            current: None,
            policy,
            stats: ScanStats::default(),
        }
    }

    /// Feed one line. Returns the previous record if this line completed it.
    pub fn push(&mut self, line: &str) -> Option<LogRecord> {
        self.stats.lines += 1;
        if line.is_empty() {
            return None;
        }

        match LineParser::classify(line, self.current.as_ref(), self.policy) {
            Classification::NewRecord {
                record,
                completes_previous,
            } => {
                tracing::trace!(level = %record.level, completes_previous, "header");
                let previous = self.current.replace(record);
                if !completes_previous {
                    return None;
                }
                self.stats.records += 1;
                previous.map(LogRecord::complete)
            }
            Classification::Continuation => {
                tracing::trace!("continuation");
                if let Some(record) = self.current.as_mut() {
                    record.append_line(line);
                }
                None
            }
            Classification::Ignored => {
                tracing::trace!("ignored");
                self.stats.ignored += 1;
                None
            }
        }
    }

    /// End of input: flush the record in progress, if any
    pub fn finish(&mut self) -> Option<LogRecord> {
        let completed = self.current.take().map(LogRecord::complete);
        if completed.is_some() {
            self.stats.records += 1;
        }
        completed
    }

    /// State of the accumulator
    pub fn state(&self) -> ParseState {
        self.current
            .as_ref()
            .map(|r| r.parse_state)
            .unwrap_or(ParseState::Empty)
    }

    /// Record currently being accumulated
    pub fn current(&self) -> Option<&LogRecord> {
        self.current.as_ref()
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }
}

/// Drive `source` to exhaustion, handing each completed record to `sink`.
///
/// A read error aborts immediately and the record in progress is dropped.
pub fn scan<S, K>(
    source: &mut S,
    reassembler: &mut Reassembler,
    sink: &mut K,
) -> Result<ScanStats, ScanError>
where
    S: LineSource + ?Sized,
    K: RecordSink + ?Sized,
{
    let mut previous_timestamp: Option<String> = None;

    while let Some(line) = source.next_line().map_err(ScanError::Read)? {
        if let Some(record) = reassembler.push(&line) {
            hand_off(sink, record, &mut previous_timestamp)?;
        }
    }

    if let Some(record) = reassembler.finish() {
        hand_off(sink, record, &mut previous_timestamp)?;
    }

    let stats = reassembler.stats();
    tracing::debug!(
        lines = stats.lines,
        records = stats.records,
        ignored = stats.ignored,
        "scan complete"
    );
    Ok(stats)
}

fn hand_off<K: RecordSink + ?Sized>(
    sink: &mut K,
    record: LogRecord,
    previous_timestamp: &mut Option<String>,
) -> Result<(), ScanError> {
    let timestamp = record.timestamp.clone();
    sink.emit(record, previous_timestamp.as_deref())?;
    *previous_timestamp = Some(timestamp);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::error::SinkError;
    use crate::source::LineReader;

    const INFO_A: &str = "2024-01-01T10:00:00.000Z INFO 123 --- [main] com.app.Foo : started";
    const INFO_B: &str = "2024-01-01T10:00:05.000Z INFO 123 --- [main] com.app.Foo : ready";
    const ERROR_A: &str = "2024-01-01T10:00:01.000Z ERROR 123 --- [main] com.app.Foo : failed";

    fn run(lines: &[&str], policy: ContinuationPolicy) -> Vec<LogRecord> {
        let input = lines.join("\n");
        let mut source = LineReader::new(input.as_bytes());
        let mut reassembler = Reassembler::new(policy);
        let mut records = Vec::new();
        scan(&mut source, &mut reassembler, &mut records).unwrap();
        records
    }

    /// Records each hand-off together with the timestamp it was paired with
    #[derive(Default)]
    struct Recorder {
        seen: Vec<(String, Option<String>)>,
    }

    impl RecordSink for Recorder {
        fn emit(
            &mut self,
            record: LogRecord,
            previous_timestamp: Option<&str>,
        ) -> Result<(), SinkError> {
            self.seen
                .push((record.timestamp, previous_timestamp.map(str::to_string)));
            Ok(())
        }
    }

    /// Yields its lines, then fails
    struct FailingSource {
        lines: Vec<String>,
    }

    impl LineSource for FailingSource {
        fn next_line(&mut self) -> io::Result<Option<String>> {
            if self.lines.is_empty() {
                Err(io::Error::other("broken pipe"))
            } else {
                Ok(Some(self.lines.remove(0)))
            }
        }
    }

    #[test]
    fn test_single_header_line() {
        let records = run(&[INFO_A], ContinuationPolicy::Strict);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, "INFO");
        assert_eq!(records[0].message, "started");
        assert_eq!(records[0].parse_state, ParseState::Complete);
    }

    #[test]
    fn test_error_record_collects_tab_lines() {
        let records = run(
            &[ERROR_A, "\tjava.lang.IllegalStateException: bad", "\tmore detail", INFO_B],
            ContinuationPolicy::Strict,
        );
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].message,
            "failed\n\tjava.lang.IllegalStateException: bad\n\tmore detail"
        );
        assert_eq!(records[0].line_count(), 3);
        assert_eq!(records[1].message, "ready");
    }

    #[test]
    fn test_info_record_drops_tab_line() {
        let records = run(&[INFO_A, "\tnot a frame"], ContinuationPolicy::Strict);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "started");
        assert_eq!(records[0].raw, INFO_A);
    }

    #[test]
    fn test_lenient_policy_keeps_tab_line() {
        let records = run(&[INFO_A, "\tnot a frame"], ContinuationPolicy::Lenient);
        assert_eq!(records[0].message, "started\n\tnot a frame");
    }

    #[test]
    fn test_empty_input_emits_nothing() {
        assert!(run(&[], ContinuationPolicy::Strict).is_empty());
        assert!(run(&["", "", "garbage"], ContinuationPolicy::Strict).is_empty());
    }

    #[test]
    fn test_blank_lines_do_not_break_records() {
        let records = run(
            &[ERROR_A, "", "\tat a.B.c(B.java:1)", "", INFO_B],
            ContinuationPolicy::Strict,
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "failed\n\tat a.B.c(B.java:1)");
    }

    #[test]
    fn test_leading_noise_is_ignored() {
        let mut reassembler = Reassembler::new(ContinuationPolicy::Strict);
        assert!(reassembler.push("  .   ____          _").is_none());
        assert!(reassembler.push("\tat orphan.Frame").is_none());
        assert_eq!(reassembler.state(), ParseState::Empty);
        assert_eq!(reassembler.stats().ignored, 2);
    }

    #[test]
    fn test_every_header_starts_exactly_one_record() {
        let lines = [
            "banner",
            INFO_A,
            "\tignored",
            ERROR_A,
            "\tat a.B.c(B.java:1)",
            "Caused by: java.io.IOException",
            "plain",
            INFO_B,
            INFO_A,
        ];
        let records = run(&lines, ContinuationPolicy::Strict);
        let firsts: Vec<&str> = records
            .iter()
            .map(|r| r.raw.lines().next().unwrap())
            .collect();
        let headers: Vec<&str> = lines
            .iter()
            .copied()
            .filter(|l| LineParser::parse_header(l).is_some())
            .collect();
        assert_eq!(firsts, headers);
    }

    #[test]
    fn test_push_and_finish_transitions() {
        let mut reassembler = Reassembler::new(ContinuationPolicy::Strict);
        assert_eq!(reassembler.state(), ParseState::Empty);
        assert!(reassembler.finish().is_none());

        assert!(reassembler.push(ERROR_A).is_none());
        assert_eq!(reassembler.state(), ParseState::Started);

        let before = reassembler.current().unwrap().message.len();
        assert!(reassembler.push(" caused by something").is_none());
        assert_eq!(reassembler.state(), ParseState::Continued);
        assert!(reassembler.current().unwrap().message.len() >= before);

        let flushed = reassembler.push(INFO_A).unwrap();
        assert_eq!(flushed.level, "ERROR");
        assert_eq!(flushed.parse_state, ParseState::Complete);
        assert_eq!(reassembler.state(), ParseState::Started);

        let last = reassembler.finish().unwrap();
        assert_eq!(last.level, "INFO");
        assert_eq!(reassembler.state(), ParseState::Empty);
        assert_eq!(reassembler.stats().records, 2);
    }

    #[test]
    fn test_header_flushes_only_when_a_record_was_in_progress() {
        let mut reassembler = Reassembler::new(ContinuationPolicy::Strict);
        assert!(reassembler.push(INFO_A).is_none());
        assert_eq!(reassembler.stats().records, 0);

        let flushed = reassembler.push(INFO_B).unwrap();
        assert_eq!(flushed.message, "started");
        assert_eq!(reassembler.stats().records, 1);
        assert_eq!(reassembler.current().unwrap().message, "ready");
    }

    #[test]
    fn test_previous_timestamp_is_passed_along() {
        let input = [INFO_A, ERROR_A, INFO_B].join("\n");
        let mut source = LineReader::new(input.as_bytes());
        let mut reassembler = Reassembler::new(ContinuationPolicy::Strict);
        let mut recorder = Recorder::default();
        scan(&mut source, &mut reassembler, &mut recorder).unwrap();

        assert_eq!(
            recorder.seen,
            vec![
                ("2024-01-01T10:00:00.000Z".to_string(), None),
                (
                    "2024-01-01T10:00:01.000Z".to_string(),
                    Some("2024-01-01T10:00:00.000Z".to_string())
                ),
                (
                    "2024-01-01T10:00:05.000Z".to_string(),
                    Some("2024-01-01T10:00:01.000Z".to_string())
                ),
            ]
        );
    }

    #[test]
    fn test_read_error_aborts_without_flushing() {
        let mut source = FailingSource {
            lines: vec![INFO_A.to_string(), ERROR_A.to_string()],
        };
        let mut reassembler = Reassembler::new(ContinuationPolicy::Strict);
        let mut records = Vec::new();

        let err = scan(&mut source, &mut reassembler, &mut records).unwrap_err();
        assert!(matches!(err, ScanError::Read(_)));
        // INFO_A was completed by ERROR_A; ERROR_A was still in progress
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, "INFO");
    }
}
