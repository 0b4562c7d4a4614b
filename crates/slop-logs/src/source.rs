use std::io::{self, BufRead};

/// Pull-based source of input lines
pub trait LineSource {
    /// Next line without its terminator, or `None` at end of input.
    /// A blank line is `Some("")`.
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

/// Line source over any buffered reader (stdin, files, byte slices)
pub struct LineReader<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(256),
        }
    }
}

impl<R: BufRead> LineSource for LineReader<R> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        // Invalid UTF-8 is replaced rather than aborting the stream
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &[u8]) -> Vec<String> {
        let mut reader = LineReader::new(input);
        let mut lines = Vec::new();
        while let Some(line) = reader.next_line().unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn test_strips_terminators() {
        assert_eq!(collect(b"a\nb\r\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_blank_line_is_distinct_from_end() {
        assert_eq!(collect(b"a\n\nb\n"), vec!["a", "", "b"]);
        assert!(collect(b"").is_empty());
    }

    #[test]
    fn test_keeps_leading_whitespace() {
        assert_eq!(collect(b"\tat x\n  y\n"), vec!["\tat x", "  y"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let lines = collect(b"caf\xff\n");
        assert_eq!(lines, vec!["caf\u{FFFD}"]);
    }
}
