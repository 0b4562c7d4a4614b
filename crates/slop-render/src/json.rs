use std::io::Write;

use serde::Serialize;
use serde_json::Serializer;
use serde_json::ser::PrettyFormatter;

use slop_logs::SinkError;
use slop_types::LogRecord;

/// Write a record as a tab-indented JSON object followed by a newline.
///
/// The record is serialized in memory first, so write failures surface as
/// [`SinkError::Io`] and only encoding failures as [`SinkError::Serialize`].
pub fn write_json<W: Write>(out: &mut W, record: &LogRecord) -> Result<(), SinkError> {
    let mut buf = Vec::with_capacity(256);
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    record.serialize(&mut serializer)?;
    buf.push(b'\n');
    out.write_all(&buf)?;
    Ok(())
}
