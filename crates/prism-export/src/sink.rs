//! Streaming export sinks.
//!
//! A sink exclusively owns its output stream for the duration of one job.
//! Records are serialized incrementally; nothing is buffered beyond the
//! current record. The JSON-array framing state (the "has anything been
//! written yet" flag) is job-scoped, so records from different batches are
//! still comma-separated correctly.

use std::io::Write;

use serde_json::Value;
use serde_jsonlines::JsonLinesWriter;

use crate::error::ExportError;
use crate::format::ExportFormat;

/// Default CSV columns for request exports.
pub const DEFAULT_REQUEST_FIELDS: &[&str] = &[
    "request_id",
    "created_at",
    "model",
    "provider",
    "status",
    "cost_usd",
    "latency_ms",
    "total_tokens",
    "user_id",
];

/// Default CSV columns for session exports.
pub const DEFAULT_SESSION_FIELDS: &[&str] = &[
    "session_id",
    "name",
    "created_at",
    "total_cost",
    "total_tokens",
    "total_requests",
];

/// Placeholder for fields missing from a record.
const MISSING_FIELD: &str = "N/A";

type BoxedWriter = Box<dyn Write + Send>;

enum SinkInner {
    Jsonl {
        writer: JsonLinesWriter<BoxedWriter>,
    },
    Json {
        writer: BoxedWriter,
        first_written: bool,
    },
    Csv {
        writer: csv::Writer<BoxedWriter>,
        fields: Vec<String>,
    },
}

/// Serializes records incrementally to one output stream.
pub struct ExportSink {
    inner: SinkInner,
    records_written: u64,
}

impl ExportSink {
    /// Open a sink over `writer`, emitting any format preamble (the `[` for
    /// JSON arrays, the header row for CSV).
    ///
    /// `fields` selects the CSV columns and is ignored by the JSON formats.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if the preamble cannot be written.
    pub fn open(
        format: ExportFormat,
        mut writer: BoxedWriter,
        fields: &[&str],
    ) -> Result<Self, ExportError> {
        let inner = match format {
            ExportFormat::Jsonl => SinkInner::Jsonl {
                writer: JsonLinesWriter::new(writer),
            },
            ExportFormat::Json => {
                writer.write_all(b"[")?;
                SinkInner::Json {
                    writer,
                    first_written: false,
                }
            }
            ExportFormat::Csv => {
                let mut csv_writer = csv::Writer::from_writer(writer);
                csv_writer.write_record(fields)?;
                SinkInner::Csv {
                    writer: csv_writer,
                    fields: fields.iter().map(ToString::to_string).collect(),
                }
            }
        };
        Ok(Self {
            inner,
            records_written: 0,
        })
    }

    /// Write one record.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] on serialization or stream failure; the job
    /// treats this as fatal.
    pub fn write_record(&mut self, record: &Value) -> Result<(), ExportError> {
        match &mut self.inner {
            SinkInner::Jsonl { writer } => writer.write(record)?,
            SinkInner::Json {
                writer,
                first_written,
            } => {
                if *first_written {
                    writer.write_all(b",\n")?;
                }
                serde_json::to_writer(&mut *writer, record)?;
                *first_written = true;
            }
            SinkInner::Csv { writer, fields } => {
                let row = fields.iter().map(|field| csv_cell(record, field));
                writer.write_record(row)?;
            }
        }
        self.records_written += 1;
        Ok(())
    }

    /// Records written so far.
    #[must_use]
    pub const fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Write format terminators and flush.
    ///
    /// Called on the success path only; on a fatal error the sink is simply
    /// dropped, closing the stream and leaving partial output in place.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if the terminator or flush fails.
    pub fn finish(self) -> Result<(), ExportError> {
        match self.inner {
            SinkInner::Jsonl { writer } => {
                writer.into_inner().flush()?;
            }
            SinkInner::Json { mut writer, .. } => {
                writer.write_all(b"]\n")?;
                writer.flush()?;
            }
            SinkInner::Csv { writer, .. } => {
                writer.into_inner().map_err(|e| e.into_error())?.flush()?;
            }
        }
        Ok(())
    }
}

/// Render one CSV cell: missing fields become `N/A`, scalars print bare,
/// and structured values fall back to compact JSON. Quoting is left to the
/// CSV writer, which quotes only when a field contains a comma, quote, or
/// newline.
fn csv_cell(record: &Value, field: &str) -> String {
    match record.get(field) {
        None | Some(Value::Null) => MISSING_FIELD.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => serde_json::to_string(other).unwrap_or_else(|_| MISSING_FIELD.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Read;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn sink_to(
        path: &std::path::Path,
        format: ExportFormat,
        fields: &[&str],
    ) -> ExportSink {
        let file = File::create(path).expect("create output file");
        ExportSink::open(format, Box::new(file), fields).expect("open sink")
    }

    fn read_back(path: &std::path::Path) -> String {
        let mut content = String::new();
        File::open(path)
            .expect("reopen output file")
            .read_to_string(&mut content)
            .expect("read output");
        content
    }

    #[test]
    fn jsonl_writes_one_compact_object_per_line() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("out.jsonl");
        let mut sink = sink_to(&path, ExportFormat::Jsonl, &[]);

        sink.write_record(&json!({"a": 1})).unwrap();
        sink.write_record(&json!({"b": "two"})).unwrap();
        sink.finish().unwrap();

        let contents = read_back(&path);
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"{"a":1}"#);
        assert_eq!(lines[1], r#"{"b":"two"}"#);
    }

    #[test]
    fn json_array_is_well_formed_across_writes() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("out.json");
        let mut sink = sink_to(&path, ExportFormat::Json, &[]);

        for i in 0..3 {
            sink.write_record(&json!({"i": i})).unwrap();
        }
        sink.finish().unwrap();

        let content = read_back(&path);
        let parsed: Vec<Value> = serde_json::from_str(&content).expect("valid array");
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[2], json!({"i": 2}));
    }

    #[test]
    fn empty_json_export_is_an_empty_array() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("out.json");
        let sink = sink_to(&path, ExportFormat::Json, &[]);
        sink.finish().unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&read_back(&path)).expect("valid array");
        assert!(parsed.is_empty());
    }

    #[test]
    fn csv_quotes_only_when_needed_and_doubles_internal_quotes() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("out.csv");
        let mut sink = sink_to(&path, ExportFormat::Csv, &["model", "note"]);

        sink.write_record(&json!({"model": "gpt-4o", "note": "plain"}))
            .unwrap();
        sink.write_record(&json!({"model": "a,b", "note": "says \"hi\""}))
            .unwrap();
        sink.write_record(&json!({"model": "line\nbreak", "note": "x"}))
            .unwrap();
        sink.finish().unwrap();

        let content = read_back(&path);
        let lines: Vec<&str> = content.split('\n').collect();
        assert_eq!(lines[0], "model,note");
        // Unremarkable values stay unquoted.
        assert_eq!(lines[1], "gpt-4o,plain");
        // Comma and quote trigger quoting; internal quotes double.
        assert_eq!(lines[2], "\"a,b\",\"says \"\"hi\"\"\"");
        // Newline-bearing field is quoted and spans two physical lines.
        assert_eq!(lines[3], "\"line");
        assert_eq!(lines[4], "break\",x");
    }

    #[test]
    fn csv_missing_fields_emit_placeholder() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("out.csv");
        let mut sink = sink_to(&path, ExportFormat::Csv, &["model", "status"]);

        sink.write_record(&json!({"model": "gpt-4o"})).unwrap();
        sink.finish().unwrap();

        let content = read_back(&path);
        assert!(content.contains("gpt-4o,N/A"));
    }
}
