use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, Serializer};
use serde_json::Value;

use crate::errors::{FilterError, Result};
use crate::filter::Document;
use crate::report::FilterReport;

/// Byte layout of the rewritten data file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputLayout {
    /// One line, `", "` and `": "` separators (Python `json.dump` default)
    #[default]
    Python,
    /// One line, no whitespace
    Compact,
    /// Indented, one field per line
    Pretty,
}

// Compact output with a space after every ',' and ':'
#[derive(Debug, Default)]
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

// Integer `-0` reads back as `0`, as Python's json module does
fn zero_negative_zero(value: &mut Value) {
    match value {
        Value::Number(n) if n.to_string() == "-0" => *value = Value::from(0),
        Value::Array(items) => items.iter_mut().for_each(zero_negative_zero),
        Value::Object(fields) => fields.values_mut().for_each(zero_negative_zero),
        _ => {}
    }
}

/// Load the JSON document at `path`.
///
/// Number text is kept as written, so integers wider than 64 bits
/// survive a rewrite unchanged.
pub fn read_document(path: &Path) -> Result<Value> {
    let file = File::open(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            FilterError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            FilterError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let mut document: Value = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        if source.is_io() {
            FilterError::Read {
                path: path.to_path_buf(),
                source: source.into(),
            }
        } else {
            FilterError::InvalidJson {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    zero_negative_zero(&mut document);
    Ok(document)
}

fn serialize_into<W, T>(writer: W, value: &T, layout: OutputLayout) -> serde_json::Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    match layout {
        OutputLayout::Python => value.serialize(&mut Serializer::with_formatter(writer, SpacedFormatter)),
        OutputLayout::Compact => {
            value.serialize(&mut Serializer::with_formatter(writer, CompactFormatter))
        }
        OutputLayout::Pretty => serde_json::to_writer_pretty(writer, value),
    }
}

/// Render `doc` in the given layout without touching the filesystem.
pub fn to_string(doc: &Document, layout: OutputLayout) -> Result<String> {
    let mut buf = Vec::new();
    serialize_into(&mut buf, doc, layout)
        .map_err(|e| FilterError::InvalidDocument(format!("cannot serialize: {e}")))?;
    // serde_json only emits valid UTF-8
    String::from_utf8(buf).map_err(|e| FilterError::InvalidDocument(e.to_string()))
}

fn write_json<T: ?Sized + Serialize>(path: &Path, value: &T, layout: OutputLayout) -> Result<()> {
    let failure = |source: io::Error| FilterError::WriteFailure {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(failure)?;
    let mut writer = BufWriter::new(file);
    serialize_into(&mut writer, value, layout).map_err(|e| failure(e.into()))?;
    writer.flush().map_err(failure)
}

/// Truncate `path` and write `doc` to it.
pub fn write_document(path: &Path, doc: &Document, layout: OutputLayout) -> Result<()> {
    write_json(path, doc, layout)
}

pub fn write_report(path: &Path, report: &FilterReport) -> Result<()> {
    write_json(path, report, OutputLayout::Pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn sample() -> Document {
        match json!({"nominativ": [{"question": "Wer ist größer?", "id": "N_0"}], "n": [1, 2]}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn python_layout_spaces_separators() {
        let out = to_string(&sample(), OutputLayout::Python).unwrap();
        assert_eq!(
            out,
            r#"{"nominativ": [{"question": "Wer ist größer?", "id": "N_0"}], "n": [1, 2]}"#
        );
    }

    #[test]
    fn compact_layout_has_no_whitespace() {
        let out = to_string(&sample(), OutputLayout::Compact).unwrap();
        assert_eq!(
            out,
            r#"{"nominativ":[{"question":"Wer ist größer?","id":"N_0"}],"n":[1,2]}"#
        );
    }

    #[test]
    fn pretty_layout_is_multiline() {
        let out = to_string(&sample(), OutputLayout::Pretty).unwrap();
        assert!(out.contains("\n  \"nominativ\": ["));
        assert!(out.contains("größer"));
    }

    #[test]
    fn empty_containers_in_python_layout() {
        let doc = match json!({"a": [], "b": {}}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        assert_eq!(to_string(&doc, OutputLayout::Python).unwrap(), r#"{"a": [], "b": {}}"#);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = read_document(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, FilterError::FileNotFound { .. }));
    }

    #[test]
    fn garbage_is_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{\"nominativ\": [").unwrap();
        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, FilterError::InvalidJson { .. }));
    }

    #[test]
    fn write_then_read_keeps_umlauts_literal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        write_document(&path, &sample(), OutputLayout::Python).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("größer"));
        assert!(!raw.contains("\\u"));
        assert_eq!(read_document(&path).unwrap(), Value::Object(sample()));
    }

    #[test]
    fn wide_integers_keep_their_digits() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, r#"{"big": 123456789012345678901234567890, "neg": -0, "f": -0.0}"#)
            .unwrap();

        let doc = match read_document(&path).unwrap() {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        assert_eq!(
            to_string(&doc, OutputLayout::Python).unwrap(),
            r#"{"big": 123456789012345678901234567890, "neg": 0, "f": -0.0}"#
        );
    }

    #[test]
    fn report_lists_dropped_questions_per_group() {
        use crate::cases::Case;
        use crate::report::{DroppedQuestion, GroupReport};

        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = FilterReport {
            groups: vec![
                GroupReport {
                    case: Case::Nominativ,
                    input: 3,
                    kept: 1,
                    dropped: 2,
                    dropped_questions: vec![DroppedQuestion {
                        question: "der Mann".into(),
                        occurrences: 2,
                    }],
                },
                GroupReport {
                    case: Case::Dativ,
                    input: 1,
                    kept: 1,
                    dropped: 0,
                    dropped_questions: Vec::new(),
                },
            ],
        };
        write_report(&path, &report).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains('\n'));
        let back: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(back["groups"][0]["case"], "nominativ");
        assert_eq!(
            back["groups"][0]["dropped_questions"],
            json!([{"question": "der Mann", "occurrences": 2}])
        );
        assert_eq!(back["groups"][1]["case"], "dativ");
        assert_eq!(back["groups"][1]["dropped_questions"], json!([]));
    }

    #[test]
    fn unwritable_target_is_write_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing_dir").join("data.json");
        let err = write_document(&path, &sample(), OutputLayout::Compact).unwrap_err();
        assert!(matches!(err, FilterError::WriteFailure { .. }));
    }
}
