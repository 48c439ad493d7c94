//! Input file decoding.
//!
//! The CLI accepts three layouts:
//! - a single diagram export (a shape object without `model_id`),
//! - a JSON array of model records,
//! - model records as JSON Lines, one object per line.

use std::path::Path;

use log::debug;
use serde_json::Value;

use bpmetrics::{BpmetricsError, ModelRecord};

/// Decoded contents of an input file.
#[derive(Debug)]
pub enum Input {
    /// One diagram export, identified by the file stem.
    Export { model_id: String, text: String },
    /// A batch of model records.
    Records(Vec<ModelRecord>),
}

/// Decode `source`, read from `path`.
///
/// # Errors
///
/// Returns `BpmetricsError::Input` when the text matches none of the
/// accepted layouts, naming the offending line for JSON Lines input.
pub fn decode(path: &Path, source: String) -> Result<Input, BpmetricsError> {
    let trimmed = source.trim_start();

    if trimmed.starts_with('[') {
        let records: Vec<ModelRecord> = serde_json::from_str(trimmed)
            .map_err(|e| BpmetricsError::Input(format!("invalid record array: {e}")))?;
        debug!(records = records.len(); "Decoded record array");
        return Ok(Input::Records(records));
    }

    // A whole-file object is either one export or a single record.
    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(trimmed) {
        if value.get("model_id").is_some() {
            let record: ModelRecord = serde_json::from_value(value)
                .map_err(|e| BpmetricsError::Input(format!("invalid record: {e}")))?;
            return Ok(Input::Records(vec![record]));
        }

        let model_id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string());
        debug!(model_id = model_id.as_str(); "Decoded single export");
        return Ok(Input::Export {
            model_id,
            text: source,
        });
    }

    let records = decode_lines(&source)?;
    debug!(records = records.len(); "Decoded JSON Lines records");
    Ok(Input::Records(records))
}

fn decode_lines(source: &str) -> Result<Vec<ModelRecord>, BpmetricsError> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line)
                .map_err(|e| BpmetricsError::Input(format!("line {}: {e}", index + 1)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_str(path: &str, source: &str) -> Result<Input, BpmetricsError> {
        decode(Path::new(path), source.to_string())
    }

    #[test]
    fn test_single_export_uses_file_stem() {
        let input = decode_str("models/order.json", r#"{"resourceId": "canvas"}"#).unwrap();

        match input {
            Input::Export { model_id, .. } => assert_eq!(model_id, "order"),
            Input::Records(_) => panic!("Expected Export"),
        }
    }

    #[test]
    fn test_record_array() {
        let input = decode_str(
            "batch.json",
            r#"[
                {"model_id": "a", "model_json": "{\"resourceId\": \"c\"}"},
                {"model_id": "b", "model_json": {"resourceId": "c"}}
            ]"#,
        )
        .unwrap();

        match input {
            Input::Records(records) => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[1].model_id().as_str(), "b");
            }
            Input::Export { .. } => panic!("Expected Records"),
        }
    }

    #[test]
    fn test_json_lines() {
        let source = concat!(
            r#"{"model_id": "a", "model_json": {"resourceId": "c"}}"#,
            "\n\n",
            r#"{"model_id": "b", "namespace": "ns", "model_json": {"resourceId": "c"}}"#,
            "\n",
        );
        let input = decode_str("batch.jsonl", source).unwrap();

        match input {
            Input::Records(records) => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[1].namespace(), Some("ns"));
            }
            Input::Export { .. } => panic!("Expected Records"),
        }
    }

    #[test]
    fn test_single_record_line() {
        let input = decode_str("one.jsonl", r#"{"model_id": "a", "model_json": {}}"#).unwrap();

        assert!(matches!(input, Input::Records(ref records) if records.len() == 1));
    }

    #[test]
    fn test_pretty_printed_record() {
        let source = "{\n  \"model_id\": \"a\",\n  \"model_json\": {}\n}\n";
        let input = decode_str("one.json", source).unwrap();

        assert!(matches!(input, Input::Records(ref records) if records.len() == 1));
    }

    #[test]
    fn test_bad_line_is_named() {
        let source = "{\"model_id\": \"a\", \"model_json\": {}}\nnot json\n";
        let err = decode_str("batch.jsonl", source).unwrap_err();

        assert!(matches!(err, BpmetricsError::Input(_)));
        assert!(err.to_string().contains("line 2"));
    }
}
