//! Loader for llama-bench result files
//!
//! Two on-disk shapes are accepted:
//!
//! - a JSON array of result objects (what the runner script saves), or
//! - JSONL, one result object per line (`llama-bench -o jsonl`).
//!
//! Malformed entries are skipped with a warning so a partially corrupt file
//! still yields its good records; the pipeline itself only ever sees
//! well-typed [`Record`]s.

use crate::data::Record;
use crate::error::{Error, Result};
use tracing::{debug, warn};

/// Parse benchmark records from a string (JSON array or JSONL)
pub fn parse_records(input: &str) -> Result<Vec<Record>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::ParseError("input is empty".to_string()));
    }

    let records = if trimmed.starts_with('[') {
        parse_json_array(trimmed)?
    } else {
        parse_jsonl(trimmed)
    };

    if records.is_empty() {
        return Err(Error::ParseError(
            "no valid benchmark records found in input".to_string(),
        ));
    }

    debug!(count = records.len(), "parsed benchmark records");
    Ok(records)
}

/// Parse benchmark records from a file
pub fn load_from_file(path: &std::path::Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_records(&content)
}

fn parse_json_array(input: &str) -> Result<Vec<Record>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(input)?;

    let mut records = Vec::with_capacity(values.len());
    for (idx, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<Record>(value) {
            Ok(record) => records.push(record),
            Err(e) => warn!(index = idx, error = %e, "skipping malformed record"),
        }
    }
    Ok(records)
}

fn parse_jsonl(input: &str) -> Vec<Record> {
    let mut records = Vec::new();
    for (line_no, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Record>(line) {
            Ok(record) => records.push(record),
            Err(e) => warn!(line = line_no + 1, error = %e, "skipping malformed line"),
        }
    }
    records
}
