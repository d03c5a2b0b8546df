/// Schema normalization: flat records in, typed table out.
///
/// The source documents have no fixed schema, so the table's column set is
/// the union of every key observed across all records. Two passes: the first
/// collects the column set, the second materializes rows against it, with
/// absent keys becoming `Cell::Missing`.
///
/// The timestamp source key is the one hard requirement. A record whose
/// timestamp fails to parse is dropped (it cannot be placed on a time axis);
/// if the key is absent from *every* record the whole run fails with a
/// schema error. All other coercion failures degrade to missing cells.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use crate::logging::{self, Stage};
use crate::model::{Cell, FlatRecord, PipelineError, Row, Table};

/// Default timestamp source key in the observation documents.
pub const DEFAULT_TIMESTAMP_KEY: &str = "ts";

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Build a table from flattened records.
///
/// `numeric_columns` names the tracked measurement columns; their values are
/// coerced to numbers (JSON numbers pass through, numeric strings are
/// parsed, everything else becomes missing). Untracked columns keep their
/// scalar as text or number. Row order follows record order.
pub fn normalize(
    records: &[FlatRecord],
    timestamp_key: &str,
    numeric_columns: &[String],
) -> Result<Table, PipelineError> {
    // Pass 1: union column set, first-seen order. The timestamp key is
    // consumed into Row::timestamp rather than kept as a column.
    let mut columns: Vec<String> = Vec::new();
    let mut timestamp_key_seen = false;
    for record in records {
        for key in record.keys() {
            if key == timestamp_key {
                timestamp_key_seen = true;
            } else if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }

    if !timestamp_key_seen {
        return Err(PipelineError::Schema(format!(
            "timestamp key '{}' absent from all {} records",
            timestamp_key,
            records.len()
        )));
    }

    // Pass 2: materialize rows against the fixed column set.
    let mut rows = Vec::with_capacity(records.len());
    let mut dropped = 0usize;
    for record in records {
        let timestamp = match record.get(timestamp_key).and_then(parse_timestamp) {
            Some(ts) => ts,
            None => {
                dropped += 1;
                continue;
            }
        };

        let cells = columns
            .iter()
            .map(|col| match record.get(col) {
                None => Cell::Missing,
                Some(value) if numeric_columns.iter().any(|n| n == col) => {
                    coerce_numeric(value)
                }
                Some(value) => coerce_scalar(value),
            })
            .collect();

        rows.push(Row { timestamp, cells });
    }

    if dropped > 0 {
        logging::warn(
            Stage::Normalize,
            &format!("dropped {} records with unparseable timestamps", dropped),
        );
    }

    Ok(Table { columns, rows })
}

// ---------------------------------------------------------------------------
// Value coercion
// ---------------------------------------------------------------------------

/// Parse a timestamp value: RFC 3339 first, then the bare datetime formats
/// some upstream exporters emit, assumed UTC.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let s = value.as_str()?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }
    None
}

/// Coerce a tracked measurement value to a number, or missing.
fn coerce_numeric(value: &Value) -> Cell {
    match value {
        Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Missing),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Cell::Number)
            .unwrap_or(Cell::Missing),
        _ => Cell::Missing,
    }
}

/// Coerce an untracked scalar, preserving its shape for the preview.
fn coerce_scalar(value: &Value) -> Cell {
    match value {
        Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Missing),
        Value::String(s) => Cell::Text(s.clone()),
        Value::Bool(b) => Cell::Text(b.to_string()),
        Value::Null => Cell::Missing,
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
