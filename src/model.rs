/// Core data types for the weather observation cleaning pipeline.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no pipeline logic and no I/O — only types and small accessors.

use chrono::{DateTime, Utc};

// ---------------------------------------------------------------------------
// Record types
// ---------------------------------------------------------------------------

/// A raw observation document as fetched from the store: string keys mapping
/// to scalars or further nested mappings. No fixed schema.
///
/// `serde_json::Map` is built with the `preserve_order` feature, so iteration
/// follows the document's own key order — flattening depends on that.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// A flattened observation: composite keys (ancestor keys joined by the
/// configured separator), scalar values only. Produced by `flatten`;
/// invariant: no value is itself an object.
pub type FlatRecord = serde_json::Map<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// Table types
// ---------------------------------------------------------------------------

/// One cell of the normalized table.
///
/// `Missing` is the explicit "no valid value" marker — coercion failures and
/// scrubbed sentinels both land here. Numeric access goes through
/// [`Cell::as_number`] only, so a missing value can never silently read as
/// zero.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Missing,
}

impl Cell {
    /// The cell's numeric value, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Number(v) => write!(f, "{}", v),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Missing => write!(f, "<missing>"),
        }
    }
}

/// One row of the table: a valid timestamp plus one cell per table column.
/// Rows without a parseable timestamp never make it into a `Table`.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub timestamp: DateTime<Utc>,
    /// Parallel to `Table::columns`.
    pub cells: Vec<Cell>,
}

/// The normalized observation table: a union column set over every key seen
/// in the source records, and an ordered sequence of rows coerced to it.
///
/// Each pipeline stage consumes a `Table` and produces a new one; nothing
/// mutates a table in place, so intermediate stages stay inspectable.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column names in first-seen order. The timestamp is not a column; it
    /// lives on each `Row` directly.
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Position of a column by name, if the table has it.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Same column set, different rows. Filter stages use this so the schema
    /// survives even when every row is dropped.
    pub fn with_rows(&self, rows: Vec<Row>) -> Table {
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// The first `n` rows, for the cleaned-data preview.
    pub fn preview(&self, n: usize) -> &[Row] {
        &self.rows[..self.rows.len().min(n)]
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can stop a pipeline run.
///
/// Only these two abort; every per-value problem (unparseable timestamp or
/// number, sentinel match) degrades to `Cell::Missing` instead.
#[derive(Debug, PartialEq)]
pub enum PipelineError {
    /// The document store was unreachable or returned an unusable response.
    /// Raised by the ingest adapters before the pipeline starts.
    Connectivity(String),
    /// No record contains the timestamp source key — there is no time axis
    /// to build, so no partial table is produced.
    Schema(String),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Connectivity(msg) => write!(f, "Connectivity error: {}", msg),
            PipelineError::Schema(msg) => write!(f, "Schema error: {}", msg),
        }
    }
}

impl std::error::Error for PipelineError {}
