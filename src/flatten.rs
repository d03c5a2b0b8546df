/// Recursive document flattening.
///
/// Observation documents arrive with measurements grouped into nested
/// objects (`airTemperature: {value: 21.3, quality: "1"}`). The table layer
/// wants one flat namespace, so nested objects are expanded depth-first with
/// composite keys: parent and child joined by the configured separator,
/// `airTemperature_value`.
///
/// Pure function of its input; no I/O, no shared state.

use serde_json::Value;

use crate::model::{FlatRecord, RawRecord};

/// Default key separator; matches the column names in the registry.
pub const DEFAULT_SEPARATOR: &str = "_";

/// Flatten one raw document into a single-level record.
///
/// Every nested object is expanded recursively; composite keys follow the
/// depth-first encounter order of the document's own key order. Anything
/// that is not an object — scalars, null, and arrays alike — is a leaf and
/// is carried over unchanged. Depth is bounded only by the document itself.
pub fn flatten_record(record: &RawRecord, separator: &str) -> FlatRecord {
    let mut flat = FlatRecord::new();
    for (key, value) in record {
        flatten_value(key, value, separator, &mut flat);
    }
    flat
}

fn flatten_value(key: &str, value: &Value, separator: &str, out: &mut FlatRecord) {
    match value {
        Value::Object(nested) => {
            for (child, child_value) in nested {
                let composite = format!("{}{}{}", key, separator, child);
                flatten_value(&composite, child_value, separator, out);
            }
        }
        leaf => {
            out.insert(key.to_string(), leaf.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
