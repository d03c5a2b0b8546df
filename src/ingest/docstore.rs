/// Document store data API client.
///
/// Fetches the raw observation documents for one collection over the store's
/// HTTP data API. The store itself (connection target, credentials, query
/// semantics) is opaque to the pipeline: this module's only job is to turn
/// one GET into a `Vec<RawRecord>` or a connectivity error.

use serde_json::Value;
use std::time::Duration;

use crate::logging::{self, Stage};
use crate::model::{PipelineError, RawRecord};

/// Request timeout for the data API.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the documents URL for a collection.
///
/// The data API exposes each collection's documents as a JSON array at
/// `<base>/collections/<name>/documents`.
pub fn build_documents_url(base_url: &str, collection: &str) -> String {
    format!(
        "{}/collections/{}/documents",
        base_url.trim_end_matches('/'),
        collection
    )
}

/// Fetch all raw records in a collection.
///
/// Non-object entries in the payload are skipped with a warning rather than
/// failing the batch; a document store can hold heterogeneous junk, and one
/// malformed entry should not block a refresh.
pub fn fetch_records(
    client: &reqwest::blocking::Client,
    base_url: &str,
    collection: &str,
) -> Result<Vec<RawRecord>, PipelineError> {
    let url = build_documents_url(base_url, collection);

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .timeout(REQUEST_TIMEOUT)
        .send()
        .map_err(|e| PipelineError::Connectivity(format!("request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(PipelineError::Connectivity(format!(
            "document store returned HTTP {}",
            response.status()
        )));
    }

    let payload: Value = response
        .json()
        .map_err(|e| PipelineError::Connectivity(format!("undecodable response body: {}", e)))?;

    records_from_payload(payload)
}

/// Extract raw records from a decoded payload: a top-level JSON array of
/// documents. Shared by the live client and the replay loader.
pub(crate) fn records_from_payload(payload: Value) -> Result<Vec<RawRecord>, PipelineError> {
    let entries = match payload {
        Value::Array(entries) => entries,
        other => {
            return Err(PipelineError::Connectivity(format!(
                "expected a JSON array of documents, got {}",
                type_name(&other)
            )));
        }
    };

    let total = entries.len();
    let records: Vec<RawRecord> = entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect();

    let skipped = total - records.len();
    if skipped > 0 {
        logging::warn(
            Stage::Ingest,
            &format!("skipped {} non-object entries in payload", skipped),
        );
    }

    Ok(records)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
