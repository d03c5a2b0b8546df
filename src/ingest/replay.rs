/// Development mode: replay records from a local file.
///
/// When the live document store is unavailable (no credentials, no network,
/// or just iterating on cleaning rules), point the service at a JSON file
/// containing the same array-of-documents payload the data API would return.

use crate::model::{PipelineError, RawRecord};

use super::docstore;

/// Load raw records from a local JSON file holding an array of documents.
pub fn load_records(path: &str) -> Result<Vec<RawRecord>, PipelineError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| PipelineError::Connectivity(format!("cannot read {}: {}", path, e)))?;
    let payload = serde_json::from_str(&text)
        .map_err(|e| PipelineError::Connectivity(format!("invalid JSON in {}: {}", path, e)))?;
    docstore::records_from_payload(payload)
}
