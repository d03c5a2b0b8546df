/// Raw record acquisition.
///
/// The pipeline itself never performs I/O; one of these adapters runs first
/// and hands it a `Vec<RawRecord>`. Failures here are connectivity errors —
/// the pipeline is not invoked at all.
///
/// Submodules:
/// - `docstore` — live fetch from the document store's HTTP data API.
/// - `replay`   — local JSON file replay for development and offline runs.

pub mod docstore;
pub mod replay;
