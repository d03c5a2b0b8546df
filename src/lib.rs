/// Weather observation cleaning pipeline.
///
/// Ingests semi-structured observation documents from a document store,
/// flattens them into a tabular form, scrubs instrument sentinel values,
/// filters by date range and physical plausibility, and derives smoothed
/// series for display. Chart rendering and persistence are out of scope;
/// the cleaned [`model::Table`] is the product.
///
/// Stage order is fixed and lives in [`pipeline::run`]:
///
/// ```text
/// raw records → flatten → normalize → scrub sentinels
///             → range filter → outlier filter → smooth → table
/// ```

pub mod analysis;
pub mod clean;
pub mod columns;
pub mod config;
pub mod flatten;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod range;
pub mod schema;
pub mod smooth;

pub use config::Config;
pub use model::{Cell, FlatRecord, PipelineError, RawRecord, Row, Table};
pub use pipeline::PipelineOutcome;
