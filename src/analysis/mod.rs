/// Derived views over the cleaned table.
///
/// These are read-only consumers of the pipeline output: the table itself is
/// the artifact, and these helpers reshape it for rendering. Chart drawing
/// is out of scope; everything here returns plain points.
///
/// Submodules:
/// - `aggregates` — per-column series, daily means, and paired scatter
///   samples.

pub mod aggregates;
