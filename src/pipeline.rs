/// Pipeline orchestration.
///
/// Owns the stage order and nothing else:
///
/// ```text
/// raw records → flatten → normalize → scrub sentinels
///             → range filter → outlier filter → smooth → table
/// ```
///
/// One conditional fork: an empty table after normalization or after the
/// filters short-circuits the rest and surfaces [`PipelineOutcome::Empty`],
/// so the consumer can say "no data for this selection" instead of a crash
/// or a blank chart. Everything else is a straight line; each stage takes a
/// table and returns a new one.

use crate::clean::{bounds, sentinels};
use crate::config::Config;
use crate::flatten;
use crate::logging::{self, Stage};
use crate::model::{PipelineError, RawRecord, Table};
use crate::range;
use crate::schema;
use crate::smooth;

/// Terminal state of a pipeline run that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// The cleaned, filtered, smoothed table.
    Table(Table),
    /// Zero rows survived normalization or filtering. Not an error.
    Empty,
}

/// Run the full cleaning pipeline over one batch of raw records.
///
/// Fails only on the schema error (timestamp key absent from every record);
/// per-value problems degrade to missing cells along the way.
pub fn run(records: &[RawRecord], config: &Config) -> Result<PipelineOutcome, PipelineError> {
    if records.is_empty() {
        logging::warn(Stage::Ingest, "no records in source collection");
        return Ok(PipelineOutcome::Empty);
    }

    let numeric = config.numeric_column_names();

    let flat: Vec<_> = records
        .iter()
        .map(|record| flatten::flatten_record(record, &config.pipeline.separator))
        .collect();
    logging::debug(
        Stage::Flatten,
        &format!("flattened {} records", flat.len()),
    );

    let table = schema::normalize(&flat, &config.pipeline.timestamp_key, &numeric)?;
    logging::log_stage_rows(Stage::Normalize, records.len(), table.len());
    if table.is_empty() {
        return Ok(PipelineOutcome::Empty);
    }

    let table = sentinels::scrub_sentinels(&table, &config.columns);

    let rows_before = table.len();
    let table = range::filter_date_range(
        &table,
        config.pipeline.start_date,
        config.pipeline.end_date,
    );
    logging::log_stage_rows(Stage::Range, rows_before, table.len());

    let rows_before = table.len();
    let table = bounds::filter_outliers(&table, &config.columns);
    logging::log_stage_rows(Stage::Bounds, rows_before, table.len());

    if table.is_empty() {
        return Ok(PipelineOutcome::Empty);
    }

    let table = smooth::smooth_columns(&table, &numeric, config.pipeline.smoothing_window);
    Ok(PipelineOutcome::Table(table))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::{Value, json};

    fn records(values: Vec<Value>) -> Vec<RawRecord> {
        values
            .into_iter()
            .map(|v| match v {
                Value::Object(map) => map,
                other => panic!("fixture is not an object: {}", other),
            })
            .collect()
    }

    #[test]
    fn test_stage_order_scrubs_before_bounds() {
        // A sentinel is out of bounds too; scrubbing first means the row is
        // kept with a missing cell instead of being dropped as an outlier.
        let recs = records(vec![json!({
            "ts": "2024-01-01T00:00:00Z",
            "airTemperature": {"value": 999.9}
        })]);
        let outcome = run(&recs, &Config::default()).unwrap();
        match outcome {
            PipelineOutcome::Table(table) => {
                assert_eq!(table.len(), 1);
                let idx = table.column_index("airTemperature_value").unwrap();
                assert!(table.rows[0].cells[idx].is_missing());
            }
            PipelineOutcome::Empty => panic!("row should have survived"),
        }
    }

    #[test]
    fn test_empty_after_normalization_short_circuits() {
        let recs = records(vec![json!({"ts": "not a time"})]);
        let outcome = run(&recs, &Config::default()).unwrap();
        assert_eq!(outcome, PipelineOutcome::Empty);
    }

    #[test]
    fn test_empty_after_filtering_is_empty_outcome() {
        let recs = records(vec![json!({
            "ts": "2024-01-01T00:00:00Z",
            "airTemperature": {"value": 21.0}
        })]);
        let mut config = Config::default();
        config.pipeline.start_date = NaiveDate::from_ymd_opt(2030, 1, 1);
        config.pipeline.end_date = NaiveDate::from_ymd_opt(2030, 1, 2);
        let outcome = run(&recs, &config).unwrap();
        assert_eq!(outcome, PipelineOutcome::Empty);
    }

    #[test]
    fn test_schema_error_propagates() {
        let recs = records(vec![json!({"airTemperature": {"value": 21.0}})]);
        let err = run(&recs, &Config::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Schema(_)));
    }

    #[test]
    fn test_smoothed_columns_are_appended() {
        let recs = records(vec![
            json!({"ts": "2024-01-01T00:00:00Z", "airTemperature": {"value": 10.0}}),
            json!({"ts": "2024-01-01T01:00:00Z", "airTemperature": {"value": 20.0}}),
        ]);
        let outcome = run(&recs, &Config::default()).unwrap();
        let PipelineOutcome::Table(table) = outcome else {
            panic!("expected a table");
        };
        let idx = table.column_index("airTemperature_value_smooth").unwrap();
        assert_eq!(table.rows[0].cells[idx].as_number(), Some(10.0));
        assert_eq!(table.rows[1].cells[idx].as_number(), Some(15.0));
    }
}
