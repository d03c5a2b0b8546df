/// Aggregates and point extraction for the rendering layer.
///
/// Missing cells never contribute: a series skips them, a daily mean
/// averages only the readings that exist, and a scatter pair requires both
/// coordinates.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;

use crate::model::Table;

/// The non-missing points of one column as `(timestamp, value)`, in row
/// order. Returns an empty series for a column the table does not have.
pub fn series(table: &Table, column: &str) -> Vec<(DateTime<Utc>, f64)> {
    let Some(idx) = table.column_index(column) else {
        return Vec::new();
    };
    table
        .rows
        .iter()
        .filter_map(|row| row.cells[idx].as_number().map(|v| (row.timestamp, v)))
        .collect()
}

/// Mean of a column's non-missing values per UTC calendar day, in date
/// order. Days with no valid readings are absent from the result.
pub fn daily_mean(table: &Table, column: &str) -> Vec<(NaiveDate, f64)> {
    let Some(idx) = table.column_index(column) else {
        return Vec::new();
    };

    let mut by_day: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for row in &table.rows {
        if let Some(v) = row.cells[idx].as_number() {
            let entry = by_day.entry(row.timestamp.date_naive()).or_insert((0.0, 0));
            entry.0 += v;
            entry.1 += 1;
        }
    }

    by_day
        .into_iter()
        .map(|(date, (sum, count))| (date, sum / count as f64))
        .collect()
}

/// Paired `(x, y)` samples for a cross-column scatter view: one point per
/// row where both columns are non-missing.
pub fn scatter_pairs(table: &Table, x_column: &str, y_column: &str) -> Vec<(f64, f64)> {
    let (Some(xi), Some(yi)) = (table.column_index(x_column), table.column_index(y_column))
    else {
        return Vec::new();
    };
    table
        .rows
        .iter()
        .filter_map(|row| {
            let x = row.cells[xi].as_number()?;
            let y = row.cells[yi].as_number()?;
            Some((x, y))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, Row};
    use chrono::TimeZone;

    fn table() -> Table {
        let mk = |d: u32, h: u32, temp: Cell, wind: Cell| Row {
            timestamp: Utc.with_ymd_and_hms(2024, 3, d, h, 0, 0).unwrap(),
            cells: vec![temp, wind],
        };
        Table {
            columns: vec!["temp".to_string(), "wind".to_string()],
            rows: vec![
                mk(1, 0, Cell::Number(10.0), Cell::Number(2.0)),
                mk(1, 12, Cell::Number(20.0), Cell::Missing),
                mk(2, 0, Cell::Missing, Cell::Number(4.0)),
                mk(2, 12, Cell::Number(30.0), Cell::Number(6.0)),
            ],
        }
    }

    #[test]
    fn test_series_skips_missing() {
        let points = series(&table(), "temp");
        let values: Vec<f64> = points.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_daily_mean_per_day() {
        let means = daily_mean(&table(), "temp");
        assert_eq!(
            means,
            vec![
                (NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), 15.0),
                // Day 2's missing reading does not drag the mean down.
                (NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(), 30.0),
            ]
        );
    }

    #[test]
    fn test_scatter_requires_both_coordinates() {
        let pairs = scatter_pairs(&table(), "temp", "wind");
        assert_eq!(pairs, vec![(10.0, 2.0), (30.0, 6.0)]);
    }

    #[test]
    fn test_unknown_column_yields_empty() {
        assert!(series(&table(), "pressure").is_empty());
        assert!(daily_mean(&table(), "pressure").is_empty());
        assert!(scatter_pairs(&table(), "temp", "pressure").is_empty());
    }
}
