/// Trailing moving-average smoothing for display stability.
///
/// Station data is noisy at the observation-to-observation level; charts use
/// a trailing mean over the last `window` observations instead of the raw
/// series. Each smoothed series lands in a new `<column>_smooth` column next
/// to its source, which stays untouched.
///
/// Window policy: the first `window - 1` positions use a shrinking window
/// (minimum period 1), so the series starts at the first observation instead
/// of `window - 1` undefined points. Missing inputs are ignored within the
/// window; a window with nothing but missing yields missing.
///
/// Runs on the filtered table and is recomputed whenever the selection
/// changes — smoothing never reaches across the selection boundary.

use crate::model::{Cell, Table};

/// Suffix appended to a source column's name for its smoothed series.
pub const SMOOTH_SUFFIX: &str = "_smooth";

/// Default trailing window, in observations.
pub const DEFAULT_WINDOW: usize = 6;

/// Sort rows ascending by timestamp and append a `<col>_smooth` column for
/// every tracked column present in the table. A window of 0 is treated as 1.
pub fn smooth_columns(table: &Table, tracked: &[String], window: usize) -> Table {
    let window = window.max(1);

    let mut rows = table.rows.clone();
    rows.sort_by_key(|row| row.timestamp);

    let mut columns = table.columns.clone();
    for name in tracked {
        let Some(idx) = table.column_index(name) else {
            continue;
        };
        let values: Vec<Option<f64>> = rows.iter().map(|r| r.cells[idx].as_number()).collect();
        let smoothed = trailing_mean(&values, window);
        columns.push(format!("{}{}", name, SMOOTH_SUFFIX));
        for (row, cell) in rows.iter_mut().zip(smoothed) {
            row.cells.push(cell);
        }
    }

    Table { columns, rows }
}

/// Trailing mean of the non-missing values in each position's window
/// `[max(0, i - window + 1), i]`.
fn trailing_mean(values: &[Option<f64>], window: usize) -> Vec<Cell> {
    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let lo = (i + 1).saturating_sub(window);
            let in_window: Vec<f64> = values[lo..=i].iter().flatten().copied().collect();
            if in_window.is_empty() {
                Cell::Missing
            } else {
                Cell::Number(in_window.iter().sum::<f64>() / in_window.len() as f64)
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Row;
    use chrono::{TimeZone, Utc};

    fn table(values: Vec<Cell>) -> Table {
        Table {
            columns: vec!["temp".to_string()],
            rows: values
                .into_iter()
                .enumerate()
                .map(|(i, cell)| Row {
                    timestamp: Utc.with_ymd_and_hms(2024, 1, 1, i as u32, 0, 0).unwrap(),
                    cells: vec![cell],
                })
                .collect(),
        }
    }

    fn smoothed_values(t: &Table) -> Vec<Cell> {
        let idx = t.column_index("temp_smooth").unwrap();
        t.rows.iter().map(|r| r.cells[idx].clone()).collect()
    }

    fn tracked() -> Vec<String> {
        vec!["temp".to_string()]
    }

    #[test]
    fn test_shrinking_window_start() {
        let t = table(vec![Cell::Number(10.0), Cell::Number(20.0), Cell::Number(30.0)]);
        let out = smooth_columns(&t, &tracked(), 6);
        assert_eq!(
            smoothed_values(&out),
            vec![Cell::Number(10.0), Cell::Number(15.0), Cell::Number(20.0)]
        );
    }

    #[test]
    fn test_window_slides_after_warmup() {
        let t = table((1..=5).map(|i| Cell::Number(i as f64)).collect());
        let out = smooth_columns(&t, &tracked(), 2);
        // Trailing pairs: 1, (1+2)/2, (2+3)/2, ...
        assert_eq!(
            smoothed_values(&out),
            vec![
                Cell::Number(1.0),
                Cell::Number(1.5),
                Cell::Number(2.5),
                Cell::Number(3.5),
                Cell::Number(4.5),
            ]
        );
    }

    #[test]
    fn test_constant_series_stays_constant() {
        for window in [1, 2, 6, 100] {
            let t = table(vec![Cell::Number(7.5); 10]);
            let out = smooth_columns(&t, &tracked(), window);
            for cell in smoothed_values(&out) {
                assert_eq!(cell, Cell::Number(7.5));
            }
        }
    }

    #[test]
    fn test_missing_values_are_skipped_in_window() {
        let t = table(vec![Cell::Number(10.0), Cell::Missing, Cell::Number(20.0)]);
        let out = smooth_columns(&t, &tracked(), 3);
        assert_eq!(
            smoothed_values(&out),
            vec![Cell::Number(10.0), Cell::Number(10.0), Cell::Number(15.0)]
        );
    }

    #[test]
    fn test_all_missing_column_smooths_to_missing() {
        let t = table(vec![Cell::Missing; 4]);
        let out = smooth_columns(&t, &tracked(), 6);
        for cell in smoothed_values(&out) {
            assert_eq!(cell, Cell::Missing);
        }
    }

    #[test]
    fn test_sorts_by_timestamp_before_smoothing() {
        let mut t = table(vec![Cell::Number(10.0), Cell::Number(20.0)]);
        t.rows.reverse(); // now 20.0 comes first but is the later observation
        let out = smooth_columns(&t, &tracked(), 6);
        assert_eq!(
            smoothed_values(&out),
            vec![Cell::Number(10.0), Cell::Number(15.0)]
        );
    }

    #[test]
    fn test_source_column_is_untouched() {
        let t = table(vec![Cell::Number(10.0), Cell::Number(20.0)]);
        let out = smooth_columns(&t, &tracked(), 6);
        let idx = out.column_index("temp").unwrap();
        assert_eq!(out.rows[0].cells[idx], Cell::Number(10.0));
        assert_eq!(out.rows[1].cells[idx], Cell::Number(20.0));
    }

    #[test]
    fn test_zero_window_is_treated_as_one() {
        let t = table(vec![Cell::Number(10.0), Cell::Number(20.0)]);
        let out = smooth_columns(&t, &tracked(), 0);
        assert_eq!(
            smoothed_values(&out),
            vec![Cell::Number(10.0), Cell::Number(20.0)]
        );
    }

    #[test]
    fn test_untracked_or_absent_columns_add_nothing() {
        let t = table(vec![Cell::Number(10.0)]);
        let out = smooth_columns(&t, &["pressure".to_string()], 6);
        assert_eq!(out.columns, vec!["temp".to_string()]);
    }
}
