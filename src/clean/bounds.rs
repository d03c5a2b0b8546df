/// Plausibility-bound outlier filtering.
///
/// Each tracked column carries a physically motivated range; a reading
/// outside it cannot be real. Unlike sentinel scrubbing, this stage drops
/// the *whole row* when any bounded column fails — a single impossible
/// reading marks the observation itself as suspect, not just the one field.
/// The asymmetry against the scrubber's per-cell policy is intentional and
/// preserved from the system this replaces.
///
/// Missing cells skip their column's check: a scrubbed-out temperature says
/// nothing about whether the rest of the observation is plausible.

use crate::columns::{ColumnSpec, PlausibleBound};
use crate::model::Table;

/// Keep only rows whose bounded columns all pass their plausibility checks.
/// Row order is preserved.
pub fn filter_outliers(table: &Table, specs: &[ColumnSpec]) -> Table {
    let checks: Vec<(usize, PlausibleBound)> = specs
        .iter()
        .filter_map(|spec| {
            let bound = spec.bound?;
            table.column_index(&spec.name).map(|idx| (idx, bound))
        })
        .collect();

    let rows = table
        .rows
        .iter()
        .filter(|row| {
            checks.iter().all(|(idx, bound)| {
                match row.cells[*idx].as_number() {
                    Some(v) => bound.contains(v),
                    None => true, // missing skips the check
                }
            })
        })
        .cloned()
        .collect();

    table.with_rows(rows)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
