/// Sentinel-value scrubbing.
///
/// Upstream instruments and transport protocols encode "no valid reading" as
/// specific out-of-band values (999.9 for a temperature probe, 9999/99999 for
/// pressure). Those are data-entry conventions, not measurements, so they are
/// replaced with the missing marker before any filtering happens.
///
/// Matching is exact equality, never a range test: sentinels typically sit
/// just outside the plausible range, and a range test would also swallow
/// legitimate extreme readings that the outlier filter should judge instead.

use crate::columns::ColumnSpec;
use crate::model::{Cell, Table};

/// Replace every cell that exactly equals a configured sentinel for its
/// column with `Cell::Missing`. Columns without a spec, and cells that are
/// not numbers, pass through untouched.
pub fn scrub_sentinels(table: &Table, specs: &[ColumnSpec]) -> Table {
    // (column index, sentinel set) for specs present in this table.
    let targets: Vec<(usize, &[f64])> = specs
        .iter()
        .filter(|spec| !spec.sentinels.is_empty())
        .filter_map(|spec| {
            table
                .column_index(&spec.name)
                .map(|idx| (idx, spec.sentinels.as_slice()))
        })
        .collect();

    let rows = table
        .rows
        .iter()
        .map(|row| {
            let mut row = row.clone();
            for (idx, sentinels) in &targets {
                if let Some(v) = row.cells[*idx].as_number() {
                    // Exact match: sentinel encodings are written verbatim by
                    // the instrument, not computed.
                    if sentinels.iter().any(|s| *s == v) {
                        row.cells[*idx] = Cell::Missing;
                    }
                }
            }
            row
        })
        .collect();

    table.with_rows(rows)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
