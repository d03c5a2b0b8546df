/// Date-range slicing for interactive viewing.
///
/// The selector works in calendar dates, not timestamps: a row belongs to a
/// day if its timestamp's UTC date falls inside the inclusive
/// `[start, end]` interval. Either endpoint left unspecified defaults to the
/// matching edge of the data's own span, so "no selection" means everything.

use chrono::NaiveDate;

use crate::model::Table;

/// The data's full calendar span, `(min_date, max_date)`, or `None` for an
/// empty table. This is what the date selector offers as its default range.
pub fn full_span(table: &Table) -> Option<(NaiveDate, NaiveDate)> {
    let mut dates = table.rows.iter().map(|row| row.timestamp.date_naive());
    let first = dates.next()?;
    let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
    Some((min, max))
}

/// Keep rows whose date lies in the inclusive interval, preserving order.
///
/// An inverted interval (`start > end`) matches nothing and returns an empty
/// table rather than an error — the selector treats it as an empty selection.
pub fn filter_date_range(
    table: &Table,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Table {
    let Some((span_start, span_end)) = full_span(table) else {
        return table.clone(); // already empty
    };
    let start = start.unwrap_or(span_start);
    let end = end.unwrap_or(span_end);

    let rows = table
        .rows
        .iter()
        .filter(|row| {
            let date = row.timestamp.date_naive();
            date >= start && date <= end
        })
        .cloned()
        .collect();

    table.with_rows(rows)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
