//! Free-text filter stage.

use crate::column::Column;
use crate::model::TableRow;

/// Case-insensitive substring matcher for a free-text query.
#[derive(Debug, Clone)]
pub struct QueryMatcher {
    needle: String,
}

impl QueryMatcher {
    /// Build a matcher. Returns `None` for an empty or whitespace-only query.
    ///
    /// The query is not trimmed: `"an "` only matches text containing the
    /// trailing space.
    pub fn new(query: &str) -> Option<Self> {
        if query.trim().is_empty() {
            return None;
        }
        Some(Self {
            needle: query.to_lowercase(),
        })
    }

    /// Returns `true` if any column's text contains the query.
    ///
    /// Null cells never match.
    pub fn matches<R: TableRow>(&self, row: &R, columns: &[Column]) -> bool {
        columns.iter().any(|column| {
            row.value(&column.key)
                .to_text()
                .is_some_and(|text| text.to_lowercase().contains(&self.needle))
        })
    }
}

/// Filter a source collection by query.
///
/// Returns the source indices of matching rows in source order. A blank
/// query keeps every row.
pub fn filter<R: TableRow>(rows: &[R], columns: &[Column], query: &str) -> Vec<usize> {
    filter_view(rows, 0..rows.len(), columns, query)
}

/// Filter an existing view (source indices into `rows`) by query.
///
/// Relative order of `view` is preserved.
pub fn filter_view<R: TableRow>(
    rows: &[R],
    view: impl IntoIterator<Item = usize>,
    columns: &[Column],
    query: &str,
) -> Vec<usize> {
    let view = view.into_iter();
    match QueryMatcher::new(query) {
        None => view.collect(),
        Some(matcher) => view
            .filter(|&index| {
                rows.get(index)
                    .is_some_and(|row| matcher.matches(row, columns))
            })
            .collect(),
    }
}
