//! Sort stage: comparison strategies, collation and the stable sort.

use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::model::{TableRow, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Apply the direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Header glyph for this direction.
    pub fn glyph(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("ascending"),
            SortDirection::Descending => f.write_str("descending"),
        }
    }
}

/// How values of a sort column are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    /// Compare as numbers. Missing and non-numeric values sort first.
    Numeric,
    /// Compare text forms with [`collate`]. Missing values sort as `""`.
    Lexical,
}

impl Comparison {
    /// Infer the comparison for a column from the values of `rows`.
    ///
    /// Numeric when at least one row has a value and every present value is
    /// a number; lexical otherwise.
    pub fn infer<'a, R: TableRow + 'a>(rows: impl IntoIterator<Item = &'a R>, key: &str) -> Self {
        let mut seen_number = false;
        for row in rows {
            match &*row.value(key) {
                Value::Null => {}
                value if value.is_numeric() => seen_number = true,
                _ => return Comparison::Lexical,
            }
        }
        if seen_number {
            Comparison::Numeric
        } else {
            Comparison::Lexical
        }
    }

    /// Resolve a declared hint, falling back to inference.
    pub fn resolve<'a, R: TableRow + 'a>(
        declared: Option<Comparison>,
        rows: impl IntoIterator<Item = &'a R>,
        key: &str,
    ) -> Self {
        declared.unwrap_or_else(|| Self::infer(rows, key))
    }
}

/// The active sort: key, direction and the resolved comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActiveSort {
    pub key: String,
    pub direction: SortDirection,
    pub comparison: Comparison,
}

impl ActiveSort {
    /// Create an active sort.
    pub fn new(key: impl Into<String>, direction: SortDirection, comparison: Comparison) -> Self {
        Self {
            key: key.into(),
            direction,
            comparison,
        }
    }
}

/// Sort key extracted once per row.
#[derive(Debug)]
enum SortKey {
    /// Text form (missing values are `""`).
    Text(String),
    Number(f64),
}

impl SortKey {
    fn extract(value: &Value, comparison: Comparison) -> Self {
        if comparison == Comparison::Numeric
            && let Some(number) = value.as_number()
        {
            return SortKey::Number(number);
        }
        SortKey::Text(value.to_text().map(|t| t.into_owned()).unwrap_or_default())
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => collate(a, b),
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Less,
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Greater,
        }
    }
}

/// Compare two strings for display order.
///
/// Letters compare case-insensitively first; when two strings are equal
/// ignoring case, lowercase sorts before uppercase at the first differing
/// character. Remaining ties fall back to code point order, so the result
/// is a total order.
pub fn collate(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    if primary != Ordering::Equal {
        return primary;
    }
    for (x, y) in a.chars().zip(b.chars()) {
        if x != y {
            match (x.is_lowercase(), y.is_lowercase()) {
                (true, false) => return Ordering::Less,
                (false, true) => return Ordering::Greater,
                _ => break,
            }
        }
    }
    a.cmp(b)
}

/// Sort a view (source indices into `rows`).
///
/// The sort is stable in both directions: rows that compare equal keep
/// their order from `view`. Without an active sort the view is returned
/// unchanged.
pub fn sort<R: TableRow>(rows: &[R], view: Vec<usize>, sort: Option<&ActiveSort>) -> Vec<usize> {
    let Some(sort) = sort else {
        return view;
    };

    let mut keyed: Vec<(usize, SortKey)> = view
        .into_iter()
        .map(|index| {
            let key = rows
                .get(index)
                .map(|row| SortKey::extract(&row.value(&sort.key), sort.comparison))
                .unwrap_or(SortKey::Text(String::new()));
            (index, key)
        })
        .collect();

    keyed.sort_by(|(_, a), (_, b)| sort.direction.apply(a.compare(b)));
    keyed.into_iter().map(|(index, _)| index).collect()
}
