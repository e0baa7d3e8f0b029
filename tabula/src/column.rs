//! Column descriptors.

use crate::pipeline::Comparison;

/// Column configuration.
///
/// Columns name a row field by `key`, carry a display `label`, and declare
/// whether the column can be sorted and how its values compare. The label
/// plays no part in filtering or sorting.
///
/// # Examples
///
/// ```
/// use tabula::Column;
///
/// let columns = vec![
///     Column::new("id", "ID").numeric(),
///     Column::new("name", "Name"),
///     Column::new("notes", "Notes").unsortable(),
/// ];
/// assert!(columns[1].sortable);
/// assert!(!columns[2].sortable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Field key, unique within a table.
    pub key: String,
    /// Column header text.
    pub label: String,
    /// Whether header clicks sort by this column.
    pub sortable: bool,
    /// Declared comparison. Inferred from the values when `None`.
    pub comparison: Option<Comparison>,
}

impl Column {
    /// Create a sortable column with an inferred comparison.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: true,
            comparison: None,
        }
    }

    /// Disable sorting on this column.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Declare the comparison used when sorting by this column.
    pub fn comparison(mut self, comparison: Comparison) -> Self {
        self.comparison = Some(comparison);
        self
    }

    /// Always compare this column numerically.
    pub fn numeric(self) -> Self {
        self.comparison(Comparison::Numeric)
    }

    /// Always compare this column as text.
    pub fn lexical(self) -> Self {
        self.comparison(Comparison::Lexical)
    }
}
