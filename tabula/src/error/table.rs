//! TableError for table construction

/// Error type for building a [`DataTable`](crate::DataTable).
///
/// Table operations themselves never fail; these errors only arise while
/// validating columns. Configuration is validated earlier, when a
/// [`TableConfig`](crate::TableConfig) is built or loaded.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// A table needs at least one column.
    #[error("table has no columns")]
    NoColumns,

    /// Two columns share the same key.
    #[error("duplicate column key '{key}'")]
    DuplicateColumn { key: String },
}

impl TableError {
    /// Creates a new duplicate column error.
    pub fn duplicate_column(key: impl Into<String>) -> Self {
        Self::DuplicateColumn { key: key.into() }
    }
}
