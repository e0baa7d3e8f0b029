//! Mutable engine state owned by a table.

use std::num::NonZeroUsize;

use crate::pipeline::{ActiveSort, SortDirection};
use crate::selection::{Selection, SelectionMode};

/// The state a host mutates through [`DataTable`](crate::DataTable).
///
/// The derived view is a pure function of the source rows, the columns and
/// this state; the selection is carried alongside but never read by the
/// pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineState {
    pub(crate) query: String,
    pub(crate) sort: Option<ActiveSort>,
    pub(crate) page_index: usize,
    pub(crate) page_size: NonZeroUsize,
    pub(crate) selection: Selection,
}

impl EngineState {
    /// Initial state: empty query, unsorted, first page, nothing selected.
    pub fn new(page_size: NonZeroUsize, selection_mode: SelectionMode) -> Self {
        Self {
            query: String::new(),
            sort: None,
            page_index: 0,
            page_size,
            selection: Selection::new(selection_mode),
        }
    }

    /// The free-text query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The active sort, if any column has been activated.
    pub fn sort(&self) -> Option<&ActiveSort> {
        self.sort.as_ref()
    }

    /// Key of the active sort column.
    pub fn sort_key(&self) -> Option<&str> {
        self.sort.as_ref().map(|s| s.key.as_str())
    }

    /// Direction of the active sort (`Ascending` while unsorted).
    pub fn sort_direction(&self) -> SortDirection {
        self.sort
            .as_ref()
            .map(|s| s.direction)
            .unwrap_or_default()
    }

    /// Requested page index (may lie past the last page).
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Rows per page.
    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// The selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }
}
