//! Host-facing data table.

mod events;

pub use events::{SelectionChanged, SubscriptionId};

use std::collections::HashSet;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::column::Column;
use crate::config::TableConfig;
use crate::error::TableError;
use crate::model::{RowId, RowIdentity, TableRow};
use crate::pipeline::{ActiveSort, Comparison, DerivedView, SortDirection, project};
use crate::selection::{PageSelection, PageToggle, SelectionMode};
use crate::state::EngineState;

use events::Listeners;

/// Unique identifier for a DataTable instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__table_{}", self.0)
    }
}

/// Active sort column and direction, for header glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortIndicator {
    pub key: String,
    pub direction: SortDirection,
}

/// Position of the current page within the filtered rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Requested page index (0-based).
    pub page_index: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// 1-based number of the first row shown, or 0 when the page is empty.
    pub first: usize,
    /// 1-based number of the last row shown, or 0 when the page is empty.
    pub last: usize,
    /// Number of rows that passed the filter.
    pub total: usize,
}

/// A data table: source rows, columns and the state driving their view.
///
/// `DataTable<R>` owns:
/// - the source rows and their identities
/// - the engine state (query, sort, page, selection)
/// - the derived view, recomputed from scratch by every mutator
/// - the selection-changed listeners
///
/// Mutators never fail. Page indices past the end produce an empty page,
/// unknown sort keys are ignored, and selected ids that match no row are
/// kept but left out of [`selected_rows`](Self::selected_rows).
///
/// # Example
///
/// ```
/// use tabula::model::Record;
/// use tabula::{Column, DataTable, TableConfig};
///
/// let rows = vec![
///     Record::new().set("id", 1).set("name", "Bob"),
///     Record::new().set("id", 2).set("name", "Ann"),
///     Record::new().set("id", 3).set("name", "Cid"),
/// ];
/// let mut table = DataTable::builder(vec![Column::new("name", "Name")])
///     .rows(rows)
///     .config(TableConfig::new(2).unwrap())
///     .build()
///     .unwrap();
///
/// table.set_sort_key("name");
/// let names: Vec<String> = table
///     .page_rows()
///     .iter()
///     .map(|r| r.get("name").unwrap().to_string())
///     .collect();
/// assert_eq!(names, ["Ann", "Bob"]);
/// assert_eq!(table.total_pages(), 2);
/// ```
pub struct DataTable<R> {
    id: TableId,
    columns: Vec<Column>,
    identity: RowIdentity<R>,
    rows: Vec<R>,
    /// Identity of each source row, aligned with `rows`.
    row_ids: Vec<RowId>,
    state: EngineState,
    view: DerivedView,
    /// Source indices of the last selection resolution.
    resolved: Vec<usize>,
    resolved_ids: Vec<RowId>,
    listeners: Listeners<R>,
}

impl<R: TableRow + 'static> DataTable<R> {
    /// Start building a table with the given columns.
    pub fn builder(columns: Vec<Column>) -> DataTableBuilder<R> {
        DataTableBuilder::new(columns)
    }

    /// Create a table with default configuration and the natural identity.
    pub fn new(columns: Vec<Column>, rows: Vec<R>) -> Result<Self, TableError> {
        Self::builder(columns).rows(rows).build()
    }
}

impl<R: TableRow> DataTable<R> {
    // -------------------------------------------------------------------------
    // Query and sort
    // -------------------------------------------------------------------------

    /// Set the free-text query. A changed query returns to the first page.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.state.query {
            return;
        }
        log::debug!("{}: query {:?}, page reset", self.id, query);
        self.state.query = query;
        self.state.page_index = 0;
        self.recompute();
    }

    /// Activate a column for sorting (header click).
    ///
    /// Activating the current sort column flips its direction; activating
    /// another column sorts it ascending. Once a column is active there is
    /// no way back to the unsorted order. The page index is kept.
    ///
    /// Unknown and unsortable columns are ignored and return `None`.
    pub fn set_sort_key(&mut self, key: &str) -> Option<SortIndicator> {
        let Some(column) = self.columns.iter().find(|c| c.key == key) else {
            log::debug!("{}: ignoring sort on unknown column {:?}", self.id, key);
            return None;
        };
        if !column.sortable {
            log::debug!("{}: ignoring sort on unsortable column {:?}", self.id, key);
            return None;
        }

        let (direction, comparison) = match &self.state.sort {
            Some(active) if active.key == key => (active.direction.toggled(), active.comparison),
            _ => (
                SortDirection::Ascending,
                Comparison::resolve(column.comparison, &self.rows, key),
            ),
        };
        log::debug!(
            "{}: sort by {:?} {} ({:?})",
            self.id,
            key,
            direction,
            comparison
        );
        self.state.sort = Some(ActiveSort::new(key, direction, comparison));
        self.recompute();
        self.sort_indicator()
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Set the page index. Indices past the last page are kept as given and
    /// show an empty page.
    pub fn set_page_index(&mut self, page_index: usize) {
        if page_index == self.state.page_index {
            return;
        }
        self.state.page_index = page_index;
        self.recompute();
    }

    /// Set the page size. A changed size returns to the first page.
    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        if page_size == self.state.page_size {
            return;
        }
        log::debug!("{}: page size {}, page reset", self.id, page_size);
        self.state.page_size = page_size;
        self.state.page_index = 0;
        self.recompute();
    }

    /// Move to the next page. Returns `false` on the last page.
    pub fn next_page(&mut self) -> bool {
        let next = self.state.page_index.saturating_add(1);
        if next >= self.total_pages() {
            return false;
        }
        self.set_page_index(next);
        true
    }

    /// Move to the previous page. From an index past the end this lands on
    /// the last page. Returns `false` on the first page.
    pub fn previous_page(&mut self) -> bool {
        if self.clamp_page_index() {
            return true;
        }
        if self.state.page_index == 0 {
            return false;
        }
        self.set_page_index(self.state.page_index - 1);
        true
    }

    /// Clamp the page index to the last page. Returns `true` if it moved.
    pub fn clamp_page_index(&mut self) -> bool {
        let last = self.total_pages() - 1;
        if self.state.page_index > last {
            self.set_page_index(last);
            true
        } else {
            false
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Toggle selection of a row by identity.
    ///
    /// The row need not be on the current page, or in the collection at all.
    /// Returns `true` if the selection changed.
    pub fn toggle_row(&mut self, id: impl Into<RowId>) -> bool {
        let id = id.into();
        let changed = self.state.selection.toggle(id);
        if changed {
            self.reconcile_selection(false);
        }
        changed
    }

    /// Select every row on the current page, or clear the selection when it
    /// is exactly the current page.
    pub fn toggle_all_on_page(&mut self) -> PageToggle {
        let page_ids = self.page_row_ids();
        let outcome = self.state.selection.toggle_page(&page_ids);
        log::debug!(
            "{}: toggle page ({} rows): {:?}",
            self.id,
            page_ids.len(),
            outcome
        );
        if outcome != PageToggle::Unchanged {
            self.reconcile_selection(false);
        }
        outcome
    }

    /// Clear the selection. Returns the IDs that were deselected.
    pub fn clear_selection(&mut self) -> Vec<RowId> {
        let removed = self.state.selection.clear();
        if !removed.is_empty() {
            log::debug!("{}: cleared {} selected rows", self.id, removed.len());
            self.reconcile_selection(false);
        }
        removed
    }

    /// Change the selection mode.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.state.selection.set_mode(mode);
        self.reconcile_selection(false);
    }

    // -------------------------------------------------------------------------
    // Source rows
    // -------------------------------------------------------------------------

    /// Replace the source rows.
    ///
    /// Identities and the sort comparison are recomputed, the view is
    /// rebuilt, and the selection is resolved against the new rows. Selected
    /// ids missing from the new rows stay selected but no longer resolve.
    /// Listeners are notified whenever the old or new resolution holds rows,
    /// since the resolved rows are the new values.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        if self.state.selection.iter().any(RowId::is_positional) {
            log::warn!(
                "{}: replacing rows while positional ids are selected; selections follow positions, not rows",
                self.id
            );
        }
        self.rows = rows;
        self.row_ids = self.identity.resolve_all(&self.rows);
        warn_duplicate_ids(self.id, &self.row_ids);

        if let Some(active) = &self.state.sort {
            let declared = self
                .columns
                .iter()
                .find(|c| c.key == active.key)
                .and_then(|c| c.comparison);
            let comparison = Comparison::resolve(declared, &self.rows, &active.key);
            if let Some(active) = &mut self.state.sort {
                active.comparison = comparison;
            }
        }

        self.recompute();
        self.reconcile_selection(true);
    }

    // -------------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------------

    /// Subscribe to selection changes.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&SelectionChanged<'_, R>) + Send + 'static,
    ) -> SubscriptionId {
        self.listeners.add(listener)
    }

    /// Remove a subscription. Returns `false` if it was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The table's unique ID.
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Column definitions.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The source rows.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Identity of the source row at `index`.
    pub fn row_id(&self, index: usize) -> Option<&RowId> {
        self.row_ids.get(index)
    }

    /// The engine state.
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// The current derived view.
    pub fn view(&self) -> &DerivedView {
        &self.view
    }

    /// The free-text query.
    pub fn query(&self) -> &str {
        &self.state.query
    }

    /// Requested page index.
    pub fn page_index(&self) -> usize {
        self.state.page_index
    }

    /// Rows per page.
    pub fn page_size(&self) -> NonZeroUsize {
        self.state.page_size
    }

    /// Rows on the current page, in display order.
    pub fn page_rows(&self) -> Vec<&R> {
        self.view.page_rows(&self.rows).collect()
    }

    /// Identities of the rows on the current page, in display order.
    pub fn page_row_ids(&self) -> Vec<RowId> {
        self.view
            .page_indices()
            .iter()
            .filter_map(|&i| self.row_ids.get(i).cloned())
            .collect()
    }

    /// Total number of pages, never less than one.
    pub fn total_pages(&self) -> usize {
        self.view.total_pages()
    }

    /// Where the current page sits within the filtered rows.
    pub fn page_info(&self) -> PageInfo {
        let range = self.view.page_range();
        let (first, last) = if range.is_empty() {
            (0, 0)
        } else {
            (range.start + 1, range.end)
        };
        PageInfo {
            page_index: self.state.page_index,
            total_pages: self.total_pages(),
            first,
            last,
            total: self.view.filtered_len(),
        }
    }

    /// The active sort column and direction.
    pub fn sort_indicator(&self) -> Option<SortIndicator> {
        self.state.sort.as_ref().map(|active| SortIndicator {
            key: active.key.clone(),
            direction: active.direction,
        })
    }

    /// The selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.state.selection.mode()
    }

    /// Check if a row is selected by identity.
    pub fn is_row_selected(&self, id: &RowId) -> bool {
        self.state.selection.is_selected(id)
    }

    /// Number of selected ids, including ids that match no current row.
    pub fn selection_count(&self) -> usize {
        self.state.selection.len()
    }

    /// All selected ids (sorted).
    pub fn selected_ids(&self) -> Vec<RowId> {
        self.state.selection.ids()
    }

    /// Selected rows present in the collection, in source order.
    pub fn selected_rows(&self) -> Vec<&R> {
        self.resolved
            .iter()
            .filter_map(|&i| self.rows.get(i))
            .collect()
    }

    /// Selection state of the current page, for a header checkbox.
    pub fn page_selection(&self) -> PageSelection {
        self.state.selection.page_state(&self.page_row_ids())
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn recompute(&mut self) {
        self.view = project(&self.rows, &self.columns, &self.state);
    }

    /// Resolve the selection against the rows and notify on change.
    ///
    /// After the rows are replaced the resolved rows are new values even
    /// when their ids are not, so any non-empty resolution notifies.
    fn reconcile_selection(&mut self, rows_replaced: bool) {
        let resolved = self.state.selection.resolve(&self.row_ids);
        let ids: Vec<RowId> = resolved
            .iter()
            .map(|&i| self.row_ids[i].clone())
            .collect();
        self.resolved = resolved;
        if ids == self.resolved_ids && (!rows_replaced || ids.is_empty()) {
            return;
        }
        self.resolved_ids = ids;

        log::trace!(
            "{}: selection resolved to {} rows, notifying {} listeners",
            self.id,
            self.resolved_ids.len(),
            self.listeners.len()
        );
        let rows: Vec<&R> = self
            .resolved
            .iter()
            .filter_map(|&i| self.rows.get(i))
            .collect();
        let event = SelectionChanged {
            table: self.id,
            ids: &self.resolved_ids,
            rows,
        };
        self.listeners.emit(&event);
    }
}

fn warn_duplicate_ids(table: TableId, row_ids: &[RowId]) {
    let mut seen = HashSet::with_capacity(row_ids.len());
    let duplicates: Vec<&RowId> = row_ids.iter().filter(|id| !seen.insert(*id)).collect();
    if !duplicates.is_empty() {
        log::warn!(
            "{}: {} rows share an identity (first: {}); selection cannot tell them apart",
            table,
            duplicates.len(),
            duplicates[0]
        );
    }
}

impl<R> fmt::Debug for DataTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("id", &self.id)
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("state", &self.state)
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`DataTable`].
pub struct DataTableBuilder<R> {
    columns: Vec<Column>,
    rows: Vec<R>,
    identity: Option<RowIdentity<R>>,
    config: TableConfig,
}

impl<R: TableRow + 'static> DataTableBuilder<R> {
    fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            identity: None,
            config: TableConfig::default(),
        }
    }

    /// Set the initial rows.
    pub fn rows(mut self, rows: Vec<R>) -> Self {
        self.rows = rows;
        self
    }

    /// Set the row identity. Defaults to [`RowIdentity::natural`].
    pub fn identity(mut self, identity: RowIdentity<R>) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Set the configuration.
    pub fn config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the initial page size.
    pub fn page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.config.page_size = page_size;
        self
    }

    /// Set the selection mode.
    pub fn selection_mode(mut self, mode: SelectionMode) -> Self {
        self.config.selection_mode = mode;
        self
    }

    /// Validate the columns and build the table.
    pub fn build(self) -> Result<DataTable<R>, TableError> {
        if self.columns.is_empty() {
            return Err(TableError::NoColumns);
        }
        let mut keys = HashSet::with_capacity(self.columns.len());
        for column in &self.columns {
            if !keys.insert(column.key.as_str()) {
                return Err(TableError::duplicate_column(&column.key));
            }
        }

        let id = TableId::new();
        let identity = self.identity.unwrap_or_else(RowIdentity::natural);
        let row_ids = identity.resolve_all(&self.rows);
        warn_duplicate_ids(id, &row_ids);

        let state = EngineState::new(self.config.page_size, self.config.selection_mode);
        let view = project(&self.rows, &self.columns, &state);
        log::debug!(
            "{}: created with {} columns, {} rows, page size {}",
            id,
            self.columns.len(),
            self.rows.len(),
            state.page_size
        );

        Ok(DataTable {
            id,
            columns: self.columns,
            identity,
            rows: self.rows,
            row_ids,
            state,
            view,
            resolved: Vec::new(),
            resolved_ids: Vec::new(),
            listeners: Listeners::default(),
        })
    }
}

impl<R> fmt::Debug for DataTableBuilder<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTableBuilder")
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
