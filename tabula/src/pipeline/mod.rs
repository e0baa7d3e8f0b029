//! Filter → sort → paginate pipeline.
//!
//! Every stage works on views: vectors of indices into the source rows.
//! Carrying source indices means a row's identity is always computed from
//! its position in the source collection, never from a view position.
//!
//! [`project`] runs all three stages from scratch. It keeps no cache, so a
//! host may memoize its output on the inputs without risking stale views.

mod filter;
mod page;
mod sort;

pub use filter::*;
pub use page::*;
pub use sort::*;

use std::ops::Range;

use crate::column::Column;
use crate::model::TableRow;
use crate::state::EngineState;

/// The projection of source rows through the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedView {
    filtered: Vec<usize>,
    sorted: Vec<usize>,
    page: Range<usize>,
    total_pages: usize,
}

impl DerivedView {
    /// Source indices of rows matching the query, in source order.
    pub fn filtered_indices(&self) -> &[usize] {
        &self.filtered
    }

    /// Source indices of filtered rows in sort order.
    pub fn sorted_indices(&self) -> &[usize] {
        &self.sorted
    }

    /// Source indices of the rows on the requested page.
    pub fn page_indices(&self) -> &[usize] {
        &self.sorted[self.page.clone()]
    }

    /// Range of the page within the sorted view.
    pub fn page_range(&self) -> Range<usize> {
        self.page.clone()
    }

    /// Total number of pages, never less than one.
    pub fn total_pages(&self) -> usize {
        self.total_pages.max(1)
    }

    /// Number of rows that passed the filter.
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Filtered rows, borrowed from the source.
    pub fn filtered_rows<'a, R>(&'a self, rows: &'a [R]) -> impl Iterator<Item = &'a R> + 'a {
        self.filtered.iter().filter_map(move |&i| rows.get(i))
    }

    /// Sorted rows, borrowed from the source.
    pub fn sorted_rows<'a, R>(&'a self, rows: &'a [R]) -> impl Iterator<Item = &'a R> + 'a {
        self.sorted.iter().filter_map(move |&i| rows.get(i))
    }

    /// Page rows, borrowed from the source.
    pub fn page_rows<'a, R>(&'a self, rows: &'a [R]) -> impl Iterator<Item = &'a R> + 'a {
        self.page_indices().iter().filter_map(move |&i| rows.get(i))
    }
}

/// Project source rows through filter, sort and paginate.
///
/// A pure function of its inputs; the selection in `state` is ignored.
pub fn project<R: TableRow>(rows: &[R], columns: &[Column], state: &EngineState) -> DerivedView {
    let filtered = filter(rows, columns, &state.query);
    let sorted = sort(rows, filtered.clone(), state.sort.as_ref());
    let page = paginate(sorted.len(), state.page_index, state.page_size);
    log::trace!(
        "projected {} rows: {} filtered, page {:?} of {}",
        rows.len(),
        filtered.len(),
        page.range,
        page.total_pages
    );
    DerivedView {
        filtered,
        sorted,
        page: page.range,
        total_pages: page.total_pages,
    }
}
