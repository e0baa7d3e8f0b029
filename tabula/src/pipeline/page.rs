//! Pagination stage.

use std::num::NonZeroUsize;
use std::ops::Range;

/// One page of a sorted view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Positions within the sorted view covered by this page.
    pub range: Range<usize>,
    /// Total number of pages, never less than one.
    pub total_pages: usize,
}

impl Page {
    /// Returns `true` if the page holds no rows.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Number of rows on the page.
    pub fn len(&self) -> usize {
        self.range.len()
    }
}

/// Number of pages needed for `len` rows. An empty view still has one page.
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get()).max(1)
}

/// Slice a view of `len` rows into the requested page.
///
/// A page index past the end yields an empty range rather than an error.
pub fn paginate(len: usize, page_index: usize, page_size: NonZeroUsize) -> Page {
    let size = page_size.get();
    let start = page_index.saturating_mul(size).min(len);
    let end = start.saturating_add(size).min(len);
    Page {
        range: start..end,
        total_pages: total_pages(len, page_size),
    }
}
