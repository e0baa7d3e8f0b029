//! Selection state management.
//!
//! Selection tracks rows by [`RowId`], never by position, so it survives
//! filter, sort and page changes. It is not reset by any pipeline stage;
//! only the selection operations below change it.

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::model::RowId;

/// Selection mode for a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// No selection allowed.
    None,
    /// At most one row is selected.
    Single,
    /// Any number of rows can be selected.
    #[default]
    Multiple,
}

/// Outcome of a page-scoped bulk toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToggle {
    /// Every page row was added to the selection.
    Selected,
    /// The selection was cleared.
    Cleared,
    /// Nothing changed (selection disabled or not in multiple mode).
    Unchanged,
}

/// Selection state of the current page, for a header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSelection {
    /// No page row is selected (or the page is empty).
    None,
    /// Some but not all page rows are selected.
    Partial,
    /// Every page row is selected.
    All,
}

/// ID-based selection state.
///
/// Ids that no longer resolve to a row stay in the set until they are
/// toggled off or the selection is cleared; resolution simply skips them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    mode: SelectionMode,
    selected: HashSet<RowId>,
}

impl Selection {
    /// Create an empty selection in the given mode.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: HashSet::new(),
        }
    }

    /// The selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Change the selection mode.
    ///
    /// Switching to `None` clears the selection. Switching to `Single`
    /// keeps only the smallest selected id.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
        match mode {
            SelectionMode::None => self.selected.clear(),
            SelectionMode::Single if self.selected.len() > 1 => {
                let keep = self.selected.iter().min().cloned();
                self.selected.clear();
                self.selected.extend(keep);
            }
            _ => {}
        }
    }

    /// Get all selected IDs (sorted for deterministic ordering).
    pub fn ids(&self) -> Vec<RowId> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Check if an ID is selected.
    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selected.contains(id)
    }

    /// Get the number of selected IDs, resolvable or not.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Iterate selected IDs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &RowId> {
        self.selected.iter()
    }

    /// Toggle membership of an ID. Returns `true` if the selection changed.
    ///
    /// The ID need not belong to a visible row.
    pub fn toggle(&mut self, id: RowId) -> bool {
        match self.mode {
            SelectionMode::None => false,
            SelectionMode::Single => {
                if !self.selected.remove(&id) {
                    self.selected.clear();
                    self.selected.insert(id);
                }
                true
            }
            SelectionMode::Multiple => {
                if !self.selected.remove(&id) {
                    self.selected.insert(id);
                }
                true
            }
        }
    }

    /// Toggle every row of the current page.
    ///
    /// When the selection is exactly the page's ids, the whole selection is
    /// cleared; otherwise every page id is added. Ids of rows outside the
    /// page are never added, and are only removed in the clearing case,
    /// where none exist.
    pub fn toggle_page(&mut self, page_ids: &[RowId]) -> PageToggle {
        if self.mode != SelectionMode::Multiple {
            return PageToggle::Unchanged;
        }

        let page: HashSet<&RowId> = page_ids.iter().collect();
        let all_selected = page.iter().all(|id| self.selected.contains(*id));
        if all_selected && self.selected.len() == page.len() {
            if self.selected.is_empty() {
                return PageToggle::Unchanged;
            }
            self.selected.clear();
            PageToggle::Cleared
        } else {
            let before = self.selected.len();
            self.selected.extend(page_ids.iter().cloned());
            if self.selected.len() == before {
                PageToggle::Unchanged
            } else {
                PageToggle::Selected
            }
        }
    }

    /// Selection state of a page of ids.
    pub fn page_state(&self, page_ids: &[RowId]) -> PageSelection {
        let selected = page_ids.iter().filter(|id| self.is_selected(id)).count();
        match selected {
            0 => PageSelection::None,
            n if n == page_ids.len() => PageSelection::All,
            _ => PageSelection::Partial,
        }
    }

    /// Clear all selection.
    /// Returns the IDs that were deselected.
    pub fn clear(&mut self) -> Vec<RowId> {
        self.selected.drain().collect()
    }

    /// Resolve the selection against a source collection's identities.
    ///
    /// Returns source indices of selected rows in source order. Ids with no
    /// matching row are skipped.
    pub fn resolve(&self, row_ids: &[RowId]) -> Vec<usize> {
        if self.selected.is_empty() {
            return Vec::new();
        }
        row_ids
            .iter()
            .enumerate()
            .filter(|(_, id)| self.selected.contains(*id))
            .map(|(index, _)| index)
            .collect()
    }
}
