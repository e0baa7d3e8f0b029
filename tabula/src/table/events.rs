//! Selection-changed notification.

use crate::model::RowId;

use super::TableId;

/// Fired when the resolved selection differs from the previous resolution,
/// and after every row replacement that resolves to or from selected rows.
///
/// Only rows present in the current collection appear here; selected ids
/// with no matching row are left out.
#[derive(Debug)]
pub struct SelectionChanged<'a, R> {
    /// The table that fired the event.
    pub table: TableId,
    /// Identities of the resolved rows, in source order.
    pub ids: &'a [RowId],
    /// The resolved rows, in source order.
    pub rows: Vec<&'a R>,
}

impl<R> SelectionChanged<'_, R> {
    /// Number of resolved rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if no row is selected.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Handle returned by [`DataTable::subscribe`](super::DataTable::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

type Listener<R> = Box<dyn FnMut(&SelectionChanged<'_, R>) + Send>;

/// Registered selection listeners, called in subscription order.
pub(crate) struct Listeners<R> {
    next: usize,
    entries: Vec<(SubscriptionId, Listener<R>)>,
}

impl<R> Default for Listeners<R> {
    fn default() -> Self {
        Self {
            next: 0,
            entries: Vec::new(),
        }
    }
}

impl<R> Listeners<R> {
    pub(crate) fn add(
        &mut self,
        listener: impl FnMut(&SelectionChanged<'_, R>) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn emit(&mut self, event: &SelectionChanged<'_, R>) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }
}
