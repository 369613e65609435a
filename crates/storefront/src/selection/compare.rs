//! Compare: at most two product ids, in selection order.

use std::sync::Arc;

use handset_hub_core::ProductId;

use super::{Capacity, IdList, ListKind, PersistedList, ToggleOutcome};
use crate::storage::{Storage, StorageError};

/// Maximum number of products that can be compared side by side.
pub const COMPARE_CAPACITY: usize = 2;

/// Compare service bound to its durable record.
#[derive(Debug)]
pub struct Compare {
    list: PersistedList<ProductId>,
}

impl Compare {
    /// Create the service over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            list: PersistedList::new(storage, ListKind::Compare),
        }
    }

    /// Current ids, read from storage and capped at [`COMPARE_CAPACITY`].
    #[must_use]
    pub fn ids(&self) -> IdList {
        IdList::from_stored(self.list.load(), Capacity::AtMost(COMPARE_CAPACITY))
    }

    /// Whether `id` is selected for comparison.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids().contains(id)
    }

    /// Number of selected products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids().len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }

    /// Whether the selection is complete and the summary strip is shown.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.len() == COMPARE_CAPACITY
    }

    /// Remove `id` if present, otherwise append it if fewer than two are
    /// selected. A third id is rejected and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the selection cannot be written.
    pub fn toggle(&self, id: &ProductId) -> Result<ToggleOutcome, StorageError> {
        let mut ids = self.ids();
        let outcome = ids.toggle(id);
        if outcome.changed() {
            self.list.commit(ids.as_slice())?;
        }
        Ok(outcome)
    }

    /// Clear the selection by deleting its durable record, returning the ids
    /// that were selected.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be removed.
    pub fn clear(&self) -> Result<Vec<ProductId>, StorageError> {
        let previous = self.ids().clear();
        self.list.clear()?;
        Ok(previous)
    }
}
