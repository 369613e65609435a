//! Wishlist: unbounded set of product ids in insertion order.

use std::sync::Arc;

use handset_hub_core::ProductId;

use super::{Capacity, IdList, ListKind, PersistedList, ToggleOutcome};
use crate::storage::{Storage, StorageError};

/// Wishlist service bound to its durable record.
#[derive(Debug)]
pub struct Wishlist {
    list: PersistedList<ProductId>,
}

impl Wishlist {
    /// Create the service over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            list: PersistedList::new(storage, ListKind::Wishlist),
        }
    }

    /// Current ids, read from storage.
    #[must_use]
    pub fn ids(&self) -> IdList {
        IdList::from_stored(self.list.load(), Capacity::Unbounded)
    }

    /// Whether `id` is wishlisted.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids().contains(id)
    }

    /// Number of wishlisted products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids().len()
    }

    /// Whether the wishlist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }

    /// Add `id` if absent, remove it if present, and persist.
    ///
    /// Never returns [`ToggleOutcome::Rejected`].
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the wishlist cannot be written.
    pub fn toggle(&self, id: &ProductId) -> Result<ToggleOutcome, StorageError> {
        let mut ids = self.ids();
        let outcome = ids.toggle(id);
        self.list.commit(ids.as_slice())?;
        Ok(outcome)
    }

    /// Remove `id` and persist. Returns whether it was present.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the wishlist cannot be written.
    pub fn remove(&self, id: &ProductId) -> Result<bool, StorageError> {
        let mut ids = self.ids();
        let removed = ids.remove(id);
        self.list.commit(ids.as_slice())?;
        Ok(removed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, keys};

    fn wishlist() -> (Arc<MemoryStorage>, Wishlist) {
        let storage = Arc::new(MemoryStorage::new());
        let wishlist = Wishlist::new(storage.clone());
        (storage, wishlist)
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let (storage, wishlist) = wishlist();
        let id = ProductId::new("p1");
        wishlist.toggle(&ProductId::new("p0")).unwrap();
        let before = storage.read(keys::WISHLIST).unwrap();

        assert_eq!(wishlist.toggle(&id).unwrap(), ToggleOutcome::Added);
        assert!(wishlist.contains(&id));
        assert_eq!(wishlist.toggle(&id).unwrap(), ToggleOutcome::Removed);
        assert!(!wishlist.contains(&id));

        assert_eq!(storage.read(keys::WISHLIST).unwrap(), before);
    }

    #[test]
    fn test_remove_is_distinct_from_toggle() {
        let (_, wishlist) = wishlist();
        let id = ProductId::new("p1");

        assert!(!wishlist.remove(&id).unwrap());
        assert!(!wishlist.contains(&id));

        wishlist.toggle(&id).unwrap();
        assert!(wishlist.remove(&id).unwrap());
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_insertion_order_survives_reload() {
        let (storage, wishlist) = wishlist();
        for id in ["c", "a", "b"] {
            wishlist.toggle(&ProductId::new(id)).unwrap();
        }

        let reloaded = Wishlist::new(storage);
        let list = reloaded.ids();
        let ids: Vec<&str> = list.as_slice().iter().map(ProductId::as_str).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(reloaded.len(), 3);
    }

    #[test]
    fn test_corrupt_record_reads_empty() {
        let (storage, wishlist) = wishlist();
        storage.write(keys::WISHLIST, "not json at all").unwrap();
        assert!(wishlist.is_empty());

        // The next mutation replaces the corrupt record.
        wishlist.toggle(&ProductId::new("p1")).unwrap();
        assert_eq!(wishlist.len(), 1);
    }
}
