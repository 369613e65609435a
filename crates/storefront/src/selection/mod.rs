//! Selection lists: cart, wishlist, and compare.
//!
//! All three follow the same pattern. A pure value type ([`CartLines`] or
//! [`IdList`]) carries the state transitions and can be tested without any
//! storage. A thin service ([`Cart`], [`Wishlist`], [`Compare`]) holds an
//! injected [`Storage`] handle, re-reads the durable record on every
//! operation, applies one transition, and writes the result back before
//! returning. Rendering and notifications are not performed here; the
//! session service in [`crate::session`] invokes views after each committed
//! mutation.

mod cart;
mod compare;
mod wishlist;

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use handset_hub_core::ProductId;

use crate::storage::{self, Storage, StorageError, keys};

pub use cart::{Cart, CartLine, CartLines, LineChange};
pub use compare::{COMPARE_CAPACITY, Compare};
pub use wishlist::Wishlist;

/// Which selection list an event or indicator belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Cart,
    Wishlist,
    Compare,
}

impl ListKind {
    /// Durable record key for this list.
    #[must_use]
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::Cart => keys::CART,
            Self::Wishlist => keys::WISHLIST,
            Self::Compare => keys::COMPARE,
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cart => "cart",
            Self::Wishlist => "wishlist",
            Self::Compare => "compare",
        })
    }
}

/// Size policy for an id list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    Unbounded,
    AtMost(usize),
}

impl Capacity {
    const fn admits(self, len: usize) -> bool {
        match self {
            Self::Unbounded => true,
            Self::AtMost(max) => len < max,
        }
    }
}

/// Result of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The id was absent and has been appended.
    Added,
    /// The id was present and has been removed.
    Removed,
    /// The id was absent but the list is full; nothing changed.
    Rejected,
}

impl ToggleOutcome {
    /// Whether the list contents changed.
    #[must_use]
    pub const fn changed(self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

/// Ordered list of unique product ids with a size policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdList {
    ids: Vec<ProductId>,
    capacity: Capacity,
}

impl IdList {
    /// Create an empty list.
    #[must_use]
    pub const fn new(capacity: Capacity) -> Self {
        Self {
            ids: Vec::new(),
            capacity,
        }
    }

    /// Rebuild a list from a stored sequence.
    ///
    /// Duplicates are dropped (first occurrence wins) and the sequence is
    /// truncated to the capacity, so a hand-edited or legacy record can
    /// never break the list invariants.
    #[must_use]
    pub fn from_stored(stored: Vec<ProductId>, capacity: Capacity) -> Self {
        let mut list = Self::new(capacity);
        for id in stored {
            if !list.contains(&id) && list.capacity.admits(list.ids.len()) {
                list.ids.push(id);
            }
        }
        list
    }

    /// Membership test.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    /// Number of ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether another id would be rejected.
    #[must_use]
    pub fn is_full(&self) -> bool {
        !self.capacity.admits(self.ids.len())
    }

    /// Ids in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[ProductId] {
        &self.ids
    }

    /// Remove `id` if present, otherwise append it if capacity allows.
    pub fn toggle(&mut self, id: &ProductId) -> ToggleOutcome {
        if self.remove(id) {
            ToggleOutcome::Removed
        } else if self.capacity.admits(self.ids.len()) {
            self.ids.push(id.clone());
            ToggleOutcome::Added
        } else {
            ToggleOutcome::Rejected
        }
    }

    /// Remove `id`. Returns whether it was present.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        self.ids.len() != before
    }

    /// Remove every id, returning the ones that were present.
    pub fn clear(&mut self) -> Vec<ProductId> {
        std::mem::take(&mut self.ids)
    }
}

/// A typed sequence persisted under one storage key.
pub struct PersistedList<E> {
    storage: Arc<dyn Storage>,
    key: &'static str,
    _element: PhantomData<fn() -> E>,
}

impl<E> fmt::Debug for PersistedList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistedList")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl<E: Serialize + DeserializeOwned> PersistedList<E> {
    /// Bind a sequence type to the durable record of `kind` in `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, kind: ListKind) -> Self {
        Self {
            storage,
            key: kind.storage_key(),
            _element: PhantomData,
        }
    }

    /// Read the current contents; empty if missing or unreadable.
    #[must_use]
    pub fn load(&self) -> Vec<E> {
        storage::load_or_default(self.storage.as_ref(), self.key)
    }

    /// Replace the durable contents.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    pub fn commit(&self, items: &[E]) -> Result<(), StorageError> {
        storage::save(self.storage.as_ref(), self.key, items)?;
        tracing::debug!(key = self.key, len = items.len(), "Selection list committed");
        Ok(())
    }

    /// Delete the durable record; the next load reads as empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be removed.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(self.key)?;
        tracing::debug!(key = self.key, "Selection list cleared");
        Ok(())
    }
}
