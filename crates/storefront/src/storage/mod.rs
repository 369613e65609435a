//! Durable key/value storage for selection lists.
//!
//! Each selection list owns one key and stores its contents as a single
//! JSON document. Two backends are provided:
//!
//! - [`MemoryStorage`] - in-process map, for tests and throwaway sessions
//! - [`FileStorage`] - one file per key under a state directory
//!
//! # Fallback policy
//!
//! Reads go through [`load_or_default`]: a missing record, an unreadable
//! record, or a record that fails to parse all yield the type's empty
//! default. Corrupt local state is reset silently (logged at `warn`) and is
//! never surfaced to the user. [`try_load`] exposes the underlying failure
//! for callers that need to tell the cases apart.

mod file;
mod memory;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Durable record keys, one per selection list.
pub mod keys {
    /// Cart line items.
    pub const CART: &str = "hub_cart";

    /// Wishlist product ids.
    pub const WISHLIST: &str = "hub_wishlist";

    /// Compare product ids.
    pub const COMPARE: &str = "hub_compare";
}

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend I/O failed.
    #[error("I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Key cannot be mapped onto the backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Stored record could not be parsed.
    #[error("corrupt record for key {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Value could not be serialized.
    #[error("failed to serialize record for key {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw string key/value storage.
///
/// Implementations use interior mutability so one instance can be shared by
/// every selection list in a session.
pub trait Storage: Send + Sync {
    /// Read the raw record for `key`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the raw record for `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the record for `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Load and parse the record for `key`.
///
/// Returns `Ok(None)` when no record exists.
///
/// # Errors
///
/// Returns `StorageError::Corrupt` if the record does not parse as `T`, or
/// the backend's error if it cannot be read.
pub fn try_load<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = storage.read(key)? else {
        return Ok(None);
    };
    // `null` is what a cleared browser record parses to.
    if raw.trim() == "null" {
        return Ok(None);
    }
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Corrupt {
            key: key.to_string(),
            source,
        })
}

/// Load the record for `key`, falling back to `T::default()` on any failure.
pub fn load_or_default<T: DeserializeOwned + Default>(storage: &dyn Storage, key: &str) -> T {
    match try_load(storage, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding unreadable record");
            T::default()
        }
    }
}

/// Serialize `value` and write it under `key`.
///
/// # Errors
///
/// Returns `StorageError` if serialization or the backend write fails.
pub fn save<T: Serialize + ?Sized>(
    storage: &dyn Storage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
        key: key.to_string(),
        source,
    })?;
    storage.write(key, &raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_load_or_default_missing_key() {
        let storage = MemoryStorage::new();
        let value: Vec<String> = load_or_default(&storage, keys::WISHLIST);
        assert!(value.is_empty());
    }

    #[test]
    fn test_load_or_default_corrupt_record() {
        let storage = MemoryStorage::new();
        storage.write(keys::WISHLIST, "{not json").unwrap();

        let value: Vec<String> = load_or_default(&storage, keys::WISHLIST);
        assert!(value.is_empty());
    }

    #[test]
    fn test_load_or_default_wrong_shape() {
        let storage = MemoryStorage::new();
        storage.write(keys::COMPARE, r#"{"a": 1}"#).unwrap();

        let value: Vec<String> = load_or_default(&storage, keys::COMPARE);
        assert!(value.is_empty());
    }

    #[test]
    fn test_try_load_reports_corruption() {
        let storage = MemoryStorage::new();
        storage.write(keys::CART, "[1, 2,").unwrap();

        let result: Result<Option<Vec<u32>>, _> = try_load(&storage, keys::CART);
        assert!(matches!(result, Err(StorageError::Corrupt { .. })));
    }

    #[test]
    fn test_try_load_null_is_missing() {
        let storage = MemoryStorage::new();
        storage.write(keys::CART, "null").unwrap();

        let result: Option<Vec<u32>> = try_load(&storage, keys::CART).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let storage = MemoryStorage::new();
        let ids = vec!["c".to_string(), "a".to_string(), "b".to_string()];
        save(&storage, keys::WISHLIST, &ids).unwrap();

        let loaded: Vec<String> = load_or_default(&storage, keys::WISHLIST);
        assert_eq!(loaded, ids);
    }
}
