//! File-backed storage: one `<key>.json` document per key.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{Storage, StorageError};

/// Storage rooted at a state directory.
///
/// The directory is created on first write. Writes go to a temporary
/// sibling file which is then renamed over the record, so a reader never
/// observes a half-written document.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a store rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the record for `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidKey` for keys that are empty, start
    /// with `.`, or contain characters outside `[A-Za-z0-9_.-]`.
    pub fn record_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }

    fn io_error(key: &str, source: std::io::Error) -> StorageError {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.record_path(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.record_path(key)?;
        fs::create_dir_all(&self.root).map_err(|e| Self::io_error(key, e))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| Self::io_error(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| Self::io_error(key, e))?;

        tracing::trace!(key, path = %path.display(), "Record written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.record_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }
}
