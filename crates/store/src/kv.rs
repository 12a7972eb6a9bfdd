//! Key-value blob storage.
//!
//! Every piece of persisted state is a JSON blob stored under a string key.
//! [`FileStore`] keeps one file per key; [`MemoryStore`] keeps everything in
//! a map and backs tests.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.local/share/beiramar/storage/
//! ├── luxe_users.json
//! ├── luxe_user.json
//! ├── luxe_bookings.json
//! └── beiramar_lang.json
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::error::{Result, StoreError};

/// A string-keyed blob store.
pub trait KeyValueStore: fmt::Debug + Send + Sync {
    /// Returns the blob stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob exists but cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the blob stored under `key`; removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob exists but cannot be removed.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Reads and parses the JSON blob stored under `key`.
///
/// # Errors
///
/// Returns an error if the blob cannot be read or is not valid JSON for `T`.
pub fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    let Some(content) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| {
            warn!(key, error = %source, "failed to parse stored blob");
            StoreError::Json {
                key: key.to_string(),
                source,
            }
        })
}

/// Serializes `value` as JSON and stores it under `key`.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized or written.
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let content = serde_json::to_string(value).map_err(|source| StoreError::Json {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &content)
}

/// A store keeping each key in `<dir>/<key>.json`.
#[derive(Debug)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `base_path`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    #[instrument]
    pub fn open(base_path: PathBuf) -> Result<Self> {
        if !base_path.exists() {
            debug!(?base_path, "creating storage directory");
            fs::create_dir_all(&base_path).map_err(|source| StoreError::Io {
                key: String::new(),
                source,
            })?;
        }
        Ok(Self { base_path })
    }

    /// Returns the file path for a key, with path separators neutralized.
    fn key_path(&self, key: &str) -> PathBuf {
        let safe_key = key.replace(['/', '\\', '.'], "_");
        self.base_path.join(format!("{safe_key}.json"))
    }
}

fn io_error(key: &str, source: std::io::Error) -> StoreError {
    StoreError::Io {
        key: key.to_string(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                warn!(?path, error = %e, "failed to read stored blob");
                Err(io_error(key, e))
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        debug!(?path, bytes = value.len(), "writing stored blob");
        fs::write(&path, value).map_err(|e| io_error(key, e))
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key, e)),
        }
    }
}

/// An in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file_store() -> (FileStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = FileStore::open(temp.path().join("storage")).expect("open store");
        (store, temp)
    }

    #[test]
    fn open_creates_directory() {
        let (store, temp) = file_store();
        assert!(temp.path().join("storage").is_dir());
        assert!(store.get("anything").unwrap().is_none());
    }

    #[test]
    fn key_path_sanitizes_input() {
        let (store, _temp) = file_store();
        assert!(store.key_path("luxe_users").ends_with("luxe_users.json"));
        assert!(store.key_path("../evil").ends_with("___evil.json"));
    }

    #[test]
    fn file_store_set_get_remove() {
        let (store, _temp) = file_store();
        store.set("beiramar_lang", "\"en\"").unwrap();
        assert_eq!(store.get("beiramar_lang").unwrap().as_deref(), Some("\"en\""));

        store.remove("beiramar_lang").unwrap();
        assert!(store.get("beiramar_lang").unwrap().is_none());
        store.remove("beiramar_lang").unwrap();
    }

    #[test]
    fn memory_store_set_get_remove() {
        let store = MemoryStore::new();
        store.set("k", "v").unwrap();
        store.set("k", "w").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("w"));
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn json_helpers_roundtrip() {
        let store = MemoryStore::new();
        write_json(&store, "list", &vec![1, 2, 3]).unwrap();
        let list: Option<Vec<u32>> = read_json(&store, "list").unwrap();
        assert_eq!(list, Some(vec![1, 2, 3]));

        let missing: Option<Vec<u32>> = read_json(&store, "missing").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn read_json_reports_corrupt_blob() {
        let (store, _temp) = file_store();
        store.set("luxe_bookings", "not json").unwrap();
        let err = read_json::<Vec<u32>>(&store, "luxe_bookings").unwrap_err();
        assert!(matches!(err, StoreError::Json { ref key, .. } if key == "luxe_bookings"));
    }
}
