//! The key-value storage that transaction lists are persisted to.
//!
//! `FileStore` keeps one JSON document per key inside a directory. `MemoryStore` keeps everything
//! in a map and is used for tests and throwaway sessions.

use crate::{fs, Result};
use anyhow::ensure;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::trace;

/// A minimal string key-value store. Implementations must make `set` and `remove` durable before
/// returning.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if there is none.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a key that does not exist is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens the store rooted at `dir`, creating the directory if it does not exist.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The file that holds `key`.
    pub fn path(&self, key: &str) -> Result<PathBuf> {
        ensure!(
            !key.is_empty()
                && key
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "Invalid storage key '{key}': only letters, digits, '-' and '_' are allowed"
        );
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key)?;
        trace!("get {key} from {}", path.display());
        fs::read_optional(path)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path(key)?;
        trace!("set {key} in {} ({} bytes)", path.display(), value.len());
        fs::write_all(path, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path(key)?;
        trace!("remove {key} at {}", path.display());
        fs::remove_file(path)
    }
}

/// An in-memory store. Nothing survives the process.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _ = self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let _ = self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::open(dir.path().join("store")).unwrap();
        assert!(store.get("expenses").unwrap().is_none());

        store.set("expenses", "[1,2,3]").unwrap();
        assert_eq!(store.get("expenses").unwrap().as_deref(), Some("[1,2,3]"));
        assert!(dir.path().join("store").join("expenses.json").is_file());

        store.remove("expenses").unwrap();
        assert!(store.get("expenses").unwrap().is_none());
        // Removing twice is fine.
        store.remove("expenses").unwrap();
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("").is_err());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        store.set("k", "v").unwrap();
        assert!(store.contains_key("k"));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert!(!store.contains_key("k"));
    }
}
