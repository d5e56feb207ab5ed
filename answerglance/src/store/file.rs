//! File-backed store shared between processes.

use super::r#trait::SharedStore;
use super::types::StoreError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// [`SharedStore`] persisted as a single JSON document on disk.
///
/// This is the cross-process medium: every `get` re-reads the document so a
/// write from another process is visible immediately, and every `set`
/// rewrites it atomically (temp file + rename) so a reader never observes a
/// half-written document. Callers that want to avoid the per-read I/O cost
/// layer a cache on top (see [`LibraryCache`](crate::library::LibraryCache)).
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process. Cross-process
    // writers are only protected by the atomic rename.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Create a store persisted at `path`.
    ///
    /// The file and its parent directory are created lazily on first write;
    /// reading a store that was never written behaves as empty.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    // A corrupt document is replaced rather than propagated: the store is a
    // cache medium, not a system of record.
    fn load_for_write(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match self.load() {
            Ok(entries) => Ok(entries),
            Err(StoreError::Document(err)) => {
                warn!(path = %self.path.display(), %err, "store document corrupt, starting fresh");
                Ok(BTreeMap::new())
            }
            Err(err) => Err(err),
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SharedStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap();
        let mut entries = self.load_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap();
        let mut entries = self.load_for_write()?;
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}
