//! Store trait definition for dependency injection.

use super::types::StoreError;

/// Cross-process key/value store abstraction.
///
/// Enables different storage media (file-backed, in-memory) to be used
/// interchangeably. Keys are plain strings; values are plain strings, with
/// anything structured serialized by the caller before it crosses the seam.
///
/// Reads and writes are assumed fast and synchronous; implementations must
/// not block on anything slower than local I/O.
///
/// # Example
///
/// ```
/// use answerglance::store::{MemoryStore, SharedStore};
///
/// fn remember(store: &dyn SharedStore) {
///     store.set("greeting", "hello").unwrap();
///     assert_eq!(store.get("greeting").unwrap().as_deref(), Some("hello"));
/// }
///
/// remember(&MemoryStore::new());
/// ```
pub trait SharedStore: Send + Sync {
    /// Read the value for `key`.
    ///
    /// Returns `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key` if present.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Check whether `key` currently has a value.
    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }
}
