//! TTL cache mediating access to the shared store.

use super::payload::LibraryPayload;
use super::types::{CacheConfig, DataError};
use crate::refresh::RefreshClient;
use crate::store::{keys, SharedStore, StoreError};
use chrono::Utc;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Cached copy of the deserialized payload.
///
/// Invariant: `payload` present implies `fetched_at` present, and the
/// payload was read from the store no earlier than `fetched_at`. A failed
/// fetch clears both fields; absence is never cached.
#[derive(Debug, Default)]
struct CacheEntry {
    payload: Option<LibraryPayload>,
    fetched_at: Option<Instant>,
}

/// Single authoritative read path for the library payload.
///
/// Wraps a [`SharedStore`] with an in-process TTL cache of the deserialized
/// payload, so selections and timeline generation do not pay a
/// cross-process read on every call. Construct one instance per process and
/// pass it explicitly to every consumer; construction primes the cache from
/// whatever the store already holds.
///
/// All cache-entry access happens as an atomic unit behind one mutex: the
/// host may call into this from interleaving entry points (snapshot preview
/// vs. timeline refresh) and must never observe a payload paired with a
/// timestamp from a different update.
pub struct LibraryCache {
    store: Arc<dyn SharedStore>,
    config: CacheConfig,
    entry: Mutex<CacheEntry>,
    refresh: Option<RefreshClient>,
}

impl LibraryCache {
    /// Create a cache over `store`, priming it with any payload the store
    /// already holds.
    ///
    /// `refresh` is the fire-and-forget channel toward the rendering host;
    /// pass `None` when no host is listening.
    pub fn new(
        store: Arc<dyn SharedStore>,
        config: CacheConfig,
        refresh: Option<RefreshClient>,
    ) -> Self {
        let cache = Self {
            store,
            config,
            entry: Mutex::new(CacheEntry::default()),
            refresh,
        };

        {
            let mut entry = cache.entry.lock().unwrap();
            cache.fetch_into(&mut entry);
            debug!(
                primed = entry.payload.is_some(),
                current_library = %cache.current_library_id(),
                "library cache initialized"
            );
        }

        cache
    }

    /// Id of the library the producer last selected.
    ///
    /// Falls back to [`keys::DEFAULT_LIBRARY_ID`] when the key is absent or
    /// the store read fails; never fails.
    pub fn current_library_id(&self) -> String {
        match self.store.get(keys::CURRENT_ANSWER_LIBRARY) {
            Ok(Some(id)) => id,
            Ok(None) => keys::DEFAULT_LIBRARY_ID.to_string(),
            Err(err) => {
                warn!(%err, "failed to read current library id, using default");
                keys::DEFAULT_LIBRARY_ID.to_string()
            }
        }
    }

    /// The current library payload, from cache when fresh.
    ///
    /// Reads through to the store when the cached copy is older than the TTL
    /// or absent. A missing key, a store failure, or a blob that fails to
    /// deserialize all come back as `None`; none of them can fail the caller.
    pub fn library_data(&self) -> Option<LibraryPayload> {
        let mut entry = self.entry.lock().unwrap();

        if let (Some(payload), Some(fetched_at)) = (&entry.payload, entry.fetched_at) {
            if fetched_at.elapsed() < self.config.ttl {
                return Some(payload.clone());
            }
        }

        self.fetch_into(&mut entry);
        entry.payload.clone()
    }

    /// Like [`library_data`](Self::library_data), but classifies the failure.
    ///
    /// Absent (or undeserializable) data is [`DataError::DataNotFound`]; a
    /// payload with no answers is [`DataError::InvalidData`].
    pub fn library_data_checked(&self) -> Result<LibraryPayload, DataError> {
        let payload = self.library_data().ok_or(DataError::DataNotFound)?;
        if !payload.is_valid() {
            return Err(DataError::InvalidData);
        }
        Ok(payload)
    }

    /// Write `payload` to the store and through to the cache.
    ///
    /// Persists the serialized blob plus the update timestamp, replaces the
    /// cache entry, and fires the refresh signal.
    pub fn set_library_data(&self, payload: &LibraryPayload) -> Result<(), StoreError> {
        self.write_payload(payload)?;
        self.notify_refresh();
        Ok(())
    }

    /// Select `id` as the current library and fire the refresh signal.
    pub fn set_current_library(&self, id: &str) -> Result<(), StoreError> {
        self.store.set(keys::CURRENT_ANSWER_LIBRARY, id)?;
        info!(library = %id, "current library selected");
        self.notify_refresh();
        Ok(())
    }

    /// Write `payload` and select it as current in one call.
    ///
    /// This is the store effect of the producer's sync transport: blob,
    /// update timestamp, and current id land together, followed by a single
    /// refresh signal.
    pub fn sync_library(&self, payload: &LibraryPayload) -> Result<(), StoreError> {
        self.write_payload(payload)?;
        self.store.set(keys::CURRENT_ANSWER_LIBRARY, &payload.id)?;
        self.notify_refresh();
        Ok(())
    }

    /// Force a re-read from the store and fire the refresh signal.
    pub fn refresh_data(&self) {
        {
            let mut entry = self.entry.lock().unwrap();
            self.fetch_into(&mut entry);
        }
        self.notify_refresh();
    }

    /// Drop the cached payload without touching the store.
    pub fn clear_cache(&self) {
        let mut entry = self.entry.lock().unwrap();
        *entry = CacheEntry::default();
        debug!("library cache cleared");
    }

    /// True when the next read would go to the store.
    ///
    /// Lets callers skip redundant work without forcing a read.
    pub fn should_update(&self) -> bool {
        let entry = self.entry.lock().unwrap();
        match entry.fetched_at {
            Some(fetched_at) => fetched_at.elapsed() >= self.config.ttl,
            None => true,
        }
    }

    fn write_payload(&self, payload: &LibraryPayload) -> Result<(), StoreError> {
        let blob = serde_json::to_string(payload)?;
        self.store.set(keys::LIBRARY_DATA, &blob)?;
        self.store
            .set(keys::LAST_UPDATE_TIME, &Utc::now().to_rfc3339())?;

        let mut entry = self.entry.lock().unwrap();
        entry.payload = Some(payload.clone());
        entry.fetched_at = Some(Instant::now());
        drop(entry);

        info!(
            library = %payload.id,
            answers = payload.answers.len(),
            "library data written to shared store"
        );
        Ok(())
    }

    fn fetch_into(&self, entry: &mut CacheEntry) {
        match self.fetch_from_store() {
            Some(payload) => {
                self.check_id_consistency(&payload);
                entry.payload = Some(payload);
                entry.fetched_at = Some(Instant::now());
            }
            None => {
                entry.payload = None;
                entry.fetched_at = None;
            }
        }
    }

    fn fetch_from_store(&self) -> Option<LibraryPayload> {
        let blob = match self.store.get(keys::LIBRARY_DATA) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                debug!("no library data in shared store");
                return None;
            }
            Err(err) => {
                warn!(%err, "shared store read failed, treating as no data");
                return None;
            }
        };

        match serde_json::from_str::<LibraryPayload>(&blob) {
            Ok(payload) => {
                debug!(
                    library = %payload.name,
                    answers = payload.answers.len(),
                    "library data loaded from shared store"
                );
                Some(payload)
            }
            Err(err) => {
                warn!(%err, "library data blob failed to deserialize, treating as no data");
                None
            }
        }
    }

    // The mismatch is tolerated: the cache keeps serving the payload it has
    // until the producer writes a matching blob.
    fn check_id_consistency(&self, payload: &LibraryPayload) {
        let current = self.current_library_id();
        if payload.id != current {
            warn!(
                cached = %payload.id,
                selected = %current,
                "cached library does not match the selected library id"
            );
        }
    }

    fn notify_refresh(&self) {
        if let Some(client) = &self.refresh {
            client.reload_all_timelines();
        }
    }
}

impl std::fmt::Debug for LibraryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entry = self.entry.lock().unwrap();
        f.debug_struct("LibraryCache")
            .field("ttl", &self.config.ttl)
            .field("cached", &entry.payload.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refresh;
    use crate::store::MemoryStore;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Store wrapper counting reads per key, for TTL behavior tests.
    struct CountingStore {
        inner: MemoryStore,
        reads: Mutex<HashMap<String, usize>>,
    }

    impl CountingStore {
        fn new() -> Self {
            Self {
                inner: MemoryStore::new(),
                reads: Mutex::new(HashMap::new()),
            }
        }

        fn reads_of(&self, key: &str) -> usize {
            self.reads.lock().unwrap().get(key).copied().unwrap_or(0)
        }
    }

    impl SharedStore for CountingStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            *self.reads.lock().unwrap().entry(key.to_string()).or_insert(0) += 1;
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key)
        }
    }

    fn sample_payload() -> LibraryPayload {
        LibraryPayload::new(
            "lib1",
            "Lib One",
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
        )
    }

    fn cache_over(store: Arc<dyn SharedStore>) -> LibraryCache {
        LibraryCache::new(store, CacheConfig::default(), None)
    }

    #[test]
    fn test_current_library_id_default_when_absent() {
        let cache = cache_over(Arc::new(MemoryStore::new()));
        assert_eq!(cache.current_library_id(), keys::DEFAULT_LIBRARY_ID);
    }

    #[test]
    fn test_current_library_id_reads_store() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::CURRENT_ANSWER_LIBRARY, "lib1").unwrap();

        let cache = cache_over(store);
        assert_eq!(cache.current_library_id(), "lib1");
    }

    #[test]
    fn test_library_data_empty_store() {
        let cache = cache_over(Arc::new(MemoryStore::new()));
        assert_eq!(cache.library_data(), None);
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let cache = cache_over(Arc::new(MemoryStore::new()));
        let payload = sample_payload();

        cache.set_library_data(&payload).unwrap();
        assert_eq!(cache.library_data(), Some(payload));
    }

    #[test]
    fn test_set_library_data_persists_blob_and_timestamp() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache_over(Arc::clone(&store) as Arc<dyn SharedStore>);

        cache.set_library_data(&sample_payload()).unwrap();

        assert!(store.contains(keys::LIBRARY_DATA).unwrap());
        assert!(store.contains(keys::LAST_UPDATE_TIME).unwrap());
    }

    #[test]
    fn test_second_read_within_ttl_is_a_cache_hit() {
        let store = Arc::new(CountingStore::new());
        let cache = LibraryCache::new(
            Arc::clone(&store) as Arc<dyn SharedStore>,
            CacheConfig::default(),
            None,
        );

        cache.set_library_data(&sample_payload()).unwrap();
        let baseline = store.reads_of(keys::LIBRARY_DATA);

        cache.library_data();
        cache.library_data();

        // Write-through made the entry fresh; neither read touched the store.
        assert_eq!(store.reads_of(keys::LIBRARY_DATA), baseline);
    }

    #[test]
    fn test_read_through_happens_once_within_ttl() {
        let store = Arc::new(CountingStore::new());
        store
            .set(
                keys::LIBRARY_DATA,
                &serde_json::to_string(&sample_payload()).unwrap(),
            )
            .unwrap();

        let cache = LibraryCache::new(
            Arc::clone(&store) as Arc<dyn SharedStore>,
            CacheConfig::default(),
            None,
        );
        let after_priming = store.reads_of(keys::LIBRARY_DATA);

        assert!(cache.library_data().is_some());
        assert!(cache.library_data().is_some());

        assert_eq!(store.reads_of(keys::LIBRARY_DATA), after_priming);
    }

    #[test]
    fn test_expired_ttl_reads_store_again() {
        let store = Arc::new(CountingStore::new());
        store
            .set(
                keys::LIBRARY_DATA,
                &serde_json::to_string(&sample_payload()).unwrap(),
            )
            .unwrap();

        let cache = LibraryCache::new(
            Arc::clone(&store) as Arc<dyn SharedStore>,
            CacheConfig::default().with_ttl(Duration::ZERO),
            None,
        );
        let after_priming = store.reads_of(keys::LIBRARY_DATA);

        assert!(cache.library_data().is_some());
        assert!(store.reads_of(keys::LIBRARY_DATA) > after_priming);
    }

    #[test]
    fn test_malformed_blob_is_treated_as_absent() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::LIBRARY_DATA, "{ not json").unwrap();

        let cache = cache_over(store);
        assert_eq!(cache.library_data(), None);
    }

    #[test]
    fn test_library_data_checked_classifies_absent() {
        let cache = cache_over(Arc::new(MemoryStore::new()));
        assert_eq!(
            cache.library_data_checked(),
            Err(DataError::DataNotFound)
        );
    }

    #[test]
    fn test_library_data_checked_classifies_empty_answers() {
        let cache = cache_over(Arc::new(MemoryStore::new()));
        cache
            .set_library_data(&LibraryPayload::new("lib1", "Lib One", vec![]))
            .unwrap();

        assert_eq!(
            cache.library_data_checked(),
            Err(DataError::InvalidData)
        );
    }

    #[test]
    fn test_clear_cache_then_empty_store_reads_none() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache_over(Arc::clone(&store) as Arc<dyn SharedStore>);

        cache.set_library_data(&sample_payload()).unwrap();
        store.remove(keys::LIBRARY_DATA).unwrap();
        cache.clear_cache();

        assert_eq!(cache.library_data(), None);
    }

    #[test]
    fn test_clear_cache_leaves_store_untouched() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache_over(Arc::clone(&store) as Arc<dyn SharedStore>);

        cache.set_library_data(&sample_payload()).unwrap();
        cache.clear_cache();

        assert!(store.contains(keys::LIBRARY_DATA).unwrap());
        assert_eq!(cache.library_data(), Some(sample_payload()));
    }

    #[test]
    fn test_should_update_transitions() {
        let cache = cache_over(Arc::new(MemoryStore::new()));
        assert!(cache.should_update());

        cache.set_library_data(&sample_payload()).unwrap();
        assert!(!cache.should_update());

        cache.clear_cache();
        assert!(cache.should_update());
    }

    #[test]
    fn test_should_update_true_after_ttl_expiry() {
        let store: Arc<dyn SharedStore> = Arc::new(MemoryStore::new());
        let cache = LibraryCache::new(
            store,
            CacheConfig::default().with_ttl(Duration::ZERO),
            None,
        );

        cache.set_library_data(&sample_payload()).unwrap();
        assert!(cache.should_update());
    }

    #[test]
    fn test_id_mismatch_does_not_invalidate_cache() {
        let store = Arc::new(CountingStore::new());
        store
            .set(
                keys::LIBRARY_DATA,
                &serde_json::to_string(&sample_payload()).unwrap(),
            )
            .unwrap();
        store
            .set(keys::CURRENT_ANSWER_LIBRARY, "some_other_library")
            .unwrap();

        let cache = LibraryCache::new(
            Arc::clone(&store) as Arc<dyn SharedStore>,
            CacheConfig::default(),
            None,
        );
        let after_priming = store.reads_of(keys::LIBRARY_DATA);

        // Mismatch is only logged; the cached payload keeps serving.
        let payload = cache.library_data().unwrap();
        assert_eq!(payload.id, "lib1");
        assert_eq!(store.reads_of(keys::LIBRARY_DATA), after_priming);
    }

    #[test]
    fn test_refresh_fired_on_mutations() {
        let (client, mut rx) = refresh::channel();
        let cache = LibraryCache::new(
            Arc::new(MemoryStore::new()),
            CacheConfig::default(),
            Some(client),
        );

        cache.set_library_data(&sample_payload()).unwrap();
        assert!(rx.try_recv().is_ok());

        cache.set_current_library("lib1").unwrap();
        assert!(rx.try_recv().is_ok());

        cache.refresh_data();
        assert!(rx.try_recv().is_ok());

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_sync_library_writes_everything_and_fires_once() {
        let store = Arc::new(MemoryStore::new());
        let (client, mut rx) = refresh::channel();
        let cache = LibraryCache::new(
            Arc::clone(&store) as Arc<dyn SharedStore>,
            CacheConfig::default(),
            Some(client),
        );

        cache.sync_library(&sample_payload()).unwrap();

        assert!(store.contains(keys::LIBRARY_DATA).unwrap());
        assert!(store.contains(keys::LAST_UPDATE_TIME).unwrap());
        assert_eq!(cache.current_library_id(), "lib1");

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_mutations_succeed_without_a_listener() {
        let (client, rx) = refresh::channel();
        drop(rx);

        let cache = LibraryCache::new(
            Arc::new(MemoryStore::new()),
            CacheConfig::default(),
            Some(client),
        );

        cache.set_library_data(&sample_payload()).unwrap();
        cache.refresh_data();
    }

    #[test]
    fn test_construction_primes_from_store() {
        let store = Arc::new(CountingStore::new());
        store
            .set(
                keys::LIBRARY_DATA,
                &serde_json::to_string(&sample_payload()).unwrap(),
            )
            .unwrap();

        let cache = LibraryCache::new(
            Arc::clone(&store) as Arc<dyn SharedStore>,
            CacheConfig::default(),
            None,
        );

        assert_eq!(store.reads_of(keys::LIBRARY_DATA), 1);
        assert!(!cache.should_update());
    }
}
