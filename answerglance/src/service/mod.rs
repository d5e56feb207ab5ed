//! Service facade wiring the engine together.
//!
//! [`AnswerService`] is the surface both external collaborators call: the
//! rendering layer reads snapshots and timelines from it, the producing
//! application pushes libraries through it. It owns one explicitly
//! constructed cache, scheduler, and monitor per process; nothing in this
//! crate is a global.

use crate::library::{CacheConfig, DataError, LibraryCache, LibraryPayload};
use crate::perf::{ops, OperationStats, PerformanceMonitor};
use crate::refresh::{self, RefreshEvent, RefreshReceiver};
use crate::selection::{self, SelectedAnswer};
use crate::store::{SharedStore, StoreError};
use crate::timeline::{SizeClass, TimelineConfig, TimelinePlan, TimelineScheduler};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Service-level configuration.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Library cache configuration
    pub cache: CacheConfig,
    /// Timeline generation configuration
    pub timeline: TimelineConfig,
}

impl ServiceConfig {
    /// Derive a service configuration from loaded settings.
    pub fn from_settings(settings: &crate::config::Settings) -> Self {
        Self {
            cache: settings.cache_config(),
            timeline: settings.timeline_config(),
        }
    }
}

/// The assembled engine: cache, scheduler, selector, and monitor over one
/// shared store.
///
/// Construction returns the refresh event receiver alongside the service;
/// the rendering host listens on it for "reload all timelines" signals.
/// Drop the receiver if nothing renders in this process - mutations still
/// succeed.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use answerglance::library::LibraryPayload;
/// use answerglance::service::AnswerService;
/// use answerglance::store::MemoryStore;
/// use answerglance::timeline::SizeClass;
///
/// let (service, mut refresh_events) = AnswerService::new(Arc::new(MemoryStore::new()));
///
/// let payload = LibraryPayload::new("lib1", "Lib One", vec!["yes".into(), "no".into()]);
/// service.sync_library(&payload).unwrap();
/// assert!(refresh_events.try_recv().is_ok());
///
/// let answer = service.snapshot_answer();
/// assert!(payload.answers.contains(&answer.text));
///
/// let plan = service.timeline(SizeClass::Medium);
/// assert!(!plan.entries.is_empty());
/// ```
pub struct AnswerService {
    cache: Arc<LibraryCache>,
    scheduler: TimelineScheduler,
    monitor: PerformanceMonitor,
}

impl AnswerService {
    /// Create a service with default configuration over `store`.
    pub fn new(store: Arc<dyn SharedStore>) -> (Self, RefreshReceiver) {
        Self::with_config(store, ServiceConfig::default())
    }

    /// Create a service with explicit configuration over `store`.
    pub fn with_config(
        store: Arc<dyn SharedStore>,
        config: ServiceConfig,
    ) -> (Self, RefreshReceiver) {
        let (client, rx) = refresh::channel();
        let cache = Arc::new(LibraryCache::new(store, config.cache, Some(client)));
        let scheduler = TimelineScheduler::with_config(Arc::clone(&cache), config.timeline);

        info!("answer service initialized");

        (
            Self {
                cache,
                scheduler,
                monitor: PerformanceMonitor::new(),
            },
            rx,
        )
    }

    // =========================================================================
    // Rendering-layer read contract
    // =========================================================================

    /// The answer to display right now.
    pub fn snapshot_answer(&self) -> SelectedAnswer {
        self.snapshot_answer_at(Utc::now())
    }

    /// The answer for a specific instant.
    ///
    /// Snapshot reads select at [`selection::SNAPSHOT_TICKS_PER_SEC`], so
    /// consecutive previews differ per millisecond of `at`.
    pub fn snapshot_answer_at(&self, at: DateTime<Utc>) -> SelectedAnswer {
        self.monitor.start(ops::GET_LIBRARY_DATA);
        let payload = self.cache.library_data();
        self.monitor.stop(ops::GET_LIBRARY_DATA);

        self.monitor.start(ops::SELECT_ANSWER);
        let answer = selection::select(payload.as_ref(), at, selection::SNAPSHOT_TICKS_PER_SEC);
        self.monitor.stop(ops::SELECT_ANSWER);

        answer
    }

    /// Generate a timeline starting now for the given size class.
    pub fn timeline(&self, size_class: SizeClass) -> TimelinePlan {
        self.timeline_at(size_class, Utc::now())
    }

    /// Generate a timeline starting at an explicit instant.
    pub fn timeline_at(&self, size_class: SizeClass, now: DateTime<Utc>) -> TimelinePlan {
        self.scheduler.generate(size_class, now)
    }

    // =========================================================================
    // Producer write contract
    // =========================================================================

    /// Push a library: payload blob, update timestamp, and current id land
    /// in the store together, followed by one refresh signal.
    pub fn sync_library(&self, payload: &LibraryPayload) -> Result<(), StoreError> {
        self.cache.sync_library(payload)
    }

    /// Write the payload without changing the current library selection.
    pub fn set_library_data(&self, payload: &LibraryPayload) -> Result<(), StoreError> {
        self.cache.set_library_data(payload)
    }

    /// Select `id` as the current library.
    pub fn set_current_library(&self, id: &str) -> Result<(), StoreError> {
        self.cache.set_current_library(id)
    }

    /// Force a re-read from the store and fire the refresh signal.
    pub fn refresh_data(&self) {
        self.cache.refresh_data();
    }

    // =========================================================================
    // Cache inspection
    // =========================================================================

    /// Id of the library the producer last selected.
    pub fn current_library_id(&self) -> String {
        self.cache.current_library_id()
    }

    /// The current payload, if any.
    pub fn library_data(&self) -> Option<LibraryPayload> {
        self.cache.library_data()
    }

    /// The current payload, or why there is none.
    pub fn library_data_checked(&self) -> Result<LibraryPayload, DataError> {
        self.cache.library_data_checked()
    }

    /// Drop the cached payload without touching the store.
    pub fn clear_cache(&self) {
        self.cache.clear_cache();
    }

    /// True when the next read would go to the store.
    pub fn should_update(&self) -> bool {
        self.cache.should_update()
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Aggregate duration statistics per instrumented operation.
    pub fn performance_report(&self) -> HashMap<String, OperationStats> {
        self.monitor.report()
    }

    /// Human-readable performance report.
    pub fn format_performance_report(&self) -> String {
        self.monitor.format_report()
    }

    /// True when every instrumented operation averages within budget.
    pub fn check_performance(&self) -> bool {
        self.monitor.check_thresholds()
    }

    /// Discard recorded performance samples.
    pub fn reset_performance_metrics(&self) {
        self.monitor.reset();
    }
}
