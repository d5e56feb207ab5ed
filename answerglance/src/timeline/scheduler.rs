//! Timeline generation over the library cache.

use super::policy::SizeClass;
use crate::library::LibraryCache;
use crate::selection::{self, SelectedAnswer};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::sync::Arc;
use tracing::debug;

/// Timeline generation bounds.
#[derive(Debug, Clone)]
pub struct TimelineConfig {
    /// How far past `now` entries are generated (default: 3600 seconds)
    pub horizon_secs: i64,
    /// Hard cap on entries per plan (default: 720); the size-class intervals
    /// never reach it, it guards against degenerate configurations
    pub max_entries: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            horizon_secs: 3600,
            max_entries: 720,
        }
    }
}

/// One future display state: at `at`, show `text` attributed to
/// `library_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub at: DateTime<Utc>,
    pub text: String,
    pub library_name: String,
}

/// A generated timeline plus the instant the host becomes eligible to
/// request a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelinePlan {
    /// Strictly increasing in `at`; never empty
    pub entries: Vec<TimelineEntry>,
    /// The host should call [`TimelineScheduler::generate`] again after this
    /// instant rather than reuse the plan past its last entry
    pub next_eligible_refresh: DateTime<Utc>,
}

/// Produces bounded sequences of future timeline entries.
///
/// Generation fetches the payload once per call through the cache; entries
/// never trigger their own cross-process reads.
pub struct TimelineScheduler {
    cache: Arc<LibraryCache>,
    config: TimelineConfig,
}

impl TimelineScheduler {
    /// Create a scheduler with default bounds.
    pub fn new(cache: Arc<LibraryCache>) -> Self {
        Self::with_config(cache, TimelineConfig::default())
    }

    /// Create a scheduler with explicit bounds.
    pub fn with_config(cache: Arc<LibraryCache>, config: TimelineConfig) -> Self {
        Self { cache, config }
    }

    /// Generate the timeline starting at `now` for the given size class.
    ///
    /// Entries are spaced by the size class's refresh interval, starting at
    /// `now`, until the horizon or the entry cap is reached. When no valid
    /// payload exists every entry carries the selection fallback; the plan
    /// is never empty.
    pub fn generate(&self, size_class: SizeClass, now: DateTime<Utc>) -> TimelinePlan {
        let interval = size_class.refresh_interval();
        let step = ChronoDuration::seconds(interval.as_secs() as i64);
        let horizon = ChronoDuration::seconds(self.config.horizon_secs);
        let end = now + horizon;

        // One read-through for the whole plan.
        let payload = self.cache.library_data();

        let mut entries = Vec::new();
        let mut at = now;
        while at < end && entries.len() < self.config.max_entries {
            entries.push(entry_for(payload.as_ref(), at));
            at += step;
        }

        if entries.is_empty() {
            entries.push(entry_for(payload.as_ref(), now));
        }

        debug!(
            size_class = %size_class,
            entries = entries.len(),
            interval_secs = interval.as_secs(),
            "timeline generated"
        );

        TimelinePlan {
            entries,
            next_eligible_refresh: now + horizon,
        }
    }
}

fn entry_for(payload: Option<&crate::library::LibraryPayload>, at: DateTime<Utc>) -> TimelineEntry {
    let SelectedAnswer { text, library_name } =
        selection::select(payload, at, selection::TIMELINE_TICKS_PER_SEC);
    TimelineEntry {
        at,
        text,
        library_name,
    }
}
