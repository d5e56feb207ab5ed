//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file. These are
//! pure data types; parsing lives in the sibling parser module.

use crate::library::CacheConfig;
use crate::timeline::TimelineConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Complete application configuration.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Shared store settings
    pub store: StoreSettings,
    /// Library cache settings
    pub cache: CacheSettings,
    /// Timeline generation settings
    pub timeline: TimelineSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Shared store configuration.
#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// Directory holding the store document
    /// (default: the per-user data directory under `answerglance`)
    pub directory: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        let directory = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("answerglance");
        Self { directory }
    }
}

/// Library cache configuration.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Payload TTL in seconds (default: 300)
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { ttl_secs: 300 }
    }
}

/// Timeline generation configuration.
#[derive(Debug, Clone)]
pub struct TimelineSettings {
    /// Generation horizon in seconds (default: 3600)
    pub horizon_secs: i64,
    /// Entry cap per generated plan (default: 720)
    pub max_entries: usize,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        let defaults = TimelineConfig::default();
        Self {
            horizon_secs: defaults.horizon_secs,
            max_entries: defaults.max_entries,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingSettings {
    /// Directory for log files (default: `logs`)
    pub directory: PathBuf,
    /// Log file name (default: `answerglance.log`)
    pub file: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            file: "answerglance.log".to_string(),
        }
    }
}

impl Settings {
    /// Path of the shared store document.
    pub fn store_path(&self) -> PathBuf {
        self.store.directory.join("store.json")
    }

    /// Library cache configuration derived from these settings.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::default().with_ttl(Duration::from_secs(self.cache.ttl_secs))
    }

    /// Timeline configuration derived from these settings.
    pub fn timeline_config(&self) -> TimelineConfig {
        TimelineConfig {
            horizon_secs: self.timeline.horizon_secs,
            max_entries: self.timeline.max_entries,
        }
    }
}
