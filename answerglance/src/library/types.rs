//! Cache configuration and the library data error taxonomy.

use std::time::Duration;
use thiserror::Error;

/// Failures on the library data path.
///
/// Both variants are recoverable-by-sentinel: no public selection or
/// scheduling operation ever surfaces them to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DataError {
    /// No payload exists in the shared store (includes blobs that failed to
    /// deserialize)
    #[error("no library data found in the shared store")]
    DataNotFound,

    /// A payload exists but carries no answers
    #[error("library data has no answers")]
    InvalidData,
}

/// Library cache configuration.
///
/// Cross-process store reads are assumed orders of magnitude slower than a
/// local cache hit, and the payload changes only on explicit producer
/// action, so the default TTL trades a bounded staleness window for skipping
/// repeated deserialization on every selection.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum age of a cached payload before the store is re-read
    /// (default: 300 seconds)
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
        }
    }
}

impl CacheConfig {
    /// Set the cache TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}
