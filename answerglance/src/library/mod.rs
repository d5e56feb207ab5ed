//! Answer library data and the TTL cache over the shared store.
//!
//! The producing application owns the library content; this module owns the
//! single authoritative read path for it on the consumer side, bounding the
//! number of cross-process store reads with a time-to-live window.

mod cache;
mod payload;
mod types;

pub use cache::LibraryCache;
pub use payload::LibraryPayload;
pub use types::{CacheConfig, DataError};
