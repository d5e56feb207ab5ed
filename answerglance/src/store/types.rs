//! Error type for the store seam.

use thiserror::Error;

/// Errors raised by [`SharedStore`](super::SharedStore) implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error reading or writing the store medium
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Store document or value failed to serialize/deserialize
    #[error("store document error: {0}")]
    Document(#[from] serde_json::Error),
}
