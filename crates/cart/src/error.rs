//! Storage and snapshot error types.

use lit_candle_core::ProductId;
use thiserror::Error;

/// Errors returned by a [`PersistentStore`](crate::PersistentStore).
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage is disabled or cannot be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The value is larger than the store accepts.
    #[error("storage quota exceeded: {size} bytes, limit is {quota} bytes")]
    QuotaExceeded {
        /// Size of the rejected value.
        size: usize,
        /// Configured limit.
        quota: usize,
    },

    /// The key cannot be stored by this backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Underlying filesystem error.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors decoding or encoding a cart snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The bytes are not a JSON array of line items.
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The same product appears in more than one record.
    #[error("duplicate product {0} in snapshot")]
    DuplicateProduct(ProductId),
}
