//! Durable key/value storage for cart snapshots.
//!
//! A [`PersistentStore`] knows nothing about carts: it maps string keys to
//! opaque byte values and may fail on any call. The ledger decides what a
//! failure means.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StorageError;

/// Browser storage allows roughly 5 MiB per origin.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Byte-string storage that survives process restarts.
///
/// Methods take `&self`; backends that mutate in-process state use interior
/// mutability so that one store can be shared the way browser tabs share
/// storage.
pub trait PersistentStore {
    /// Read the value stored under `key`, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the write is rejected or fails.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: PersistentStore + ?Sized> PersistentStore for &T {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<T: PersistentStore + ?Sized> PersistentStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Check that `key` is usable by every backend.
///
/// Keys double as file names for [`FileStore`], so they are limited to
/// ASCII letters, digits, `.`, `_` and `-`, must be non-empty and must not
/// start with a dot.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] for any other key.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');

    if key.is_empty() || key.starts_with('.') || !key.chars().all(allowed) {
        return Err(StorageError::InvalidKey(key.to_owned()));
    }
    Ok(())
}

/// Reject values larger than `quota`, if one is set.
fn check_quota(quota: Option<usize>, value: &[u8]) -> Result<(), StorageError> {
    match quota {
        Some(quota) if value.len() > quota => Err(StorageError::QuotaExceeded {
            size: value.len(),
            quota,
        }),
        _ => Ok(()),
    }
}
