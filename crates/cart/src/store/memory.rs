//! In-process store.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::{PersistentStore, check_quota, validate_key};
use crate::error::StorageError;

/// A map-backed store.
///
/// Clones share the same backing map, the way two tabs of one origin share
/// browser storage. Availability can be toggled off to exercise the
/// fail-soft paths of the ledger.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    values: RefCell<HashMap<String, Vec<u8>>>,
    quota: Option<usize>,
    unavailable: Cell<bool>,
}

impl MemoryStore {
    /// Create an empty store with no quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects values larger than `quota` bytes.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            inner: Rc::new(Inner {
                quota: Some(quota),
                ..Inner::default()
            }),
        }
    }

    /// Enable or disable the store. While disabled every call fails with
    /// [`StorageError::Unavailable`].
    pub fn set_available(&self, available: bool) {
        self.inner.unavailable.set(!available);
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.values.borrow().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_available(&self) -> Result<(), StorageError> {
        if self.inner.unavailable.get() {
            return Err(StorageError::Unavailable("storage is disabled".to_owned()));
        }
        Ok(())
    }
}

impl PersistentStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        self.ensure_available()?;
        validate_key(key)?;
        Ok(self.inner.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.ensure_available()?;
        validate_key(key)?;
        check_quota(self.inner.quota, value)?;
        self.inner
            .values
            .borrow_mut()
            .insert(key.to_owned(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.ensure_available()?;
        validate_key(key)?;
        self.inner.values.borrow_mut().remove(key);
        Ok(())
    }
}
