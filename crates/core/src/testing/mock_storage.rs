//! Storage backend that fails every write.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::persistence::{KeyValueStorage, StorageError};

/// A [`KeyValueStorage`] whose writes always fail with a fixed error.
///
/// Reads return an empty slot, or the same error when built with
/// [`FailingStorage::backend`].
#[derive(Debug)]
pub struct FailingStorage {
    error: StorageError,
    fail_reads: bool,
    attempts: AtomicUsize,
}

impl FailingStorage {
    /// Every write exceeds the quota.
    pub fn quota() -> Self {
        Self {
            error: StorageError::QuotaExceeded {
                needed: usize::MAX,
                limit: 0,
            },
            fail_reads: false,
            attempts: AtomicUsize::new(0),
        }
    }

    /// Every operation fails with a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self {
            error: StorageError::Backend(message.into()),
            fail_reads: true,
            attempts: AtomicUsize::new(0),
        }
    }

    /// Number of write attempts so far.
    pub fn write_attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl KeyValueStorage for FailingStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads {
            return Err(self.error.clone());
        }
        Ok(None)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}
