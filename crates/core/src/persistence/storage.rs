//! Key-value storage backends.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The write would push the backend past its byte quota.
    #[error("Storage quota exceeded: {needed} bytes needed, limit is {limit}")]
    QuotaExceeded { needed: usize, limit: usize },

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Trait for string key-value storage, modelled on browser local storage.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Size accounting shared by the backends: bytes of every key and value.
pub(crate) fn check_quota(
    quota: Option<usize>,
    current_total: usize,
    replaced: usize,
    key: &str,
    value: &str,
) -> Result<(), StorageError> {
    let Some(limit) = quota else {
        return Ok(());
    };
    let needed = current_total.saturating_sub(replaced) + key.len() + value.len();
    if needed > limit {
        return Err(StorageError::QuotaExceeded { needed, limit });
    }
    Ok(())
}

/// In-memory storage backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the total size of stored keys and values.
    pub fn with_quota(mut self, quota_bytes: usize) -> Self {
        self.quota_bytes = Some(quota_bytes);
        self
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);

        let total: usize = items.iter().map(|(k, v)| k.len() + v.len()).sum();
        let replaced = items.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
        check_quota(self.quota_bytes, total, replaced, key, value)?;

        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.remove(key);
        Ok(())
    }
}
