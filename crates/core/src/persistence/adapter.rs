//! Saves and loads the catalog as a JSON blob in a single storage slot.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::storage::{KeyValueStorage, StorageError};
use crate::catalog::{CatalogEntry, FileStatus};
use crate::notify::{Notifier, NullNotifier, Severity};

/// Default slot name.
pub const DEFAULT_STORAGE_KEY: &str = "rocksmith-file-manager-data";

/// Warning shown to the user when the slot is full.
pub const QUOTA_WARNING: &str = "Storage quota exceeded. Please remove some files.";

/// Errors surfaced by [`CatalogPersistence::save`] and [`CatalogPersistence::clear`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("Storage quota exceeded")]
    QuotaExceeded,

    #[error("Failed to persist catalog: {0}")]
    Storage(String),

    #[error("Failed to serialize catalog: {0}")]
    Serialization(String),
}

impl From<StorageError> for PersistenceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::QuotaExceeded { .. } => PersistenceError::QuotaExceeded,
            StorageError::Backend(msg) => PersistenceError::Storage(msg),
        }
    }
}

/// Wire form of an entry: timestamps as ISO-8601 text.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedEntry {
    id: String,
    file_name: String,
    status: FileStatus,
    date_added: String,
    #[serde(default)]
    last_modified: Option<String>,
}

impl From<&CatalogEntry> for PersistedEntry {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            id: entry.id.clone(),
            file_name: entry.name.clone(),
            status: entry.status,
            date_added: format_timestamp(&entry.created_at),
            last_modified: Some(format_timestamp(&entry.modified_at)),
        }
    }
}

impl TryFrom<PersistedEntry> for CatalogEntry {
    type Error = chrono::ParseError;

    fn try_from(persisted: PersistedEntry) -> Result<Self, Self::Error> {
        let created_at = parse_timestamp(&persisted.date_added)?;
        let modified_at = match persisted.last_modified {
            Some(ref text) => parse_timestamp(text)?.max(created_at),
            None => created_at,
        };

        Ok(CatalogEntry {
            id: persisted.id,
            name: persisted.file_name,
            status: persisted.status,
            created_at,
            modified_at,
        })
    }
}

/// `2024-05-01T12:30:00.125Z`
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(text).map(|dt| dt.with_timezone(&Utc))
}

/// Mirrors the catalog into one key of a [`KeyValueStorage`].
#[derive(Clone)]
pub struct CatalogPersistence {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    notifier: Arc<dyn Notifier>,
}

impl CatalogPersistence {
    /// Persist under [`DEFAULT_STORAGE_KEY`] without user notifications.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            key: DEFAULT_STORAGE_KEY.to_string(),
            notifier: Arc::new(NullNotifier),
        }
    }

    /// Use a different slot name.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Route user-facing warnings to `notifier`.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Write the full entry list to the slot.
    pub fn save(&self, entries: &[CatalogEntry]) -> Result<(), PersistenceError> {
        let persisted: Vec<PersistedEntry> = entries.iter().map(PersistedEntry::from).collect();
        let json = serde_json::to_string(&persisted).map_err(|e| {
            error!("Failed to serialize catalog: {}", e);
            PersistenceError::Serialization(e.to_string())
        })?;

        match self.storage.set_item(&self.key, &json) {
            Ok(()) => {
                debug!(entries = entries.len(), bytes = json.len(), "Catalog saved");
                Ok(())
            }
            Err(e @ StorageError::QuotaExceeded { .. }) => {
                warn!("Failed to save catalog: {}", e);
                self.notifier.notify(QUOTA_WARNING, Severity::Error);
                Err(e.into())
            }
            Err(e) => {
                error!("Failed to save catalog: {}", e);
                Err(e.into())
            }
        }
    }

    /// Read the slot. Missing or unreadable data yields an empty list.
    pub fn load(&self) -> Vec<CatalogEntry> {
        let json = match self.storage.get_item(&self.key) {
            Ok(Some(json)) => json,
            Ok(None) => return Vec::new(),
            Err(e) => {
                error!("Failed to read catalog from storage: {}", e);
                return Vec::new();
            }
        };

        match Self::decode(&json) {
            Ok(entries) => {
                info!("Loaded {} catalog entries", entries.len());
                entries
            }
            Err(reason) => {
                warn!(key = %self.key, "Ignoring corrupt catalog data: {}", reason);
                Vec::new()
            }
        }
    }

    fn decode(json: &str) -> Result<Vec<CatalogEntry>, String> {
        let persisted: Vec<PersistedEntry> =
            serde_json::from_str(json).map_err(|e| e.to_string())?;

        persisted
            .into_iter()
            .map(|p| {
                let id = p.id.clone();
                CatalogEntry::try_from(p).map_err(|e| format!("entry {}: {}", id, e))
            })
            .collect()
    }

    /// Delete the slot.
    pub fn clear(&self) -> Result<(), PersistenceError> {
        self.storage.remove_item(&self.key).map_err(|e| {
            error!("Failed to clear catalog storage: {}", e);
            PersistenceError::from(e)
        })
    }
}
