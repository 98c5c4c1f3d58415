//! Testing utilities: test doubles for the core's collaborator traits and
//! entry fixtures.
//!
//! # Example
//!
//! ```rust,ignore
//! use chartshelf_core::testing::{FailingStorage, RecordingNotifier};
//!
//! let notifier = Arc::new(RecordingNotifier::new());
//! let persistence = CatalogPersistence::new(Arc::new(FailingStorage::quota()))
//!     .with_notifier(notifier.clone());
//!
//! persistence.save(&[]).unwrap_err();
//! assert_eq!(notifier.notices().len(), 1);
//! ```

mod mock_notifier;
mod mock_storage;

pub use mock_notifier::RecordingNotifier;
pub use mock_storage::FailingStorage;

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::sync::Arc;

    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::catalog::{CatalogEntry, CatalogStore, FileStatus};
    use crate::persistence::{CatalogPersistence, MemoryStorage};

    /// Fixed creation time used by [`entry`].
    pub fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 18, 45, 0)
            .single()
            .unwrap_or_default()
    }

    /// An entry with a deterministic id and timestamps.
    ///
    /// `seq` offsets the timestamps by that many seconds and is used in the id.
    pub fn entry(seq: u32, name: &str, status: FileStatus) -> CatalogEntry {
        let created_at = base_time() + Duration::seconds(i64::from(seq));
        CatalogEntry {
            id: format!("{}-fixture{}", created_at.timestamp_millis(), seq),
            name: name.to_string(),
            status,
            created_at,
            modified_at: created_at,
        }
    }

    /// `count` untested entries named `song{n}.psarc`, starting at 1.
    pub fn numbered_entries(count: u32) -> Vec<CatalogEntry> {
        (1..=count)
            .map(|n| entry(n, &format!("song{}.psarc", n), FileStatus::Untested))
            .collect()
    }

    /// A store backed by a fresh in-memory slot.
    pub fn memory_store() -> (CatalogStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let store = CatalogStore::new(CatalogPersistence::new(storage.clone()));
        (store, storage)
    }
}
