//! In-memory record store with auto-save.

use tracing::{debug, info, warn};

use super::{CatalogEntry, CatalogError, FileStatus, ImportReport, StatusCounts};
use crate::filter::EntryFilter;
use crate::persistence::{CatalogPersistence, PersistenceError};

/// Owns the canonical list of catalog entries.
///
/// Every mutation except [`CatalogStore::replace_all`] saves the full list
/// through the attached [`CatalogPersistence`]. A failed save is logged and
/// remembered in [`CatalogStore::last_save_error`]; the in-memory change is
/// kept either way.
pub struct CatalogStore {
    entries: Vec<CatalogEntry>,
    persistence: CatalogPersistence,
    last_save_error: Option<PersistenceError>,
}

impl CatalogStore {
    /// Create an empty store.
    pub fn new(persistence: CatalogPersistence) -> Self {
        Self {
            entries: Vec::new(),
            persistence,
            last_save_error: None,
        }
    }

    /// Create a store initialized from whatever the persistence slot holds.
    pub fn open(persistence: CatalogPersistence) -> Self {
        let mut store = Self::new(persistence);
        let entries = store.persistence.load();
        store.replace_all(entries);
        store
    }

    /// Add a new `untested` entry.
    ///
    /// The name is used verbatim; callers trim user input first.
    pub fn insert(&mut self, name: &str) -> Result<CatalogEntry, CatalogError> {
        let entry = self.push_new(name)?;
        self.save();
        Ok(entry)
    }

    fn push_new(&mut self, name: &str) -> Result<CatalogEntry, CatalogError> {
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if self.contains_name(name) {
            return Err(CatalogError::DuplicateName(name.to_string()));
        }

        let entry = CatalogEntry::new(name);
        debug!(id = %entry.id, name = %entry.name, "Catalog entry added");
        self.entries.push(entry.clone());
        Ok(entry)
    }

    /// Insert several names, saving once at the end.
    ///
    /// Names already in the store, or repeated within `names`, are reported
    /// in [`ImportReport::duplicates`]. Empty names are skipped.
    pub fn import<I, S>(&mut self, names: I) -> ImportReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = ImportReport::default();

        for name in names {
            match self.push_new(name.as_ref()) {
                Ok(entry) => report.added.push(entry),
                Err(CatalogError::DuplicateName(name)) => report.duplicates.push(name),
                Err(_) => {}
            }
        }

        if !report.added.is_empty() {
            self.save();
        }
        info!(
            added = report.added.len(),
            duplicates = report.duplicates.len(),
            "Bulk import finished"
        );
        report
    }

    /// Copy of all entries in insertion order.
    pub fn list(&self) -> Vec<CatalogEntry> {
        self.entries.clone()
    }

    /// Read-only view of all entries.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn get_by_id(&self, id: &str) -> Result<CatalogEntry, CatalogError> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Change an entry's status and bump its modification time.
    pub fn set_status(
        &mut self,
        id: &str,
        status: FileStatus,
    ) -> Result<CatalogEntry, CatalogError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        entry.set_status(status);
        let updated = entry.clone();
        debug!(id = %updated.id, status = %status, "Catalog entry status changed");

        self.save();
        Ok(updated)
    }

    /// Delete an entry, returning it.
    pub fn remove(&mut self, id: &str) -> Result<CatalogEntry, CatalogError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        let removed = self.entries.remove(index);
        debug!(id = %removed.id, name = %removed.name, "Catalog entry removed");

        self.save();
        Ok(removed)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        info!("Cleared {} catalog entries", count);
        self.save();
    }

    /// Replace the contents without duplicate checks or saving.
    pub fn replace_all(&mut self, entries: impl IntoIterator<Item = CatalogEntry>) {
        self.entries = entries.into_iter().collect();
    }

    /// Entries matching `filter`, in store order.
    pub fn filter(&self, filter: &EntryFilter) -> Vec<CatalogEntry> {
        filter.apply(&self.entries)
    }

    /// Per-status totals.
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for entry in &self.entries {
            counts.record(entry.status);
        }
        counts
    }

    /// Error from the most recent save, if it failed.
    pub fn last_save_error(&self) -> Option<&PersistenceError> {
        self.last_save_error.as_ref()
    }

    fn save(&mut self) {
        match self.persistence.save(&self.entries) {
            Ok(()) => self.last_save_error = None,
            Err(e) => {
                warn!("Auto-save failed, keeping in-memory changes: {}", e);
                self.last_save_error = Some(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::filter::StatusFilter;
    use crate::persistence::{KeyValueStorage, MemoryStorage, DEFAULT_STORAGE_KEY};
    use crate::testing::fixtures::{self, memory_store as create_test_store};
    use crate::testing::FailingStorage;

    fn saved_names(storage: &MemoryStorage) -> Vec<String> {
        let json = storage.get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        let value: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        value
            .iter()
            .map(|v| v["fileName"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_insert_then_duplicate() {
        let (mut store, _) = create_test_store();

        let entry = store.insert("song1.psarc").unwrap();
        assert_eq!(entry.status, FileStatus::Untested);
        assert_eq!(store.len(), 1);

        let result = store.insert("song1.psarc");
        assert_eq!(
            result,
            Err(CatalogError::DuplicateName("song1.psarc".to_string()))
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_insert_is_case_sensitive() {
        let (mut store, _) = create_test_store();
        store.insert("Song.psarc").unwrap();
        store.insert("song.psarc").unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_insert_does_not_trim() {
        let (mut store, _) = create_test_store();
        store.insert("song.psarc").unwrap();
        let entry = store.insert(" song.psarc ").unwrap();
        assert_eq!(entry.name, " song.psarc ");
    }

    #[test]
    fn test_insert_empty_name_rejected() {
        let (mut store, storage) = create_test_store();
        assert_eq!(store.insert(""), Err(CatalogError::EmptyName));
        assert!(store.is_empty());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_insert_auto_saves() {
        let (mut store, storage) = create_test_store();
        store.insert("a.psarc").unwrap();
        store.insert("b.psarc").unwrap();
        assert_eq!(saved_names(&storage), vec!["a.psarc", "b.psarc"]);
    }

    #[test]
    fn test_list_is_independent_copy() {
        let (mut store, _) = create_test_store();
        store.insert("a.psarc").unwrap();

        let mut listed = store.list();
        listed[0].status = FileStatus::Bad;
        listed.clear();

        assert_eq!(store.len(), 1);
        assert_eq!(store.entries()[0].status, FileStatus::Untested);
    }

    #[test]
    fn test_get_by_id() {
        let (mut store, _) = create_test_store();
        let entry = store.insert("a.psarc").unwrap();

        assert_eq!(store.get_by_id(&entry.id).unwrap(), entry);
        assert_eq!(
            store.get_by_id("missing"),
            Err(CatalogError::NotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_set_status() {
        let (mut store, storage) = create_test_store();
        let entry = store.insert("a.psarc").unwrap();

        let updated = store.set_status(&entry.id, FileStatus::Good).unwrap();

        assert_eq!(updated.status, FileStatus::Good);
        assert!(updated.modified_at >= updated.created_at);
        assert_eq!(updated.created_at, entry.created_at);
        assert_eq!(store.get_by_id(&entry.id).unwrap(), updated);

        let reloaded = CatalogPersistence::new(storage).load();
        assert_eq!(reloaded[0], updated);
    }

    #[test]
    fn test_set_status_missing_id() {
        let (mut store, _) = create_test_store();
        let result = store.set_status("missing", FileStatus::Bad);
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_remove() {
        let (mut store, storage) = create_test_store();
        let a = store.insert("a.psarc").unwrap();
        store.insert("b.psarc").unwrap();

        let removed = store.remove(&a.id).unwrap();
        assert_eq!(removed.name, "a.psarc");
        assert_eq!(store.len(), 1);
        assert_eq!(saved_names(&storage), vec!["b.psarc"]);

        assert!(matches!(store.remove(&a.id), Err(CatalogError::NotFound(_))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_persists_empty_list() {
        let (mut store, storage) = create_test_store();
        store.insert("a.psarc").unwrap();
        store.clear();

        assert!(store.is_empty());
        assert!(saved_names(&storage).is_empty());
    }

    #[test]
    fn test_replace_all_skips_checks_and_save() {
        let (mut store, storage) = create_test_store();
        let a = CatalogEntry::new("dup.psarc");
        let b = CatalogEntry::new("dup.psarc");

        store.replace_all(vec![a, b]);

        assert_eq!(store.len(), 2);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_replace_all_keeps_order_and_timestamps() {
        let (mut store, _) = create_test_store();
        let entries = fixtures::numbered_entries(30);

        store.replace_all(entries.clone());

        assert_eq!(store.entries(), entries.as_slice());
        assert_eq!(store.entries()[29].created_at, entries[29].created_at);
    }

    #[test]
    fn test_open_loads_persisted_entries() {
        let (mut store, storage) = create_test_store();
        let entry = store.insert("a.psarc").unwrap();

        let reopened = CatalogStore::open(CatalogPersistence::new(storage));
        assert_eq!(reopened.list(), vec![entry]);
    }

    #[test]
    fn test_import_reports_duplicates() {
        let (mut store, storage) = create_test_store();
        store.insert("existing.psarc").unwrap();

        let report = store.import([
            "new1.psarc",
            "existing.psarc",
            "new2.psarc",
            "new1.psarc",
            "",
        ]);

        let added: Vec<_> = report.added.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(added, vec!["new1.psarc", "new2.psarc"]);
        assert_eq!(report.duplicates, vec!["existing.psarc", "new1.psarc"]);
        assert_eq!(store.len(), 3);
        assert_eq!(
            saved_names(&storage),
            vec!["existing.psarc", "new1.psarc", "new2.psarc"]
        );
    }

    #[test]
    fn test_import_saves_once() {
        let storage = Arc::new(FailingStorage::quota());
        let mut store = CatalogStore::new(CatalogPersistence::new(storage.clone()));

        let report = store.import(["a.psarc", "b.psarc", "c.psarc"]);
        assert_eq!(report.added.len(), 3);
        assert_eq!(storage.write_attempts(), 1);

        // Nothing new means nothing to save
        store.import(["a.psarc", "b.psarc"]);
        assert_eq!(storage.write_attempts(), 1);

        store.replace_all(Vec::new());
        assert_eq!(storage.write_attempts(), 1);
    }

    #[test]
    fn test_filter_and_counts() {
        let (mut store, _) = create_test_store();
        let a = store.insert("song-artist.psarc").unwrap();
        store.insert("another.psarc").unwrap();
        store.set_status(&a.id, FileStatus::Good).unwrap();

        let filter = EntryFilter::new()
            .with_search("ARTIST")
            .with_status(StatusFilter::Only(FileStatus::Good));
        let found = store.filter(&filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, a.id);

        let counts = store.status_counts();
        assert_eq!(counts.total, 2);
        assert_eq!(counts.good, 1);
        assert_eq!(counts.untested, 1);
    }

    #[test]
    fn test_failed_save_keeps_mutation() {
        let storage = Arc::new(FailingStorage::quota());
        let mut store = CatalogStore::new(CatalogPersistence::new(storage));

        let entry = store.insert("a.psarc").unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get_by_id(&entry.id).unwrap(), entry);
        assert_eq!(
            store.last_save_error(),
            Some(&PersistenceError::QuotaExceeded)
        );
    }

    #[test]
    fn test_successful_save_clears_last_error() {
        let storage = Arc::new(MemoryStorage::new().with_quota(400));
        let mut store = CatalogStore::new(CatalogPersistence::new(storage));

        store.insert("a.psarc").unwrap();
        assert!(store.last_save_error().is_none());

        store.insert(&"x".repeat(300)).unwrap();
        assert!(store.last_save_error().is_some());
        assert_eq!(store.len(), 2);

        let long = store.entries()[1].id.clone();
        store.remove(&long).unwrap();
        assert!(store.last_save_error().is_none());
    }
}
