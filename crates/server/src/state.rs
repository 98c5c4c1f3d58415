use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chartshelf_core::{CatalogStore, Config, Paginator, SanitizedConfig};

/// Shared application state
///
/// The store and the list paginator are each behind a mutex so that one
/// request's mutate-then-save sequence finishes before the next one starts.
pub struct AppState {
    config: Config,
    store: Mutex<CatalogStore>,
    paginator: Mutex<Paginator>,
}

impl AppState {
    pub fn new(config: Config, store: CatalogStore) -> Self {
        let paginator = Paginator::new(config.pagination.items_per_page);
        Self {
            config,
            store: Mutex::new(store),
            paginator: Mutex::new(paginator),
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn static_dir(&self) -> &Path {
        &self.config.server.static_dir
    }

    /// Number of page links returned with each listing.
    pub fn max_visible_pages(&self) -> usize {
        self.config.pagination.max_visible_pages
    }

    pub fn store(&self) -> MutexGuard<'_, CatalogStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn paginator(&self) -> MutexGuard<'_, Paginator> {
        self.paginator.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
