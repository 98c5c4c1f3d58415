pub mod bulk;
pub mod catalog;
pub mod config;
pub mod filter;
pub mod notify;
pub mod pagination;
pub mod persistence;
pub mod testing;

pub use bulk::{parse_bulk, validate_bulk, BulkInputError, BulkValidation};
pub use catalog::{
    CatalogEntry, CatalogError, CatalogStore, FileStatus, ImportReport, StatusCounts,
};
pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_config, Config,
    ConfigError, PaginationConfig, SanitizedConfig, ServerConfig, StorageConfig,
};
pub use filter::{filter_entries, EntryFilter, StatusFilter};
pub use notify::{LogNotifier, Notice, Notifier, NullNotifier, Severity};
pub use pagination::{PaginationState, Paginator};
pub use persistence::{
    CatalogPersistence, KeyValueStorage, MemoryStorage, PersistenceError, SqliteStorage,
    StorageError, DEFAULT_STORAGE_KEY, QUOTA_WARNING,
};
