//! Durable storage for the catalog.
//!
//! [`CatalogPersistence`] serializes the whole entry list into one slot of a
//! [`KeyValueStorage`] backend. Two backends ship with the crate: SQLite for
//! the server and an in-memory map for tests and ephemeral sessions.

mod adapter;
mod sqlite;
mod storage;

pub use adapter::{CatalogPersistence, PersistenceError, DEFAULT_STORAGE_KEY, QUOTA_WARNING};
pub use sqlite::SqliteStorage;
pub use storage::{KeyValueStorage, MemoryStorage, StorageError};
