//! SQLite-backed key-value storage.

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use super::storage::{check_quota, KeyValueStorage, StorageError};

/// Key-value slots stored in a single SQLite table.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
    quota_bytes: Option<usize>,
}

impl SqliteStorage {
    /// Open (or create) the database file and the `kv_store` table.
    pub fn new(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|e| StorageError::Backend(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            quota_bytes: None,
        })
    }

    /// Create an in-memory database (useful for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StorageError::Backend(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            quota_bytes: None,
        })
    }

    /// Limit the total size of stored keys and values.
    pub fn with_quota(mut self, quota_bytes: Option<usize>) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    fn initialize_schema(conn: &Connection) -> Result<(), StorageError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| StorageError::Backend(e.to_string()))?;

        Ok(())
    }

    /// Total bytes held, and bytes held under `key`.
    fn usage(conn: &Connection, key: &str) -> Result<(usize, usize), StorageError> {
        let total: i64 = conn
            .query_row(
                "SELECT COALESCE(SUM(LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))), 0)
                 FROM kv_store",
                [],
                |row| row.get(0),
            )
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        let replaced: Option<i64> = conn
            .query_row(
                "SELECT LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))
                 FROM kv_store WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        Ok((total as usize, replaced.unwrap_or(0) as usize))
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);

        conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| StorageError::Backend(e.to_string()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);

        if self.quota_bytes.is_some() {
            let (total, replaced) = Self::usage(&conn, key)?;
            check_quota(self.quota_bytes, total, replaced, key, value)?;
        }

        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )
        .map_err(|e| StorageError::Backend(e.to_string()))?;

        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);

        conn.execute("DELETE FROM kv_store WHERE key = ?", params![key])
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        Ok(())
    }
}
