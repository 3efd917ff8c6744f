//! # State Storage
//!
//! The durable medium behind the store: a named text record per key.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  kv_store                                                               │
//! │  ┌───────────────────┬──────────────────────────────┬────────────────┐  │
//! │  │ key (PK)          │ value                        │ updated_at     │  │
//! │  ├───────────────────┼──────────────────────────────┼────────────────┤  │
//! │  │ invoice-storage   │ {"state":{...},"version":0}  │ RFC 3339       │  │
//! │  └───────────────────┴──────────────────────────────┴────────────────┘  │
//! │                                                                         │
//! │  Every write replaces the whole record (no incremental updates).        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};

/// A key/value medium holding whole serialized records.
pub trait StateStorage: Send {
    /// Returns the record stored under `key`, if any.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replaces the record stored under `key`.
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

// =============================================================================
// SQLite
// =============================================================================

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS kv_store (
    key        TEXT PRIMARY KEY NOT NULL,
    value      TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
";

/// SQLite-backed storage in a single local file.
///
/// ## Example
/// ```rust
/// use facture_store::{SqliteStorage, StateStorage};
///
/// let mut storage = SqliteStorage::open_in_memory().unwrap();
/// storage.write("invoice-storage", "{}").unwrap();
/// assert_eq!(storage.read("invoice-storage").unwrap().as_deref(), Some("{}"));
/// ```
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteStorage {
    /// Opens (or creates) the database file and its schema.
    ///
    /// Missing parent directories are created.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        info!(path = %path.display(), "Opened SQLite storage");

        Ok(SqliteStorage {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Opens a private in-memory database (for tests).
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(SqliteStorage { conn, path: None })
    }

    /// File path, `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl StateStorage for SqliteStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        debug!(key, bytes = value.len(), "Record written");
        Ok(())
    }
}

// =============================================================================
// In-Memory
// =============================================================================

/// HashMap-backed storage.
///
/// Clones share the same records, so a test can keep a clone to inspect what
/// the store persisted or to make the next writes fail.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    records: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with one record already present.
    pub fn with_record(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
        storage
    }

    /// Makes every following write fail with [`StorageError::Unavailable`].
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Current value of a record.
    pub fn get(&self, key: &str) -> Option<String> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl StateStorage for MemoryStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(format!(
                "write to '{}' rejected",
                key
            )));
        }
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
