use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::{debug, info};

use super::KeyValueStore;
use crate::error::StorageError;

/// SQLite-backed key-value table.
///
/// rusqlite connections are not `Sync`, so the connection sits behind a mutex;
/// each operation is a single statement.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Create or open the store at `db_path`, creating the parent directory
    /// and table if needed.
    pub fn open(db_path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Self::init(Connection::open(db_path)?)?;
        info!("Opened key-value store at {:?}", db_path);
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Self::init(Connection::open_in_memory()?)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init(conn: Connection) -> Result<Connection, StorageError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );",
        )?;
        Ok(conn)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.lock()?;
        let result = conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let now = Utc::now().to_rfc3339();
        self.lock()?.execute(
            "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, now],
        )?;
        debug!("Stored key '{}' ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let count = self
            .lock()?
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        debug!("Removed key '{}' ({} rows)", key, count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (SqliteStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::open(&dir.path().join("nested").join("kv.db")).unwrap();
        (store, dir)
    }

    #[test]
    fn test_set_and_get() {
        let (store, _dir) = create_test_store();
        store.set("history", "[]").unwrap();
        assert_eq!(store.get("history").unwrap(), Some("[]".to_string()));
    }

    #[test]
    fn test_get_missing_key() {
        let (store, _dir) = create_test_store();
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_set_replaces_prior_value() {
        let (store, _dir) = create_test_store();
        store.set("api_key", "old").unwrap();
        store.set("api_key", "new").unwrap();
        assert_eq!(store.get("api_key").unwrap(), Some("new".to_string()));
    }

    #[test]
    fn test_remove() {
        let (store, _dir) = create_test_store();
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        // Removing again is a no-op
        store.remove("k").unwrap();
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kv.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.set("k", "persisted").unwrap();
        }
        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.get("k").unwrap(), Some("persisted".to_string()));
    }

    #[test]
    fn test_in_memory_store() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
    }
}
