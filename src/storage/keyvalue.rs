//! Durable key-value storage on SQLite.

use crate::storage::backing::{BackingStore, StorageError};
use crate::storage::schema::{CURRENT_VERSION, SCHEMA, SCHEMA_VERSION_TABLE};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::path::PathBuf;

/// SQLite-backed blob store. One row per key in the `kv` table.
pub struct KeyValueStore {
    conn: Connection,
}

impl KeyValueStore {
    /// Open or create a store at the given path.
    pub fn open(path: &PathBuf) -> Result<Self, StorageError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::IoError(e.to_string()))?;
        }

        let conn =
            Connection::open(path).map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        let store = Self { conn };
        store.initialize()?;

        Ok(store)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        let store = Self { conn };
        store.initialize()?;

        Ok(store)
    }

    /// Initialize the database schema.
    fn initialize(&self) -> Result<(), StorageError> {
        self.conn
            .execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))?;

        let current_version = self.get_schema_version()?;

        if current_version < CURRENT_VERSION {
            self.migrate(current_version)?;
        }

        Ok(())
    }

    /// Get the current schema version.
    fn get_schema_version(&self) -> Result<i32, StorageError> {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        );

        match result {
            Ok(version) => Ok(version),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(e) => Err(StorageError::ReadFailed(e.to_string())),
        }
    }

    /// Run database migrations.
    fn migrate(&self, from_version: i32) -> Result<(), StorageError> {
        if from_version < 1 {
            // Initial schema
            self.conn
                .execute_batch(SCHEMA)
                .map_err(|e| StorageError::MigrationFailed(e.to_string()))?;

            self.conn
                .execute(
                    "INSERT INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
                    [CURRENT_VERSION],
                )
                .map_err(|e| StorageError::MigrationFailed(e.to_string()))?;

            tracing::info!("Key-value store migrated to version {}", CURRENT_VERSION);
        }

        Ok(())
    }
}

impl BackingStore for KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let result: SqliteResult<String> =
            self.conn
                .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                    row.get(0)
                });

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::ReadFailed(e.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv (key, value, updated_at)
                 VALUES (?1, ?2, datetime('now'))",
                params![key, value],
            )
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_in_memory_store() {
        let store = KeyValueStore::open_in_memory().expect("Failed to create store");
        let version = store.get_schema_version().expect("Failed to get version");
        assert_eq!(version, CURRENT_VERSION);
    }

    #[test]
    fn test_tables_created() {
        let store = KeyValueStore::open_in_memory().expect("Failed to create store");

        let tables: Vec<String> = store
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"kv".to_string()));
        assert!(tables.contains(&"schema_version".to_string()));
    }

    #[test]
    fn test_get_absent_key_returns_none() {
        let store = KeyValueStore::open_in_memory().unwrap();
        assert!(store.get("exercises").unwrap().is_none());
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let store = KeyValueStore::open_in_memory().unwrap();
        store.set("exercises", r#"[{"a":1}]"#).unwrap();
        assert_eq!(
            store.get("exercises").unwrap().as_deref(),
            Some(r#"[{"a":1}]"#)
        );
    }

    #[test]
    fn test_set_replaces_existing_value() {
        let store = KeyValueStore::open_in_memory().unwrap();
        store.set("exercises", "[]").unwrap();
        store.set("exercises", r#"["x"]"#).unwrap();
        assert_eq!(store.get("exercises").unwrap().as_deref(), Some(r#"["x"]"#));

        let rows: i64 = store
            .conn
            .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_reopening_existing_schema_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fitlog.db");

        {
            let store = KeyValueStore::open(&path).unwrap();
            store.set("exercises", "[]").unwrap();
        }

        let store = KeyValueStore::open(&path).unwrap();
        assert_eq!(store.get_schema_version().unwrap(), CURRENT_VERSION);
        assert_eq!(store.get("exercises").unwrap().as_deref(), Some("[]"));
    }
}
