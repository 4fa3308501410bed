use std::collections::HashMap;

use rusqlite::{Connection, OptionalExtension};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Flat string-to-string storage, the persistence surface of the game.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

pub struct SqliteStore {
    connection: Connection,
}

impl SqliteStore {
    pub fn open(db_url: &str) -> Result<Self> {
        Self::with_connection(Connection::open(db_url)?)
    }

    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(connection: Connection) -> Result<Self> {
        connection.execute_batch(
            "CREATE TABLE IF NOT EXISTS storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )?;
        Ok(SqliteStore { connection })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .connection
            .query_row("SELECT value FROM storage WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.connection.execute(
            "INSERT INTO storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: impl ToString, value: impl ToString) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use common::model::messages::Id;

    use super::*;

    #[test]
    fn sqlite_overwrites_existing_keys() {
        let mut store = SqliteStore::in_memory().unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
        store.set("theme", "dark").unwrap();
        store.set("theme", "light").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn sqlite_file_survives_reopening() {
        let db_path = std::env::temp_dir().join(format!("rps_storage_test_{}.db", Id::new()));
        let db_url = db_path.to_str().unwrap().to_string();
        {
            let mut store = SqliteStore::open(&db_url).unwrap();
            store.set("gameSettings", r#"{"volume":0.1}"#).unwrap();
        }
        let store = SqliteStore::open(&db_url).unwrap();
        assert_eq!(
            store.get("gameSettings").unwrap().as_deref(),
            Some(r#"{"volume":0.1}"#)
        );
        let _ = std::fs::remove_file(db_path);
    }

    #[test]
    fn memory_store_starts_from_given_entries() {
        let mut store = MemoryStore::new().with_entry("theme", "dark");
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        store.set("theme", "light").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
    }
}
