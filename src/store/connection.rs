use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::errors::DashError;

/// An open connection to the record store. External scanners write to the
/// same file; this process only ever reads through the query layer, but the
/// full append-only write path is exposed for provisioning and tests.
pub struct Store {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl Store {
    pub fn open(path: &str) -> Result<Self, DashError> {
        // Ensure parent directory exists
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)
            .map_err(|e| DashError::Query(format!("Failed to open store: {}", e)))?;

        // Enable WAL mode so dashboard reads don't block scanner writes
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| DashError::Query(format!("Failed to set pragmas: {}", e)))?;

        let store = Self { conn: Arc::new(Mutex::new(conn)) };
        store.ensure_schema()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self, DashError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DashError::Query(format!("Failed to open in-memory store: {}", e)))?;
        let store = Self { conn: Arc::new(Mutex::new(conn)) };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Provisions every collection and its index set. Idempotent; runs on
    /// every open so a fresh deployment needs no separate migration step.
    pub fn ensure_schema(&self) -> Result<(), DashError> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(super::schema::CREATE_TABLES)
            .map_err(|e| DashError::Query(format!("Failed to create tables: {}", e)))?;
        Ok(())
    }
}

impl Clone for Store {
    fn clone(&self) -> Self {
        Self { conn: self.conn.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_names(store: &Store) -> Vec<String> {
        let conn = store.conn.lock().unwrap();
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'index' AND name LIKE 'idx_%' ORDER BY name")
            .unwrap();
        let rows = stmt.query_map([], |row| row.get::<_, String>(0)).unwrap();
        rows.map(Result::unwrap).collect()
    }

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let store = Store::in_memory().unwrap();
        let first = index_names(&store);
        assert!(!first.is_empty());

        store.ensure_schema().unwrap();
        store.ensure_schema().unwrap();
        assert_eq!(index_names(&store), first);
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dash.db");
        let store = Store::open(path.to_str().unwrap()).unwrap();
        assert!(!index_names(&store).is_empty());
        assert!(path.exists());
    }
}
