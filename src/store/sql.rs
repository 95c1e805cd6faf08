use std::sync::{Arc, Mutex};
use std::time::Duration;

use rusqlite::Connection;

use super::{Store, StoreError};

const BACKEND: &str = "sqlite";
const IN_MEMORY: &str = ":memory:";

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        type TEXT NOT NULL,
        count INTEGER NOT NULL,
        price REAL NOT NULL
    );
"#;

/// Holder of the single SQLite connection shared by the SQL repository.
#[derive(Clone)]
pub struct SqlStore {
    identifier: String,
    conn: Arc<Mutex<Connection>>,
}

impl SqlStore {
    /// Connect, verify the connection with a ping and make sure the `products` table exists.
    pub fn open(identifier: &str) -> Result<Self, StoreError> {
        let conn = connect(identifier).map_err(|e| StoreError::init(BACKEND, identifier, e))?;
        Ok(Self {
            identifier: identifier.to_string(),
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Run `f` against the held connection. Calls are serialized.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&conn)?)
    }
}

fn connect(identifier: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(identifier)?;
    if identifier != IN_MEMORY {
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
    }
    conn.busy_timeout(Duration::from_millis(500))?;
    ping(&conn)?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}

fn ping(conn: &Connection) -> rusqlite::Result<()> {
    conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
    Ok(())
}

impl Store for SqlStore {
    fn read(&self) -> Result<Vec<u8>, StoreError> {
        Err(StoreError::Unsupported(BACKEND))
    }

    fn write(&self, _data: &[u8]) -> Result<(), StoreError> {
        Err(StoreError::Unsupported(BACKEND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::OptionalExtension;
    use tempfile::TempDir;

    #[test]
    fn open_creates_products_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.sqlite");
        let store = SqlStore::open(path.to_str().unwrap()).unwrap();

        let table = store
            .with_conn(|conn| {
                conn.query_row(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name='products'",
                    [],
                    |row| row.get::<_, String>(0),
                )
                .optional()
            })
            .unwrap();
        assert_eq!(table.as_deref(), Some("products"));
        assert!(path.exists());
    }

    #[test]
    fn open_is_idempotent_on_existing_database() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.sqlite");
        let first = SqlStore::open(path.to_str().unwrap()).unwrap();
        first
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO products (name, type, count, price) VALUES ('a', 'b', 1, 2.0)",
                    [],
                )
            })
            .unwrap();
        drop(first);

        let second = SqlStore::open(path.to_str().unwrap()).unwrap();
        let rows: i64 = second
            .with_conn(|conn| conn.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0)))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn open_fails_for_unreachable_location() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("catalog.sqlite");
        let err = SqlStore::open(path.to_str().unwrap()).err().unwrap();
        assert!(matches!(err, StoreError::Init { backend: "sqlite", .. }));
    }

    #[test]
    fn raw_byte_access_is_unsupported() {
        let store = SqlStore::open(IN_MEMORY).unwrap();
        assert!(matches!(store.read(), Err(StoreError::Unsupported("sqlite"))));
        assert!(matches!(store.write(b"[]"), Err(StoreError::Unsupported("sqlite"))));
        assert_eq!(store.identifier(), IN_MEMORY);
    }
}
