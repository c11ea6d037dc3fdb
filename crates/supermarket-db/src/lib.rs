pub mod error;
pub mod migrations;
pub mod models;
pub mod queries;

pub use error::{DbError, Result};

use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// The single connection an admin tool holds for its whole run.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open an existing database file and bring the schema up to date.
    ///
    /// The file is never created here: the game server owns it, and a
    /// missing file almost always means the data volume is not mounted.
    pub fn open(path: &Path) -> Result<Self> {
        let db = Self::connect(path)?;
        db.with_conn(migrations::run)?;
        Ok(db)
    }

    /// Open an existing database file without touching its schema.
    pub fn connect(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DbError::NotFound(path.to_path_buf()));
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        info!("Database opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Fresh in-memory database with the full schema, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        migrations::run(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DbError::LockPoisoned(e.to_string()))?;
        f(&conn)
    }

    /// Mutable access for operations that open their own transaction.
    pub fn with_conn_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DbError::LockPoisoned(e.to_string()))?;
        f(&mut conn)
    }
}
