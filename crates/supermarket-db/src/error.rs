use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("user '{0}' already exists")]
    UsernameTaken(String),

    #[error("database lock poisoned: {0}")]
    LockPoisoned(String),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl DbError {
    /// True for any UNIQUE or PRIMARY KEY constraint failure.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::UsernameTaken(_) => true,
            Self::Sqlite(rusqlite::Error::SqliteFailure(err, _)) => {
                err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
            }
            _ => false,
        }
    }
}
