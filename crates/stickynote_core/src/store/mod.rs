//! Local key-value store abstraction.
//!
//! # Responsibility
//! - Define the string-to-string blob store the note list is mirrored into.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - `set` overwrites the whole value for a key; there are no partial writes.
//! - `get` on a missing key is `Ok(None)`, never an error.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Key-value store failure.
#[derive(Debug)]
pub enum StoreError {
    /// Backing database failure.
    Db(DbError),
    /// Key is empty after trimming.
    EmptyKey,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::EmptyKey => write!(f, "store key cannot be empty"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::EmptyKey => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Blob store keyed by fixed string names.
pub trait KvStore {
    /// Reads the value stored at `key`.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Overwrites the value stored at `key`.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
    /// Removes `key`; returns whether a value existed.
    fn remove(&mut self, key: &str) -> StoreResult<bool>;
}

fn check_key(key: &str) -> StoreResult<()> {
    if key.trim().is_empty() {
        return Err(StoreError::EmptyKey);
    }
    Ok(())
}
