//! Key-value slot capability.
//!
//! # Responsibility
//! - Define the injectable `get`/`set`/`remove` contract used for durability.
//! - Keep backend details (SQLite, in-memory) behind one trait.
//!
//! # Invariants
//! - `set` replaces the whole value stored under a key.
//! - Backends report failures as `KvError`; callers decide whether to absorb.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

pub type KvResult<T> = Result<T, KvError>;

/// Failure raised by a key-value backend.
#[derive(Debug)]
pub enum KvError {
    Db(DbError),
    /// Backend could not serve the read (locked, unavailable).
    ReadRejected(String),
    /// Backend refused the write (quota, read-only, unavailable).
    WriteRejected(String),
    /// Backend has not been bootstrapped with the expected schema.
    Uninitialized {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::ReadRejected(reason) => write!(f, "read rejected: {reason}"),
            Self::WriteRejected(reason) => write!(f, "write rejected: {reason}"),
            Self::Uninitialized {
                expected_version,
                actual_version,
            } => write!(
                f,
                "storage schema version {actual_version} does not match expected {expected_version}"
            ),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::ReadRejected(_) | Self::WriteRejected(_) | Self::Uninitialized { .. } => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable string slots addressed by key.
pub trait KvStore {
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> KvResult<()>;
    fn remove(&self, key: &str) -> KvResult<()>;
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        (**self).remove(key)
    }
}
