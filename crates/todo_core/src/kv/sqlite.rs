//! SQLite-backed key-value slots.
//!
//! # Responsibility
//! - Persist slot values in the `kv_slots` table.
//! - Keep SQL details inside the storage boundary.
//!
//! # Invariants
//! - Only connections with all migrations applied are accepted.
//! - `set` is a single upsert, so a slot is always either old or new value.

use super::{KvError, KvResult, KvStore};
use crate::db::migrations::latest_version;
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value store over a migrated SQLite connection.
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Wraps a connection after checking its schema version.
    ///
    /// # Errors
    /// - `Uninitialized` when migrations have not been applied.
    pub fn try_new(conn: &'conn Connection) -> KvResult<Self> {
        let actual_version =
            conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(KvError::Uninitialized {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl KvStore for SqliteKvStore<'_> {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        debug!(
            "event=kv_get module=kv status=ok backend=sqlite key={} found={}",
            key,
            value.is_some()
        );
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        let result = self.conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        );
        match result {
            Ok(_) => {
                debug!(
                    "event=kv_set module=kv status=ok backend=sqlite key={} bytes={}",
                    key,
                    value.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=kv_set module=kv status=error backend=sqlite key={} error={}",
                    key, err
                );
                Err(err.into())
            }
        }
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM kv_slots WHERE key = ?1;", [key])?;
        debug!(
            "event=kv_remove module=kv status=ok backend=sqlite key={} removed={}",
            key, removed
        );
        Ok(())
    }
}
