//! In-memory key-value backend.
//!
//! Used as the test double for the durable slot and for ephemeral sessions.
//! Read and write failures can be switched on to exercise unavailable or
//! quota-limited backends.

use super::{KvError, KvResult, KvStore};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Single-threaded in-memory slot map.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    slots: RefCell<HashMap<String, String>>,
    reject_reads: Cell<bool>,
    reject_writes: Cell<bool>,
    write_count: Cell<usize>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with one slot value.
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::default();
        store.slots.borrow_mut().insert(key.into(), value.into());
        store
    }

    /// Makes subsequent `get` calls fail until switched off.
    pub fn set_reject_reads(&self, reject: bool) {
        self.reject_reads.set(reject);
    }

    /// Makes subsequent `set`/`remove` calls fail until switched off.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }

    /// Number of successful `set` calls.
    pub fn write_count(&self) -> usize {
        self.write_count.get()
    }

    /// Returns a copy of the raw value, bypassing the trait.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        if self.reject_reads.get() {
            return Err(KvError::ReadRejected("memory store is unavailable".to_string()));
        }
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        if self.reject_writes.get() {
            return Err(KvError::WriteRejected("memory store quota exceeded".to_string()));
        }
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.write_count.set(self.write_count.get() + 1);
        Ok(())
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        if self.reject_writes.get() {
            return Err(KvError::WriteRejected("memory store is read-only".to_string()));
        }
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}
