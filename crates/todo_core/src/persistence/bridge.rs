//! Synchronization between the task collection and one durable slot.
//!
//! # Responsibility
//! - Hydrate the initial collection from the slot at startup.
//! - Write the full collection back after every change.
//!
//! # Invariants
//! - Neither `hydrate` nor `persist` ever returns an error to the caller.
//! - Unreadable slot content hydrates to an empty collection.
//! - Writes always carry the complete collection, never a diff.
//! - Nothing is written before the first successful hydration.
//! - A failed slot read disables writes for the session, so the stored value
//!   is never replaced by a collection that did not come from it.

use crate::kv::KvStore;
use crate::model::task::Task;
use crate::store::task_store::TaskCollection;
use log::{info, warn};
use serde_json::Value;

/// Slot key holding the serialized collection.
///
/// The `v1` suffix is the layout version; an incompatible layout gets a new
/// key and leaves the old slot untouched.
pub const TASKS_STORAGE_KEY: &str = "todo.tasks.v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    Pending,
    Hydrated,
    /// The slot could not be read; `persist` is refused from here on.
    ReadFailed,
}

/// Outcome of decoding a raw slot value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeReport {
    pub collection: TaskCollection,
    /// Array elements that failed record validation.
    pub dropped_invalid: usize,
    /// Array elements whose id repeated an earlier record.
    pub dropped_duplicate: usize,
}

/// Durable slot adapter for one task collection.
pub struct PersistenceBridge<S: KvStore> {
    store: S,
    key: String,
    state: BridgeState,
}

impl<S: KvStore> PersistenceBridge<S> {
    /// Creates a bridge over the default `todo.tasks.v1` slot.
    pub fn new(store: S) -> Self {
        Self::with_key(store, TASKS_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            state: BridgeState::Pending,
        }
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Reads the slot and returns the collection it holds.
    ///
    /// Absent, unreadable or malformed values yield an empty collection.
    /// A backend read error additionally moves the bridge to `ReadFailed`.
    pub fn hydrate(&mut self) -> TaskCollection {
        let raw = match self.store.get(&self.key) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    "event=hydrate module=persistence status=fallback key={} reason=read_failed error={}",
                    self.key, err
                );
                self.state = BridgeState::ReadFailed;
                return TaskCollection::new();
            }
        };
        self.state = BridgeState::Hydrated;

        let Some(raw) = raw else {
            info!(
                "event=hydrate module=persistence status=ok key={} source=absent count=0",
                self.key
            );
            return TaskCollection::new();
        };

        match decode_collection(&raw) {
            Some(report) => {
                if report.dropped_invalid > 0 || report.dropped_duplicate > 0 {
                    warn!(
                        "event=hydrate module=persistence status=partial key={} dropped_invalid={} dropped_duplicate={}",
                        self.key, report.dropped_invalid, report.dropped_duplicate
                    );
                }
                info!(
                    "event=hydrate module=persistence status=ok key={} source=slot count={}",
                    self.key,
                    report.collection.len()
                );
                report.collection
            }
            None => {
                warn!(
                    "event=hydrate module=persistence status=fallback key={} reason=unparseable bytes={}",
                    self.key,
                    raw.len()
                );
                TaskCollection::new()
            }
        }
    }

    /// Serializes and writes the full collection.
    ///
    /// Failures are logged and dropped; the caller's in-memory state stays
    /// authoritative.
    pub fn persist(&self, collection: &TaskCollection) {
        match self.state {
            BridgeState::Hydrated => {}
            BridgeState::Pending => {
                warn!(
                    "event=persist module=persistence status=skipped key={} reason=not_hydrated",
                    self.key
                );
                return;
            }
            BridgeState::ReadFailed => {
                warn!(
                    "event=persist module=persistence status=skipped key={} reason=read_failed",
                    self.key
                );
                return;
            }
        }

        let encoded = match serde_json::to_string(collection) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(
                    "event=persist module=persistence status=dropped key={} reason=encode_failed error={}",
                    self.key, err
                );
                return;
            }
        };

        match self.store.set(&self.key, &encoded) {
            Ok(()) => info!(
                "event=persist module=persistence status=ok key={} count={} bytes={}",
                self.key,
                collection.len(),
                encoded.len()
            ),
            Err(err) => warn!(
                "event=persist module=persistence status=dropped key={} reason=write_failed error={}",
                self.key, err
            ),
        }
    }
}

/// Decodes a raw slot value.
///
/// Returns `None` when the value is not a JSON array. Individual elements
/// that do not form a valid task are dropped, as are repeated ids.
pub fn decode_collection(raw: &str) -> Option<DecodeReport> {
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw) else {
        return None;
    };

    let mut tasks: Vec<Task> = Vec::with_capacity(items.len());
    let mut dropped_invalid = 0;
    let mut dropped_duplicate = 0;

    for item in items {
        match serde_json::from_value::<Task>(item) {
            Ok(task) if tasks.iter().any(|existing| existing.id == task.id) => {
                dropped_duplicate += 1;
            }
            Ok(task) => tasks.push(task),
            Err(_) => dropped_invalid += 1,
        }
    }

    Some(DecodeReport {
        collection: TaskCollection::from_tasks(tasks),
        dropped_invalid,
        dropped_duplicate,
    })
}
