//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical data structures used by the task store.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion is a hard removal from the collection, not a tombstone.

pub mod task;
