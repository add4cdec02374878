//! In-memory task store.
//!
//! # Responsibility
//! - Own the authoritative task collection shape.
//! - Express every mutation as a pure `(state, command) -> state` step.
//!
//! # Invariants
//! - No operation here performs I/O; persistence lives in `persistence`.

pub mod command;
pub mod task_store;
