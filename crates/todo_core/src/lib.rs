//! Core task list logic.
//! This crate is the single source of truth for task invariants and for the
//! durable slot contract.

pub mod config;
pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod service;
pub mod store;
pub mod view;

pub use config::{ConfigError, CoreConfig};
pub use kv::{KvError, KvResult, KvStore, MemoryKvStore, SqliteKvStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use persistence::bridge::{
    decode_collection, BridgeState, DecodeReport, PersistenceBridge, TASKS_STORAGE_KEY,
};
pub use service::task_service::TaskService;
pub use store::command::{reduce, TaskCommand};
pub use store::task_store::TaskCollection;
pub use view::{display_order, render_lines, EMPTY_STATE_MESSAGE};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
