//! Reducer-style command handling.
//!
//! User actions are expressed as `TaskCommand` values and folded into the
//! current collection by `reduce`, independent of any event loop.

use crate::model::task::TaskId;
use crate::store::task_store::TaskCollection;

/// One user action against the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskCommand {
    /// Create a task from free text.
    Add { text: String },
    /// Flip the completion flag.
    Toggle { id: TaskId },
    /// Replace a task's text.
    Update { id: TaskId, text: String },
    /// Remove a task.
    Delete { id: TaskId },
}

impl TaskCommand {
    /// Stable label used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Toggle { .. } => "toggle",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
        }
    }
}

/// Applies `command` to `state`, returning the next collection.
pub fn reduce(state: &TaskCollection, command: &TaskCommand) -> TaskCollection {
    match command {
        TaskCommand::Add { text } => state.add(text),
        TaskCommand::Toggle { id } => state.toggle(id),
        TaskCommand::Update { id, text } => state.update(id, text),
        TaskCommand::Delete { id } => state.delete(id),
    }
}
