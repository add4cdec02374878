//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record persisted in the durable slot.
//! - Own text normalization and id generation for new tasks.
//!
//! # Invariants
//! - `id` is non-empty and never reused for another task.
//! - `text` is trimmed and never empty while the task exists.
//! - Wire shape is `{ id, text, completed, createdAt }`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Opaque task identifier.
///
/// Persisted ids are arbitrary strings, so lookups never parse them.
pub type TaskId = String;

/// Canonical to-do record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord")]
pub struct Task {
    /// Stable lookup key assigned at creation.
    pub id: TaskId,
    /// Trimmed, non-empty content.
    pub text: String,
    /// Completion flag, `false` at creation.
    pub completed: bool,
    /// Unix epoch milliseconds. Only used for display ordering.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

/// Validation failures for task construction and decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Id is empty or whitespace-only.
    EmptyId,
    /// Text is empty after trimming.
    EmptyText,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "task id must not be empty"),
            Self::EmptyText => write!(f, "task text must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

impl Task {
    /// Creates a task with a generated id and the current time.
    ///
    /// Returns `None` when `raw_text` is empty after trimming.
    pub fn new(raw_text: &str) -> Option<Self> {
        Self::with_id(generate_task_id(), raw_text, now_epoch_ms()).ok()
    }

    /// Creates an incomplete task with caller-provided identity and time.
    ///
    /// # Errors
    /// - `EmptyId` when `id` is blank.
    /// - `EmptyText` when `raw_text` is blank after trimming.
    pub fn with_id(
        id: impl Into<TaskId>,
        raw_text: &str,
        created_at: i64,
    ) -> Result<Self, TaskValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        let text = normalize_task_text(raw_text).ok_or(TaskValidationError::EmptyText)?;
        Ok(Self {
            id,
            text,
            completed: false,
            created_at,
        })
    }

    /// Checks the record invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.trim().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        if self.text.trim().is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        Ok(())
    }
}

/// Lenient wire shape used while decoding persisted records.
#[derive(Deserialize)]
struct TaskRecord {
    id: String,
    text: String,
    #[serde(default)]
    completed: bool,
    #[serde(rename = "createdAt", default)]
    created_at: Option<i64>,
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskValidationError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let mut task = Task::with_id(record.id, &record.text, record.created_at.unwrap_or(0))?;
        task.completed = record.completed;
        Ok(task)
    }
}

/// Trims user input, returning `None` for empty or whitespace-only text.
pub fn normalize_task_text(raw_text: &str) -> Option<String> {
    let trimmed = raw_text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Generates a fresh random task id.
pub fn generate_task_id() -> TaskId {
    Uuid::new_v4().to_string()
}

/// Current wall clock in Unix epoch milliseconds.
///
/// Clamps to `0` when the system clock reports a time before the epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{generate_task_id, normalize_task_text, Task, TaskValidationError};

    #[test]
    fn normalize_trims_and_rejects_blank() {
        assert_eq!(normalize_task_text("  walk dog \n"), Some("walk dog".to_string()));
        assert_eq!(normalize_task_text(" \t\n"), None);
        assert_eq!(normalize_task_text(""), None);
    }

    #[test]
    fn generated_ids_are_distinct() {
        let first = generate_task_id();
        let second = generate_task_id();
        assert!(!first.is_empty());
        assert_ne!(first, second);
    }

    #[test]
    fn with_id_rejects_blank_id() {
        let err = Task::with_id("  ", "text", 0).unwrap_err();
        assert_eq!(err, TaskValidationError::EmptyId);
    }

    #[test]
    fn new_returns_none_for_blank_text() {
        assert!(Task::new("   ").is_none());
    }
}
