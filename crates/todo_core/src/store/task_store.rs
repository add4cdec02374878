//! Immutable task collection and its mutation operations.
//!
//! # Responsibility
//! - Hold the ordered, id-unique sequence of tasks.
//! - Provide add/toggle/update/delete as pure functions returning a new value.
//!
//! # Invariants
//! - Operations never mutate `self`; they return a fresh collection.
//! - Invalid input and unmatched ids produce a content-equal collection.
//! - New tasks are prepended (newest-first storage order).
//! - `add` is the only length-increasing operation.

use crate::model::task::{generate_task_id, normalize_task_text, now_epoch_ms, Task, TaskId};
use serde::{Deserialize, Serialize};

/// Ordered task sequence, unique by `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskCollection {
    tasks: Vec<Task>,
}

impl TaskCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from caller-supplied tasks.
    ///
    /// Text is trimmed, tasks failing `Task::validate` are discarded, and
    /// later duplicates of an id are dropped.
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut unique: Vec<Task> = Vec::new();
        for mut task in tasks {
            if task.validate().is_err() || unique.iter().any(|existing| existing.id == task.id) {
                continue;
            }
            if task.text.trim().len() != task.text.len() {
                task.text = task.text.trim().to_string();
            }
            unique.push(task);
        }
        Self { tasks: unique }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Looks up a task by id.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Adds a task with a generated id stamped at the current time.
    ///
    /// Blank `raw_text` is a no-op.
    pub fn add(&self, raw_text: &str) -> Self {
        self.add_with(raw_text, generate_task_id(), now_epoch_ms())
    }

    /// Adds a task with caller-provided identity and clock reading.
    ///
    /// # Contract
    /// - Blank `raw_text` returns an unchanged copy.
    /// - `createdAt` never drops below the newest task already present.
    /// - An `id` that is blank or already present returns an unchanged copy.
    pub fn add_with(&self, raw_text: &str, id: impl Into<TaskId>, now_ms: i64) -> Self {
        let Some(text) = normalize_task_text(raw_text) else {
            return self.clone();
        };
        let id = id.into();
        if id.trim().is_empty() || self.contains(&id) {
            return self.clone();
        }

        let newest = self.tasks.iter().map(|task| task.created_at).max();
        let created_at = newest.map_or(now_ms, |newest| now_ms.max(newest));

        let mut tasks = Vec::with_capacity(self.tasks.len() + 1);
        tasks.push(Task {
            id,
            text,
            completed: false,
            created_at,
        });
        tasks.extend(self.tasks.iter().cloned());
        Self { tasks }
    }

    /// Inverts `completed` on the matching task.
    pub fn toggle(&self, id: &str) -> Self {
        self.map_matching(id, |task| Task {
            completed: !task.completed,
            ..task.clone()
        })
    }

    /// Replaces the text of the matching task.
    ///
    /// Blank `raw_text` preserves the existing text.
    pub fn update(&self, id: &str, raw_text: &str) -> Self {
        let Some(text) = normalize_task_text(raw_text) else {
            return self.clone();
        };
        self.map_matching(id, |task| Task {
            text: text.clone(),
            ..task.clone()
        })
    }

    /// Removes the matching task.
    pub fn delete(&self, id: &str) -> Self {
        Self {
            tasks: self
                .tasks
                .iter()
                .filter(|task| task.id != id)
                .cloned()
                .collect(),
        }
    }

    fn map_matching(&self, id: &str, f: impl Fn(&Task) -> Task) -> Self {
        Self {
            tasks: self
                .tasks
                .iter()
                .map(|task| if task.id == id { f(task) } else { task.clone() })
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TaskCollection {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
