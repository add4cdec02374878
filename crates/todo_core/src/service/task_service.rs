//! Task list use-case service.
//!
//! # Responsibility
//! - Own the current collection for one session.
//! - Route commands through the reducer and persist resulting changes.
//!
//! # Invariants
//! - The collection is hydrated exactly once, in `open`.
//! - A command that leaves the collection content-equal writes nothing.
//! - Storage failures never surface to callers; memory stays authoritative.

use crate::kv::KvStore;
use crate::model::task::{Task, TaskId};
use crate::persistence::bridge::{PersistenceBridge, TASKS_STORAGE_KEY};
use crate::store::command::{reduce, TaskCommand};
use crate::store::task_store::TaskCollection;
use crate::view::display_order;
use log::debug;

/// Session facade over the task store and its durable slot.
pub struct TaskService<S: KvStore> {
    bridge: PersistenceBridge<S>,
    tasks: TaskCollection,
}

impl<S: KvStore> TaskService<S> {
    /// Opens a session on the default slot key.
    pub fn open(store: S) -> Self {
        Self::open_with_key(store, TASKS_STORAGE_KEY)
    }

    /// Hydrates from `key` and writes the hydrated value straight back.
    ///
    /// The write-back normalizes corrupted or absent slots to a valid value.
    /// When the slot cannot be read at all, the session runs in memory only
    /// and the stored value is left untouched.
    pub fn open_with_key(store: S, key: impl Into<String>) -> Self {
        let mut bridge = PersistenceBridge::with_key(store, key);
        let tasks = bridge.hydrate();
        bridge.persist(&tasks);
        Self { bridge, tasks }
    }

    /// Current collection in storage order.
    pub fn tasks(&self) -> &TaskCollection {
        &self.tasks
    }

    /// Current collection newest-first.
    pub fn display_order(&self) -> Vec<&Task> {
        display_order(&self.tasks)
    }

    /// Applies one command and persists the result when it changed.
    pub fn dispatch(&mut self, command: TaskCommand) -> &TaskCollection {
        let next = reduce(&self.tasks, &command);
        if next == self.tasks {
            debug!(
                "event=dispatch module=service status=noop command={} count={}",
                command.name(),
                self.tasks.len()
            );
            return &self.tasks;
        }

        self.bridge.persist(&next);
        debug!(
            "event=dispatch module=service status=ok command={} count={}",
            command.name(),
            next.len()
        );
        self.tasks = next;
        &self.tasks
    }

    /// Adds a task and returns its id, or `None` when the text was blank.
    pub fn add(&mut self, text: impl Into<String>) -> Option<TaskId> {
        let before = self.tasks.len();
        self.dispatch(TaskCommand::Add { text: text.into() });
        if self.tasks.len() > before {
            self.tasks.tasks().first().map(|task| task.id.clone())
        } else {
            None
        }
    }

    pub fn toggle(&mut self, id: impl Into<TaskId>) -> &TaskCollection {
        self.dispatch(TaskCommand::Toggle { id: id.into() })
    }

    pub fn update(&mut self, id: impl Into<TaskId>, text: impl Into<String>) -> &TaskCollection {
        self.dispatch(TaskCommand::Update {
            id: id.into(),
            text: text.into(),
        })
    }

    pub fn delete(&mut self, id: impl Into<TaskId>) -> &TaskCollection {
        self.dispatch(TaskCommand::Delete { id: id.into() })
    }

    /// Ends the session and returns the injected backend.
    pub fn into_store(self) -> S {
        self.bridge.into_store()
    }
}
