//! Presentation-time projections of the task collection.
//!
//! # Invariants
//! - Projections never reorder or mutate the stored collection.
//! - Display order is `createdAt` descending with ties kept in storage order.

use crate::model::task::Task;
use crate::store::task_store::TaskCollection;

/// Message rendered when the collection holds no tasks.
pub const EMPTY_STATE_MESSAGE: &str = "No tasks yet. Add your first task above.";

/// Returns tasks newest-first.
pub fn display_order(collection: &TaskCollection) -> Vec<&Task> {
    let mut ordered: Vec<&Task> = collection.iter().collect();
    // sort_by is stable
    ordered.sort_by(|left, right| right.created_at.cmp(&left.created_at));
    ordered
}

/// Renders one text line per task, or the empty-state message.
pub fn render_lines(collection: &TaskCollection) -> Vec<String> {
    if collection.is_empty() {
        return vec![EMPTY_STATE_MESSAGE.to_string()];
    }
    display_order(collection)
        .into_iter()
        .map(render_task)
        .collect()
}

fn render_task(task: &Task) -> String {
    let mark = if task.completed { 'x' } else { ' ' };
    format!("[{mark}] {}  ({})", task.text, task.id)
}

#[cfg(test)]
mod tests {
    use super::{display_order, render_lines, EMPTY_STATE_MESSAGE};
    use crate::model::task::Task;
    use crate::store::task_store::TaskCollection;

    #[test]
    fn empty_collection_renders_empty_state() {
        assert_eq!(
            render_lines(&TaskCollection::new()),
            vec![EMPTY_STATE_MESSAGE.to_string()]
        );
    }

    #[test]
    fn display_order_is_stable_for_equal_timestamps() {
        let collection = TaskCollection::from_tasks([
            Task::with_id("old", "old", 1).unwrap(),
            Task::with_id("tie-a", "tie a", 5).unwrap(),
            Task::with_id("tie-b", "tie b", 5).unwrap(),
            Task::with_id("new", "new", 9).unwrap(),
        ]);

        let ids: Vec<&str> = display_order(&collection)
            .into_iter()
            .map(|task| task.id.as_str())
            .collect();
        assert_eq!(ids, vec!["new", "tie-a", "tie-b", "old"]);
        assert_eq!(collection.tasks()[0].id, "old");
    }

    #[test]
    fn render_marks_completed_tasks() {
        let collection = TaskCollection::from_tasks([Task::with_id("t1", "done", 0).unwrap()])
            .toggle("t1");
        assert_eq!(render_lines(&collection), vec!["[x] done  (t1)".to_string()]);
    }
}
