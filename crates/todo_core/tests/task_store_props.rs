use proptest::prelude::*;
use todo_core::{decode_collection, Task, TaskCollection};

fn task_strategy() -> impl Strategy<Value = (String, bool, i64)> {
    ("[a-zA-Z0-9][a-zA-Z0-9 ]{0,20}", any::<bool>(), 0i64..1_000_000)
}

fn collection_strategy() -> impl Strategy<Value = TaskCollection> {
    prop::collection::vec(task_strategy(), 0..8).prop_map(|records| {
        TaskCollection::from_tasks(records.into_iter().enumerate().map(
            |(index, (text, completed, created_at))| {
                let mut task = Task::with_id(format!("id-{index}"), &text, created_at).unwrap();
                task.completed = completed;
                task
            },
        ))
    })
}

fn whitespace_strategy() -> impl Strategy<Value = String> {
    "[ \t\n\r]{0,6}"
}

proptest! {
    #[test]
    fn prop_unknown_id_is_no_op(collection in collection_strategy(), text in "[a-z]{1,10}") {
        let missing = "not-a-task-id";
        prop_assert_eq!(collection.toggle(missing), collection.clone());
        prop_assert_eq!(collection.update(missing, &text), collection.clone());
        prop_assert_eq!(collection.delete(missing), collection);
    }

    #[test]
    fn prop_whitespace_text_is_no_op(
        collection in collection_strategy(),
        blank in whitespace_strategy(),
    ) {
        prop_assert_eq!(collection.add(&blank), collection.clone());
        for task in collection.tasks() {
            prop_assert_eq!(collection.update(&task.id, &blank), collection.clone());
        }
    }

    #[test]
    fn prop_only_add_and_delete_change_length(
        collection in collection_strategy(),
        text in "[a-z]{1,10}",
    ) {
        let before = collection.len();
        prop_assert_eq!(collection.add(&text).len(), before + 1);
        for task in collection.tasks() {
            prop_assert_eq!(collection.delete(&task.id).len(), before - 1);
            prop_assert_eq!(collection.toggle(&task.id).len(), before);
            prop_assert_eq!(collection.update(&task.id, &text).len(), before);
        }
    }

    #[test]
    fn prop_double_toggle_is_identity(collection in collection_strategy()) {
        for task in collection.tasks() {
            prop_assert_eq!(collection.toggle(&task.id).toggle(&task.id), collection.clone());
        }
    }

    #[test]
    fn prop_serialized_collection_decodes_to_itself(collection in collection_strategy()) {
        let encoded = serde_json::to_string(&collection).unwrap();
        let report = decode_collection(&encoded).unwrap();
        prop_assert_eq!(report.dropped_invalid, 0);
        prop_assert_eq!(report.dropped_duplicate, 0);
        prop_assert_eq!(report.collection, collection);
    }
}
