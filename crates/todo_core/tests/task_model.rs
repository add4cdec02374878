use todo_core::{Task, TaskValidationError};

#[test]
fn task_new_sets_defaults() {
    let task = Task::new("  hello  ").unwrap();

    assert!(!task.id.is_empty());
    assert_eq!(task.text, "hello");
    assert!(!task.completed);
    assert!(task.created_at > 0);
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let mut task = Task::with_id("t-42", "ship release", 1_700_000_000_000).unwrap();
    task.completed = true;

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], "t-42");
    assert_eq!(json["text"], "ship release");
    assert_eq!(json["completed"], true);
    assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
    assert!(json.get("created_at").is_none());

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn deserialize_rejects_blank_text() {
    let value = serde_json::json!({
        "id": "t1",
        "text": " \n ",
        "completed": false,
        "createdAt": 1
    });

    let err = serde_json::from_value::<Task>(value).unwrap_err();
    assert!(
        err.to_string().contains("task text must not be empty"),
        "unexpected error: {err}"
    );
}

#[test]
fn deserialize_fills_optional_fields() {
    let value = serde_json::json!({ "id": "t1", "text": "legacy" });

    let task: Task = serde_json::from_value(value).unwrap();
    assert!(!task.completed);
    assert_eq!(task.created_at, 0);
}

#[test]
fn validate_reports_blank_fields() {
    let mut task = Task::with_id("t1", "fine", 0).unwrap();
    assert_eq!(task.validate(), Ok(()));

    task.text = "   ".to_string();
    assert_eq!(task.validate(), Err(TaskValidationError::EmptyText));

    task.text = "fine".to_string();
    task.id = String::new();
    assert_eq!(task.validate(), Err(TaskValidationError::EmptyId));
}

#[test]
fn deserialize_treats_null_created_at_as_zero() {
    let value = serde_json::json!({
        "id": "t1",
        "text": "from an older client",
        "completed": true,
        "createdAt": null
    });

    let task: Task = serde_json::from_value(value).unwrap();
    assert_eq!(task.created_at, 0);
    assert!(task.completed);
}
