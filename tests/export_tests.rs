use dayplan::export::{export_to_path, with_csv_extension, write_csv, ExportError};
use dayplan::quotes::FixedQuote;
use dayplan::{Category, Priority, Registry, TaskInput, TaskType};
use std::path::Path;

fn registry_with_two_tasks() -> Registry {
    let mut registry = Registry::new().with_quote_source(FixedQuote("q".to_string()));
    let first = registry
        .add_task(TaskInput {
            name: "Write essay".to_string(),
            time: "2024-01-11 14:00".to_string(),
            description: "Intro, body, conclusion".to_string(),
            category: Some(Category::Study),
            priority: Some(Priority::High),
            task_type: Some(TaskType::Daily),
            reminder_minutes: None,
            recurrence_days: None,
        })
        .unwrap();
    registry
        .add_task(TaskInput {
            name: "Call mum".to_string(),
            time: "2024-01-10 18:30".to_string(),
            description: String::new(),
            category: Some(Category::Personal),
            priority: Some(Priority::Low),
            task_type: Some(TaskType::Recurring),
            reminder_minutes: None,
            recurrence_days: Some("Sunday".to_string()),
        })
        .unwrap();
    registry.mark_completed(Some(first)).unwrap();
    registry
}

#[test]
fn csv_has_header_and_rows_in_insertion_order() {
    let registry = registry_with_two_tasks();
    let mut out = Vec::new();
    let rows = write_csv(registry.tasks(), &mut out).unwrap();
    assert_eq!(rows, 2);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Name,Time,Description,Category,Priority,Status");
    assert_eq!(
        lines[1],
        "Write essay,2024-01-11 14:00,\"Intro, body, conclusion\",Study,High,Completed"
    );
    assert_eq!(lines[2], "Call mum,2024-01-10 18:30,,Personal,Low,Pending");
    assert_eq!(lines.len(), 3);
}

#[test]
fn empty_registry_writes_only_header() {
    let mut out = Vec::new();
    assert_eq!(write_csv(&[], &mut out).unwrap(), 0);
    assert_eq!(String::from_utf8(out).unwrap(), "Name,Time,Description,Category,Priority,Status\n");
}

#[test]
fn export_appends_extension_and_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry_with_two_tasks();

    let (path, rows) = export_to_path(registry.tasks(), &dir.path().join("tasks")).unwrap();
    assert_eq!(path, dir.path().join("tasks.csv"));
    assert_eq!(rows, 2);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("Name,Time,Description,Category,Priority,Status\n"));
    assert!(contents.contains("Call mum"));
}

#[test]
fn export_keeps_existing_extension() {
    assert_eq!(with_csv_extension(Path::new("out.txt")), Path::new("out.txt"));
    assert_eq!(with_csv_extension(Path::new("out")), Path::new("out.csv"));
}

#[test]
fn export_rejects_empty_path_and_missing_directory() {
    assert!(matches!(export_to_path(&[], Path::new("")), Err(ExportError::EmptyPath)));

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no-such-dir").join("tasks.csv");
    assert!(matches!(export_to_path(&[], &missing), Err(ExportError::Io { .. })));
}
