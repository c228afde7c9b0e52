use dayplan::quotes::FixedQuote;
use dayplan::registry::TaskField;
use dayplan::{Category, Priority, Registry, SelectionError, TaskInput, TaskKind, TaskType, ValidationError};

fn registry() -> Registry {
    Registry::new().with_quote_source(FixedQuote("Stay sharp".to_string()))
}

fn daily(name: &str, time: &str) -> TaskInput {
    TaskInput {
        name: name.to_string(),
        time: time.to_string(),
        description: "details".to_string(),
        category: Some(Category::Work),
        priority: Some(Priority::High),
        task_type: Some(TaskType::Daily),
        reminder_minutes: Some(10),
        recurrence_days: None,
    }
}

#[test]
fn add_task_appends_pending_task_with_quote() {
    let mut registry = registry();
    let id = registry.add_task(daily("Submit report", "2024-01-10 09:00")).unwrap();

    assert_eq!(registry.len(), 1);
    let task = registry.get(id).unwrap();
    assert_eq!(task.name(), "Submit report");
    assert!(!task.is_completed());
    assert_eq!(task.motivational_quote(), "Stay sharp");
    assert_eq!(
        task.kind(),
        &TaskKind::Daily { reminder_minutes: 10, reminder_shown: false }
    );
}

#[test]
fn ids_are_unique_and_increasing() {
    let mut registry = registry();
    let a = registry.add_task(daily("A", "2024-01-10 09:00")).unwrap();
    let b = registry.add_task(daily("B", "2024-01-10 09:00")).unwrap();
    assert!(b > a);
}

#[test]
fn sorted_view_orders_by_time_and_keeps_ties_in_insertion_order() {
    let mut registry = registry();
    registry.add_task(daily("Late", "2024-01-10 18:00")).unwrap();
    registry.add_task(daily("Early", "2024-01-10 07:30")).unwrap();
    registry.add_task(daily("Tie one", "2024-01-10 12:00")).unwrap();
    registry.add_task(daily("Tie two", "2024-01-10 12:00")).unwrap();

    let names: Vec<&str> = registry.sorted_view().iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["Early", "Tie one", "Tie two", "Late"]);

    // Storage order is untouched
    let stored: Vec<&str> = registry.tasks().iter().map(|t| t.name()).collect();
    assert_eq!(stored, vec!["Late", "Early", "Tie one", "Tie two"]);
}

#[test]
fn invalid_time_is_rejected_without_adding() {
    let mut registry = registry();
    let err = registry.add_task(daily("Bad", "10/01/2024 9am")).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidTime { .. }));
    assert_eq!(err.field(), Some(TaskField::Time));
    assert!(registry.is_empty());
}

#[test]
fn missing_fields_are_reported_in_order() {
    let mut registry = registry();

    let mut input = daily("  ", "2024-01-10 09:00");
    input.category = None;
    assert!(matches!(
        registry.add_task(input).unwrap_err(),
        ValidationError::MissingField(TaskField::Name)
    ));

    let input = daily("Name", "   ");
    assert!(matches!(
        registry.add_task(input).unwrap_err(),
        ValidationError::MissingField(TaskField::Time)
    ));

    let mut input = daily("Name", "2024-01-10 09:00");
    input.priority = None;
    assert!(matches!(
        registry.add_task(input).unwrap_err(),
        ValidationError::MissingField(TaskField::Priority)
    ));

    let mut input = daily("Name", "2024-01-10 09:00");
    input.task_type = None;
    assert!(matches!(
        registry.add_task(input).unwrap_err(),
        ValidationError::MissingField(TaskField::TaskType)
    ));

    assert!(registry.is_empty());
}

#[test]
fn description_is_optional() {
    let mut registry = registry();
    let mut input = daily("No notes", "2024-01-10 09:00");
    input.description = String::new();
    let id = registry.add_task(input).unwrap();
    assert_eq!(registry.get(id).unwrap().description(), "");
}

#[test]
fn recurring_task_needs_days() {
    let mut registry = registry();
    let mut input = daily("Gym", "2024-01-10 19:00");
    input.task_type = Some(TaskType::Recurring);
    input.recurrence_days = Some(" , ".to_string());
    assert!(matches!(
        registry.add_task(input.clone()).unwrap_err(),
        ValidationError::NoRecurrenceDays
    ));
    assert!(registry.is_empty());

    input.recurrence_days = Some("Monday, Thursday".to_string());
    let id = registry.add_task(input).unwrap();
    let task = registry.get(id).unwrap();
    assert_eq!(task.task_type(), TaskType::Recurring);
    assert_eq!(task.reminder_minutes(), None);
    assert!(task.display_info().ends_with("Repeats: Monday, Thursday"));
}

#[test]
fn daily_task_without_minutes_uses_registry_default() {
    let mut registry = registry().with_default_reminder_minutes(25);
    let mut input = daily("Standup", "2024-01-10 09:30");
    input.reminder_minutes = None;
    let id = registry.add_task(input).unwrap();
    assert_eq!(registry.get(id).unwrap().reminder_minutes(), Some(25));
}

#[test]
fn mark_completed_is_idempotent() {
    let mut registry = registry();
    let id = registry.add_task(daily("Once", "2024-01-10 09:00")).unwrap();

    registry.mark_completed(Some(id)).unwrap();
    registry.mark_completed(Some(id)).unwrap();

    assert!(registry.get(id).unwrap().is_completed());
    assert_eq!(registry.completed_count(), 1);
    assert_eq!(registry.get(id).unwrap().status_label(), "Completed");
}

#[test]
fn mark_completed_reports_bad_selection() {
    let mut registry = registry();
    assert_eq!(registry.mark_completed(None), Err(SelectionError::NothingSelected));
    assert_eq!(registry.mark_completed(Some(99)), Err(SelectionError::UnknownTask(99)));
}

#[test]
fn completion_ratio_tracks_completed_share() {
    let mut registry = registry();
    assert_eq!(registry.completion_ratio(), 0.0);

    let first = registry.add_task(daily("One", "2024-01-10 09:00")).unwrap();
    registry.add_task(daily("Two", "2024-01-10 10:00")).unwrap();
    registry.add_task(daily("Three", "2024-01-10 11:00")).unwrap();
    assert_eq!(registry.completion_ratio(), 0.0);

    registry.mark_completed(Some(first)).unwrap();
    assert!((registry.completion_ratio() - 1.0 / 3.0).abs() < f64::EPSILON);
}

#[test]
fn display_info_includes_reminder_and_quote() {
    let mut registry = registry();
    let id = registry.add_task(daily("Submit report", "2024-01-10 09:00")).unwrap();
    let info = registry.get(id).unwrap().display_info();
    assert_eq!(
        info,
        "Submit report (High) - 2024-01-10 09:00 - Work: details\nQuote: Stay sharp\nReminder: 10 minutes before"
    );
}
