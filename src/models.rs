use chrono::{NaiveDateTime, TimeDelta};
use std::fmt;
use std::str::FromStr;

use crate::utils::format_task_time;

pub type TaskId = u64;

/// Default offset, in minutes, between a daily task's reminder and its time
pub const DEFAULT_REMINDER_MINUTES: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Work,
    Study,
    Personal,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Work, Category::Study, Category::Personal];

    pub fn label(self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Study => "Study",
            Category::Personal => "Personal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskType {
    Daily,
    Recurring,
}

impl TaskType {
    pub const ALL: [TaskType; 2] = [TaskType::Daily, TaskType::Recurring];

    pub fn label(self) -> &'static str {
        match self {
            TaskType::Daily => "Daily",
            TaskType::Recurring => "Recurring",
        }
    }
}

macro_rules! label_enum_impls {
    ($ty:ident, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $ty::ALL
                    .into_iter()
                    .find(|v| v.label().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| format!("Unknown {}: '{}'", $what, wanted))
            }
        }
    };
}

label_enum_impls!(Category, "category");
label_enum_impls!(Priority, "priority");
label_enum_impls!(TaskType, "task type");

/// The per-kind part of a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    Daily {
        reminder_minutes: u32,
        reminder_shown: bool,
    },
    Recurring {
        /// Weekday labels as typed by the user; display only
        recurrence_days: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    name: String,
    time: NaiveDateTime,
    description: String,
    category: Category,
    priority: Priority,
    completed: bool,
    motivational_quote: String,
    kind: TaskKind,
}

impl Task {
    pub(crate) fn new(
        id: TaskId,
        fields: ValidTask,
        motivational_quote: String,
    ) -> Self {
        Self {
            id,
            name: fields.name,
            time: fields.time,
            description: fields.description,
            category: fields.category,
            priority: fields.priority,
            completed: false,
            motivational_quote,
            kind: fields.kind,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn time(&self) -> NaiveDateTime {
        self.time
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn motivational_quote(&self) -> &str {
        &self.motivational_quote
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn task_type(&self) -> TaskType {
        match self.kind {
            TaskKind::Daily { .. } => TaskType::Daily,
            TaskKind::Recurring { .. } => TaskType::Recurring,
        }
    }

    /// Always false for recurring tasks
    pub fn reminder_shown(&self) -> bool {
        matches!(self.kind, TaskKind::Daily { reminder_shown: true, .. })
    }

    pub fn reminder_minutes(&self) -> Option<u32> {
        match self.kind {
            TaskKind::Daily { reminder_minutes, .. } => Some(reminder_minutes),
            TaskKind::Recurring { .. } => None,
        }
    }

    /// Start of the reminder window.
    ///
    /// `None` for recurring tasks, or when the offset would leave the
    /// representable date range.
    pub fn reminder_time(&self) -> Option<NaiveDateTime> {
        let minutes = self.reminder_minutes()?;
        TimeDelta::try_minutes(i64::from(minutes))
            .and_then(|offset| self.time.checked_sub_signed(offset))
    }

    /// One-way: a completed task never becomes pending again
    pub(crate) fn mark_completed(&mut self) {
        self.completed = true;
    }

    /// Returns false when the task is not a daily task
    pub(crate) fn mark_reminder_shown(&mut self) -> bool {
        match &mut self.kind {
            TaskKind::Daily { reminder_shown, .. } => {
                *reminder_shown = true;
                true
            }
            TaskKind::Recurring { .. } => false,
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.completed { "Completed" } else { "Pending" }
    }

    pub fn display_info(&self) -> String {
        let mut info = format!(
            "{} ({}) - {} - {}: {}\nQuote: {}",
            self.name,
            self.priority,
            format_task_time(self.time),
            self.category,
            self.description,
            self.motivational_quote,
        );
        match &self.kind {
            TaskKind::Daily { reminder_minutes, .. } => {
                info.push_str(&format!("\nReminder: {} minutes before", reminder_minutes));
            }
            TaskKind::Recurring { recurrence_days } => {
                info.push_str(&format!("\nRepeats: {}", recurrence_days.join(", ")));
            }
        }
        info
    }
}

/// Raw task creation input as collected by a front-end.
///
/// Enum fields are optional so an unselected value can be reported as a
/// missing field rather than silently defaulted.
#[derive(Debug, Clone, Default)]
pub struct TaskInput {
    pub name: String,
    /// `YYYY-MM-DD HH:MM`
    pub time: String,
    pub description: String,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub task_type: Option<TaskType>,
    /// Daily only; falls back to the registry default
    pub reminder_minutes: Option<u32>,
    /// Recurring only; comma-separated
    pub recurrence_days: Option<String>,
}

/// Input that passed validation, ready to become a `Task`
#[derive(Debug, Clone)]
pub(crate) struct ValidTask {
    pub name: String,
    pub time: NaiveDateTime,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub kind: TaskKind,
}

/// Split a comma-separated list of days, dropping blanks
pub fn parse_recurrence_days(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!("work".parse::<Category>(), Ok(Category::Work));
        assert_eq!(" HIGH ".parse::<Priority>(), Ok(Priority::High));
        assert_eq!("recurring".parse::<TaskType>(), Ok(TaskType::Recurring));
        assert!("Someday".parse::<Priority>().is_err());
    }

    #[test]
    fn recurrence_days_drop_blanks() {
        assert_eq!(
            parse_recurrence_days(" Monday, ,Wednesday,, Friday "),
            vec!["Monday", "Wednesday", "Friday"]
        );
        assert!(parse_recurrence_days(" , ").is_empty());
    }
}
