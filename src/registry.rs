use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::debug;

use crate::models::{
    parse_recurrence_days, Task, TaskId, TaskInput, TaskKind, TaskType, ValidTask,
    DEFAULT_REMINDER_MINUTES,
};
use crate::quotes::{QuoteSource, RandomQuotes};
use crate::utils::parse_task_time;

/// Registry handle shared by the presentation layer and the reminder scanner
pub type SharedRegistry = Arc<Mutex<Registry>>;

/// Lock a shared registry.
///
/// A panic while holding the lock cannot leave a task half-built (tasks are
/// pushed whole and only one-way flags change afterwards), so a poisoned
/// lock is recovered instead of propagated.
pub fn lock(registry: &SharedRegistry) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Name,
    Time,
    Category,
    Priority,
    TaskType,
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TaskField::Name => "name",
            TaskField::Time => "time",
            TaskField::Category => "category",
            TaskField::Priority => "priority",
            TaskField::TaskType => "task type",
        })
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(TaskField),
    #[error("Invalid time '{input}', expected YYYY-MM-DD HH:MM: {source}")]
    InvalidTime {
        input: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("Invalid reminder minutes '{0}', expected a whole number of minutes")]
    InvalidReminderMinutes(String),
    #[error("Recurring tasks need at least one recurrence day")]
    NoRecurrenceDays,
}

impl ValidationError {
    /// The form field the error refers to, if any
    pub fn field(&self) -> Option<TaskField> {
        match self {
            ValidationError::MissingField(field) => Some(*field),
            ValidationError::InvalidTime { .. } => Some(TaskField::Time),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("No task selected")]
    NothingSelected,
    #[error("Task {0} does not exist")]
    UnknownTask(TaskId),
}

/// All tasks of the running session, in insertion order
pub struct Registry {
    tasks: Vec<Task>,
    next_id: TaskId,
    default_reminder_minutes: u32,
    quotes: Box<dyn QuoteSource>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("tasks", &self.tasks)
            .field("next_id", &self.next_id)
            .field("default_reminder_minutes", &self.default_reminder_minutes)
            .finish_non_exhaustive()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
            default_reminder_minutes: DEFAULT_REMINDER_MINUTES,
            quotes: Box::new(RandomQuotes::default()),
        }
    }

    pub fn with_quote_source(mut self, quotes: impl QuoteSource + 'static) -> Self {
        self.quotes = Box::new(quotes);
        self
    }

    pub fn with_default_reminder_minutes(mut self, minutes: u32) -> Self {
        self.default_reminder_minutes = minutes;
        self
    }

    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(Mutex::new(self))
    }

    /// Validate `input` and append the resulting task.
    ///
    /// On error nothing is appended and no quote is drawn.
    pub fn add_task(&mut self, input: TaskInput) -> Result<TaskId, ValidationError> {
        let valid = self.validate(input)?;
        let quote = self.quotes.pick(valid.priority);
        let id = self.next_id;
        self.next_id += 1;

        debug!(id, name = %valid.name, time = %valid.time, "task added");
        self.tasks.push(Task::new(id, valid, quote));
        Ok(id)
    }

    fn validate(&self, input: TaskInput) -> Result<ValidTask, ValidationError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField(TaskField::Name));
        }
        let time_str = input.time.trim();
        if time_str.is_empty() {
            return Err(ValidationError::MissingField(TaskField::Time));
        }
        let category = input.category.ok_or(ValidationError::MissingField(TaskField::Category))?;
        let priority = input.priority.ok_or(ValidationError::MissingField(TaskField::Priority))?;
        let task_type = input.task_type.ok_or(ValidationError::MissingField(TaskField::TaskType))?;

        let time = parse_task_time(time_str).map_err(|source| ValidationError::InvalidTime {
            input: time_str.to_string(),
            source,
        })?;

        let kind = match task_type {
            TaskType::Daily => TaskKind::Daily {
                reminder_minutes: input.reminder_minutes.unwrap_or(self.default_reminder_minutes),
                reminder_shown: false,
            },
            TaskType::Recurring => {
                let recurrence_days = input
                    .recurrence_days
                    .as_deref()
                    .map(parse_recurrence_days)
                    .unwrap_or_default();
                if recurrence_days.is_empty() {
                    return Err(ValidationError::NoRecurrenceDays);
                }
                TaskKind::Recurring { recurrence_days }
            }
        };

        Ok(ValidTask {
            name: name.to_string(),
            time,
            description: input.description.trim().to_string(),
            category,
            priority,
            kind,
        })
    }

    /// Mark the referenced task completed. Completing twice is a no-op.
    pub fn mark_completed(&mut self, task: Option<TaskId>) -> Result<(), SelectionError> {
        let id = task.ok_or(SelectionError::NothingSelected)?;
        let task = self.get_mut(id).ok_or(SelectionError::UnknownTask(id))?;
        if !task.is_completed() {
            task.mark_completed();
            debug!(id, "task completed");
        }
        Ok(())
    }

    /// Tasks ordered by time; ties keep insertion order
    pub fn sorted_view(&self) -> Vec<&Task> {
        let mut view: Vec<&Task> = self.tasks.iter().collect();
        view.sort_by_key(|t| t.time());
        view
    }

    /// Completed over total, 0.0 for an empty registry
    pub fn completion_ratio(&self) -> f64 {
        if self.tasks.is_empty() {
            return 0.0;
        }
        self.completed_count() as f64 / self.tasks.len() as f64
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_completed()).count()
    }

    /// Tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id() == id)
    }

    #[cfg(test)]
    pub(crate) fn push_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub(crate) fn tasks_mut(&mut self) -> impl Iterator<Item = &mut Task> {
        self.tasks.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
