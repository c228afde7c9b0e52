use crate::export::export_to_path;
use crate::models::{Category, Priority, Task, TaskId, TaskInput, TaskType};
use crate::registry::{lock as lock_registry, SelectionError, SharedRegistry, TaskField, ValidationError};
use crate::scanner::Reminder;
use crate::tui::widgets::input::TextInput;
use crate::utils::expand_path;
use crate::Config;
use chrono::NaiveDate;
use crossbeam_channel::Receiver;
use ratatui::widgets::TableState;
use std::collections::VecDeque;
use std::time::Instant;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    Create,
    Export,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Reminder,
    Warning,
}

/// Modal message, shown one at a time in arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn task_added(task: &Task) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: "Task added".to_string(),
            body: format!("Task '{}' was added!\n\n{}", task.name(), task.motivational_quote()),
        }
    }

    pub fn reminder(reminder: &Reminder) -> Self {
        Self {
            kind: NoticeKind::Reminder,
            title: "Reminder".to_string(),
            body: reminder.message(),
        }
    }

    pub fn warning(title: &str, body: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            title: title.to_string(),
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFormField {
    Name,
    Time,
    Description,
    Category,
    Priority,
    Type,
    ReminderMinutes,
    RecurrenceDays,
}

impl TaskFormField {
    pub fn label(self) -> &'static str {
        match self {
            TaskFormField::Name => "Name",
            TaskFormField::Time => "Time (YYYY-MM-DD HH:MM)",
            TaskFormField::Description => "Description",
            TaskFormField::Category => "Category",
            TaskFormField::Priority => "Priority",
            TaskFormField::Type => "Type",
            TaskFormField::ReminderMinutes => "Reminder (minutes before)",
            TaskFormField::RecurrenceDays => "Repeat on (comma-separated)",
        }
    }

    pub fn is_choice(self) -> bool {
        matches!(self, TaskFormField::Category | TaskFormField::Priority | TaskFormField::Type)
    }
}

impl From<TaskField> for TaskFormField {
    fn from(field: TaskField) -> Self {
        match field {
            TaskField::Name => TaskFormField::Name,
            TaskField::Time => TaskFormField::Time,
            TaskField::Category => TaskFormField::Category,
            TaskField::Priority => TaskFormField::Priority,
            TaskField::TaskType => TaskFormField::Type,
        }
    }
}

/// Step through `all` from `current`, entering at either end when unset
fn cycle<T: Copy + PartialEq>(all: &[T], current: Option<T>, forward: bool) -> Option<T> {
    let len = all.len();
    if len == 0 {
        return None;
    }
    let next = match current.and_then(|c| all.iter().position(|v| *v == c)) {
        None if forward => 0,
        None => len - 1,
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
    };
    Some(all[next])
}

#[derive(Debug, Clone)]
pub struct TaskForm {
    pub current_field: TaskFormField,
    pub name: TextInput,
    pub time: TextInput,
    pub description: TextInput,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub task_type: Option<TaskType>,
    pub reminder_minutes: TextInput,
    pub recurrence_days: TextInput,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            current_field: TaskFormField::Name,
            name: TextInput::new(),
            time: TextInput::new(),
            description: TextInput::new(),
            category: None,
            priority: None,
            task_type: None,
            reminder_minutes: TextInput::new(),
            recurrence_days: TextInput::new(),
        }
    }
}

impl TaskForm {
    /// Fields shown for the current task type, in tab order
    pub fn visible_fields(&self) -> Vec<TaskFormField> {
        let mut fields = vec![
            TaskFormField::Name,
            TaskFormField::Time,
            TaskFormField::Description,
            TaskFormField::Category,
            TaskFormField::Priority,
            TaskFormField::Type,
        ];
        match self.task_type {
            Some(TaskType::Daily) => fields.push(TaskFormField::ReminderMinutes),
            Some(TaskType::Recurring) => fields.push(TaskFormField::RecurrenceDays),
            None => {}
        }
        fields
    }

    pub fn next_field(&mut self) {
        let fields = self.visible_fields();
        let i = fields.iter().position(|f| *f == self.current_field).unwrap_or(0);
        self.current_field = fields[(i + 1) % fields.len()];
    }

    pub fn previous_field(&mut self) {
        let fields = self.visible_fields();
        let i = fields.iter().position(|f| *f == self.current_field).unwrap_or(0);
        self.current_field = fields[(i + fields.len() - 1) % fields.len()];
    }

    /// The text input behind the current field, if it is a text field
    pub fn current_input(&mut self) -> Option<&mut TextInput> {
        match self.current_field {
            TaskFormField::Name => Some(&mut self.name),
            TaskFormField::Time => Some(&mut self.time),
            TaskFormField::Description => Some(&mut self.description),
            TaskFormField::ReminderMinutes => Some(&mut self.reminder_minutes),
            TaskFormField::RecurrenceDays => Some(&mut self.recurrence_days),
            TaskFormField::Category | TaskFormField::Priority | TaskFormField::Type => None,
        }
    }

    pub fn input(&self, field: TaskFormField) -> Option<&TextInput> {
        match field {
            TaskFormField::Name => Some(&self.name),
            TaskFormField::Time => Some(&self.time),
            TaskFormField::Description => Some(&self.description),
            TaskFormField::ReminderMinutes => Some(&self.reminder_minutes),
            TaskFormField::RecurrenceDays => Some(&self.recurrence_days),
            TaskFormField::Category | TaskFormField::Priority | TaskFormField::Type => None,
        }
    }

    /// Display text of a choice field, `None` while unset
    pub fn choice_label(&self, field: TaskFormField) -> Option<&'static str> {
        match field {
            TaskFormField::Category => self.category.map(Category::label),
            TaskFormField::Priority => self.priority.map(Priority::label),
            TaskFormField::Type => self.task_type.map(TaskType::label),
            _ => None,
        }
    }

    /// Cycle the value of the current choice field
    pub fn cycle_choice(&mut self, forward: bool) {
        match self.current_field {
            TaskFormField::Category => self.category = cycle(&Category::ALL, self.category, forward),
            TaskFormField::Priority => self.priority = cycle(&Priority::ALL, self.priority, forward),
            TaskFormField::Type => self.task_type = cycle(&TaskType::ALL, self.task_type, forward),
            _ => {}
        }
    }

    /// Put `date` into the time field, keeping a typed time of day or using 09:00
    pub fn use_date(&mut self, date: NaiveDate) {
        let time_part = self
            .time
            .value()
            .trim()
            .split_once(' ')
            .map(|(_, t)| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "09:00".to_string());
        self.time.set(format!("{} {}", date.format("%Y-%m-%d"), time_part));
    }

    /// Collect the form into creation input.
    ///
    /// Only the reminder minutes are checked here since they arrive as text;
    /// everything else is validated by the registry.
    pub fn to_input(&self) -> Result<TaskInput, ValidationError> {
        let reminder_minutes = match self.task_type {
            Some(TaskType::Daily) if !self.reminder_minutes.is_blank() => {
                let raw = self.reminder_minutes.value().trim();
                Some(
                    raw.parse::<u32>()
                        .map_err(|_| ValidationError::InvalidReminderMinutes(raw.to_string()))?,
                )
            }
            _ => None,
        };
        let recurrence_days = match self.task_type {
            Some(TaskType::Recurring) => Some(self.recurrence_days.value().to_string()),
            _ => None,
        };

        Ok(TaskInput {
            name: self.name.value().to_string(),
            time: self.time.value().to_string(),
            description: self.description.value().to_string(),
            category: self.category,
            priority: self.priority,
            task_type: self.task_type,
            reminder_minutes,
            recurrence_days,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

pub struct App {
    pub config: Config,
    pub registry: SharedRegistry,
    reminders: Receiver<Reminder>,
    pub mode: Mode,
    /// Sorted snapshot of the registry used for drawing
    pub rows: Vec<Task>,
    pub completed_count: usize,
    pub completion_ratio: f64,
    pub selected: Option<TaskId>,
    pub list_state: TableState,
    pub show_details: bool,
    pub form: TaskForm,
    pub export_input: TextInput,
    pub notices: VecDeque<Notice>,
    pub status: StatusState,
}

impl App {
    pub fn new(config: Config, registry: SharedRegistry, reminders: Receiver<Reminder>) -> Self {
        let mut app = Self {
            config,
            registry,
            reminders,
            mode: Mode::View,
            rows: Vec::new(),
            completed_count: 0,
            completion_ratio: 0.0,
            selected: None,
            list_state: TableState::default(),
            show_details: true,
            form: TaskForm::default(),
            export_input: TextInput::new(),
            notices: VecDeque::new(),
            status: StatusState::default(),
        };
        app.refresh();
        app
    }

    /// Re-read the registry and keep the selection on the same task
    pub fn refresh(&mut self) {
        {
            let registry = lock_registry(&self.registry);
            self.rows = registry.sorted_view().into_iter().cloned().collect();
            self.completed_count = registry.completed_count();
            self.completion_ratio = registry.completion_ratio();
        }

        let index = self
            .selected
            .and_then(|id| self.rows.iter().position(|t| t.id() == id))
            .or(if self.rows.is_empty() { None } else { Some(0) });
        self.selected = index.map(|i| self.rows[i].id());
        self.list_state.select(index);
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let id = self.selected?;
        self.rows.iter().find(|t| t.id() == id)
    }

    fn select_index(&mut self, index: usize) {
        if let Some(task) = self.rows.get(index) {
            self.selected = Some(task.id());
            self.list_state.select(Some(index));
        }
    }

    pub fn next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = self.list_state.selected().map(|i| (i + 1) % self.rows.len()).unwrap_or(0);
        self.select_index(i);
    }

    pub fn previous(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let len = self.rows.len();
        let i = self.list_state.selected().map(|i| (i + len - 1) % len).unwrap_or(0);
        self.select_index(i);
    }

    pub fn toggle_details(&mut self) {
        self.show_details = !self.show_details;
    }

    pub fn complete_selected(&mut self) {
        let result = lock_registry(&self.registry).mark_completed(self.selected);
        match result {
            Ok(()) => {
                if let Some(name) = self.selected_task().map(|t| t.name().to_string()) {
                    self.set_status_message(format!("Task '{}' marked as completed", name));
                }
            }
            Err(SelectionError::NothingSelected) => {
                self.notices.push_back(Notice::warning("Nothing selected", "Select a task in the list first"));
            }
            Err(e) => self.set_status_message(e.to_string()),
        }
        self.refresh();
    }

    pub fn start_create(&mut self) {
        self.mode = Mode::Create;
    }

    pub fn cancel(&mut self) {
        self.mode = Mode::View;
    }

    pub fn submit_form(&mut self) {
        let added = self.form.to_input().and_then(|input| {
            let mut registry = lock_registry(&self.registry);
            let id = registry.add_task(input)?;
            Ok(registry.get(id).map(Notice::task_added).map(|notice| (id, notice)))
        });

        match added {
            Ok(Some((id, notice))) => {
                self.notices.push_back(notice);
                self.form = TaskForm::default();
                self.mode = Mode::View;
                self.selected = Some(id);
                self.refresh();
            }
            Ok(None) => self.refresh(),
            Err(e) => {
                if let Some(field) = e.field() {
                    self.form.current_field = field.into();
                }
                self.set_status_message(format!("Validation error: {}", e));
            }
        }
    }

    pub fn start_export(&mut self) {
        let path = self.config.get_export_path();
        self.export_input.set(path.to_string_lossy());
        self.mode = Mode::Export;
    }

    pub fn submit_export(&mut self) {
        let path = expand_path(self.export_input.value().trim());
        // Copy out so the file write happens without holding the lock
        let tasks = lock_registry(&self.registry).tasks().to_vec();
        match export_to_path(&tasks, &path) {
            Ok((written, rows)) => {
                self.mode = Mode::View;
                self.set_status_message(format!("Exported {} tasks to {}", rows, written.display()));
            }
            Err(e) => {
                warn!(error = %e, "export failed");
                self.notices.push_back(Notice::warning("Export failed", e.to_string()));
            }
        }
    }

    pub fn toggle_help(&mut self) {
        self.mode = if self.mode == Mode::Help { Mode::View } else { Mode::Help };
    }

    /// Move reminders from the scanner channel into the notice queue
    pub fn drain_reminders(&mut self) {
        let mut received = false;
        for reminder in self.reminders.try_iter() {
            self.notices.push_back(Notice::reminder(&reminder));
            received = true;
        }
        if received {
            self.refresh();
        }
    }

    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status.message = Some(message);
        self.status.message_time = Some(Instant::now());
    }

    pub fn clear_status_message(&mut self) {
        self.status.message = None;
        self.status.message_time = None;
    }

    pub fn check_status_message_timeout(&mut self) {
        if let Some(time) = self.status.message_time {
            if time.elapsed() >= self.config.status_message_timeout() {
                self.clear_status_message();
            }
        }
    }

    /// Key hints for the status bar in the current mode
    pub fn key_hints(&self) -> Vec<String> {
        let kb = &self.config.key_bindings;
        match self.mode {
            Mode::View => vec![
                format!("{}: New", kb.new),
                format!("{}: Complete", kb.complete),
                format!("{}: Export", kb.export),
                format!("{}: Details", kb.details),
                format!("{}: Help", kb.help),
                format!("{}: Quit", kb.quit),
            ],
            Mode::Create => vec![
                "Tab/↓: Next field".to_string(),
                "←/→: Choose".to_string(),
                "Ctrl+d: Today".to_string(),
                "Enter: Add".to_string(),
                "Esc: Cancel".to_string(),
            ],
            Mode::Export => vec!["Enter: Export".to_string(), "Esc: Cancel".to_string()],
            Mode::Help => vec![format!("Esc/{}: Close", kb.help)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_enters_from_either_end() {
        assert_eq!(cycle(&Priority::ALL, None, true), Some(Priority::Low));
        assert_eq!(cycle(&Priority::ALL, None, false), Some(Priority::High));
        assert_eq!(cycle(&Priority::ALL, Some(Priority::High), true), Some(Priority::Low));
        assert_eq!(cycle(&Priority::ALL, Some(Priority::Low), false), Some(Priority::High));
    }

    #[test]
    fn form_fields_follow_task_type() {
        let mut form = TaskForm::default();
        assert_eq!(form.visible_fields().len(), 6);
        form.task_type = Some(TaskType::Recurring);
        assert_eq!(form.visible_fields().last(), Some(&TaskFormField::RecurrenceDays));
        form.current_field = TaskFormField::RecurrenceDays;
        form.next_field();
        assert_eq!(form.current_field, TaskFormField::Name);
        form.previous_field();
        assert_eq!(form.current_field, TaskFormField::RecurrenceDays);
    }

    #[test]
    fn use_date_keeps_typed_time() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let mut form = TaskForm::default();
        form.use_date(date);
        assert_eq!(form.time.value(), "2024-01-10 09:00");

        form.time.set("2023-05-05 14:30");
        form.use_date(date);
        assert_eq!(form.time.value(), "2024-01-10 14:30");
    }

    #[test]
    fn bad_reminder_minutes_are_rejected() {
        let mut form = TaskForm::default();
        form.task_type = Some(TaskType::Daily);
        form.reminder_minutes.set("ten");
        assert!(matches!(
            form.to_input(),
            Err(ValidationError::InvalidReminderMinutes(raw)) if raw == "ten"
        ));

        form.reminder_minutes.set(" 15 ");
        assert_eq!(form.to_input().unwrap().reminder_minutes, Some(15));

        form.reminder_minutes.clear();
        assert_eq!(form.to_input().unwrap().reminder_minutes, None);
    }
}
