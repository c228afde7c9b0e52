//! Background reminder scanner.
//!
//! A timer thread wakes at a fixed cadence, looks for daily tasks whose
//! reminder window `[time - reminder_minutes, time)` contains "now" and
//! pushes one [`Reminder`] per task onto a channel read by the UI.

use chrono::NaiveDateTime;
use crossbeam_channel::{select, tick, Receiver, Sender};
use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{Task, TaskId};
use crate::registry::{lock as lock_registry, Registry, SharedRegistry};
use crate::utils::local_now;

/// Cadence used when nothing else is configured
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(30);

/// Notification handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub task_id: TaskId,
    pub task_name: String,
    pub quote: String,
}

impl Reminder {
    pub fn message(&self) -> String {
        format!("Task '{}' is coming up!\n\n{}", self.task_name, self.quote)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("Reminder for task {task} is out of range ({minutes} minutes before its time)")]
    ReminderOutOfRange { task: TaskId, minutes: u32 },
}

/// Source of "now" for the scanner thread
pub trait Clock: Send + 'static {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        local_now()
    }
}

impl<F> Clock for F
where
    F: Fn() -> NaiveDateTime + Send + 'static,
{
    fn now(&self) -> NaiveDateTime {
        self()
    }
}

/// Decide whether `task` should be reminded about at `now`
fn evaluate(task: &Task, now: NaiveDateTime) -> Result<bool, ScanError> {
    let Some(minutes) = task.reminder_minutes() else {
        return Ok(false);
    };
    if task.is_completed() || task.reminder_shown() {
        return Ok(false);
    }
    let reminder_time = task
        .reminder_time()
        .ok_or(ScanError::ReminderOutOfRange { task: task.id(), minutes })?;

    Ok(reminder_time <= now && now < task.time())
}

/// One scan pass over `registry` at `now`.
///
/// Every task that is due gets its reminder flag set and is returned.
/// A task that cannot be evaluated is logged and skipped.
pub fn scan_due(registry: &mut Registry, now: NaiveDateTime) -> Vec<Reminder> {
    let mut due = Vec::new();
    for task in registry.tasks_mut() {
        match evaluate(task, now) {
            Ok(true) => {
                task.mark_reminder_shown();
                info!(id = task.id(), name = task.name(), "reminder due");
                due.push(Reminder {
                    task_id: task.id(),
                    task_name: task.name().to_string(),
                    quote: task.motivational_quote().to_string(),
                });
            }
            Ok(false) => {}
            Err(e) => warn!(error = %e, "skipping task during reminder scan"),
        }
    }
    due
}

/// Handle to the running scanner thread.
///
/// Dropping the handle stops the thread at its next wake-up without
/// waiting for it, so the scanner never holds the process open. The thread
/// also ends on its own once a reminder cannot be delivered because the
/// receiving side is gone.
pub struct Scanner {
    shutdown: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Scanner {
    /// Start scanning `registry` every `interval`, sending due reminders to `notify`.
    ///
    /// The first pass runs immediately.
    pub fn spawn<C: Clock>(
        registry: SharedRegistry,
        interval: Duration,
        clock: C,
        notify: Sender<Reminder>,
    ) -> io::Result<Self> {
        let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded::<()>(0);
        let handle = thread::Builder::new()
            .name("reminder-scanner".to_string())
            .spawn(move || run(registry, interval, clock, notify, shutdown_rx))?;

        Ok(Self {
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// True once the thread has exited
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }

    /// Stop the thread and wait for the pass in progress to finish
    pub fn stop(mut self) {
        self.shutdown.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("reminder scanner thread panicked");
            }
        }
    }
}

impl Drop for Scanner {
    fn drop(&mut self) {
        // Disconnecting the shutdown channel is enough; the thread is not joined
        self.shutdown.take();
    }
}

fn run<C: Clock>(
    registry: SharedRegistry,
    interval: Duration,
    clock: C,
    notify: Sender<Reminder>,
    shutdown: Receiver<()>,
) {
    debug!(interval_secs = interval.as_secs_f64(), "reminder scanner started");
    let ticker = tick(interval);

    loop {
        let due = {
            let mut guard = lock_registry(&registry);
            scan_due(&mut guard, clock.now())
        };
        for reminder in due {
            if notify.send(reminder).is_err() {
                debug!("reminder receiver gone, scanner exiting");
                return;
            }
        }

        select! {
            recv(ticker) -> _ => {}
            recv(shutdown) -> _ => break,
        }
    }
    debug!("reminder scanner stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Priority, TaskKind, ValidTask};

    fn daily_at(time: NaiveDateTime, reminder_minutes: u32) -> Task {
        let fields = ValidTask {
            name: "Edge".to_string(),
            time,
            description: String::new(),
            category: Category::Work,
            priority: Priority::Low,
            kind: TaskKind::Daily { reminder_minutes, reminder_shown: false },
        };
        Task::new(1, fields, "q".to_string())
    }

    #[test]
    fn reminder_before_earliest_time_is_an_error() {
        let task = daily_at(NaiveDateTime::MIN, 10);
        assert_eq!(
            evaluate(&task, NaiveDateTime::MIN),
            Err(ScanError::ReminderOutOfRange { task: 1, minutes: 10 })
        );
    }

    #[test]
    fn out_of_range_task_does_not_stop_the_pass() {
        let mut registry = Registry::new();
        registry.push_task(daily_at(NaiveDateTime::MIN, 10));
        let time = NaiveDateTime::parse_from_str("2024-01-10 09:00", "%Y-%m-%d %H:%M").unwrap();
        let fields = ValidTask {
            name: "Submit report".to_string(),
            time,
            description: String::new(),
            category: Category::Work,
            priority: Priority::High,
            kind: TaskKind::Daily { reminder_minutes: 10, reminder_shown: false },
        };
        registry.push_task(Task::new(2, fields, "q".to_string()));

        let now = NaiveDateTime::parse_from_str("2024-01-10 08:55", "%Y-%m-%d %H:%M").unwrap();
        let due = scan_due(&mut registry, now);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].task_id, 2);
        assert!(!registry.get(1).unwrap().reminder_shown());
        assert!(registry.get(2).unwrap().reminder_shown());
    }

    #[test]
    fn window_is_half_open() {
        let time = NaiveDateTime::parse_from_str("2024-01-10 09:00", "%Y-%m-%d %H:%M").unwrap();
        let task = daily_at(time, 10);
        let at = |hm: &str| {
            NaiveDateTime::parse_from_str(&format!("2024-01-10 {}", hm), "%Y-%m-%d %H:%M").unwrap()
        };
        assert_eq!(evaluate(&task, at("08:49")), Ok(false));
        assert_eq!(evaluate(&task, at("08:50")), Ok(true));
        assert_eq!(evaluate(&task, at("08:59")), Ok(true));
        assert_eq!(evaluate(&task, at("09:00")), Ok(false));
    }
}
