pub mod cli;
pub mod config;
pub mod export;
pub mod logging;
pub mod models;
pub mod quotes;
pub mod registry;
pub mod scanner;
pub mod tui;
pub mod utils;

pub use config::Config;
pub use models::{Category, Priority, Task, TaskId, TaskInput, TaskKind, TaskType};
pub use registry::{Registry, SelectionError, SharedRegistry, ValidationError};
pub use scanner::{Reminder, Scanner};
pub use utils::Profile;
