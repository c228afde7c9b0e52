use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::models::Task;
use crate::utils::format_task_time;

pub const EXPORT_HEADER: [&str; 6] = ["Name", "Time", "Description", "Category", "Priority", "Status"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to write export file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Export path is empty")]
    EmptyPath,
}

/// Write `tasks` as CSV, one row per task in the given order.
///
/// Returns the number of data rows written.
pub fn write_csv<W: Write>(tasks: &[Task], writer: W) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(EXPORT_HEADER)?;
    for task in tasks {
        csv_writer.write_record([
            task.name(),
            format_task_time(task.time()).as_str(),
            task.description(),
            task.category().label(),
            task.priority().label(),
            task.status_label(),
        ])?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(tasks.len())
}

/// Add a `.csv` extension when `path` has none
pub fn with_csv_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("csv")
    }
}

/// Export `tasks` to a file, creating or truncating it.
///
/// Returns the final path (see [`with_csv_extension`]) and the row count.
pub fn export_to_path(tasks: &[Task], path: &Path) -> Result<(PathBuf, usize), ExportError> {
    if path.as_os_str().is_empty() {
        return Err(ExportError::EmptyPath);
    }
    let path = with_csv_extension(path);
    let file = File::create(&path).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    let rows = write_csv(tasks, file)?;
    debug!(path = %path.display(), rows, "tasks exported");
    Ok((path, rows))
}
