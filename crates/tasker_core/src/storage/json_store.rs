use crate::error::AppError;
use crate::model::{Task, TaskList, TaskRecord};
use std::collections::HashSet;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// JSON-array persistence for a task collection at one explicit path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or blank file is an empty collection.
    pub fn load_all(&self) -> Result<TaskList, AppError> {
        let Some(content) = read_store_file(&self.path)? else {
            tracing::debug!(path = %self.path.display(), "store file missing, starting empty");
            return Ok(TaskList::new());
        };
        let tasks = decode_tasks(&content).map_err(|err| with_path(&self.path, err))?;

        tracing::debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    pub fn save_all(&self, tasks: &[Task]) -> Result<(), AppError> {
        let content = encode_tasks(tasks)?;
        write_atomic(&self.path, &content)?;
        tracing::debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}

/// Reads a store file; `None` when it does not exist yet. Bytes that are
/// not UTF-8 are a parse error, not an I/O failure.
pub(crate) fn read_store_file(path: &Path) -> Result<Option<String>, AppError> {
    if !path.exists() {
        return Ok(None);
    }

    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::InvalidData => Err(AppError::parse(format!(
            "{} is not valid UTF-8 text",
            path.display()
        ))),
        Err(err) => Err(AppError::io(format!("{}: {}", path.display(), err))),
    }
}

/// Prefixes decode errors with the file they came from.
pub(crate) fn with_path(path: &Path, err: AppError) -> AppError {
    match err {
        AppError::Parse(message) => {
            AppError::parse(format!("invalid JSON in {}: {}", path.display(), message))
        }
        AppError::Corrupt(message) => AppError::corrupt(format!("{}: {}", path.display(), message)),
        other => other,
    }
}

pub fn decode_tasks(content: &str) -> Result<TaskList, AppError> {
    if content.trim().is_empty() {
        return Ok(TaskList::new());
    }

    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|err| AppError::parse(err.to_string()))?;
    let serde_json::Value::Array(items) = value else {
        return Err(AppError::corrupt("expected a JSON array of tasks"));
    };

    let mut seen = HashSet::with_capacity(items.len());
    let mut tasks = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let position = index + 1;
        let record: TaskRecord = serde_json::from_value(item)
            .map_err(|err| AppError::corrupt(format!("record {position}: {err}")))?;
        let task = Task::from_record(record)
            .map_err(|err| AppError::corrupt(format!("record {position}: {}", err.message())))?;
        if !seen.insert(task.id()) {
            return Err(AppError::corrupt(format!(
                "record {position}: duplicate task id {}",
                task.id()
            )));
        }
        tasks.push(task);
    }

    Ok(TaskList::from_tasks(tasks))
}

pub fn encode_tasks(tasks: &[Task]) -> Result<String, AppError> {
    let records: Vec<TaskRecord> = tasks.iter().map(Task::to_record).collect();
    let mut content =
        serde_json::to_string_pretty(&records).map_err(|err| AppError::corrupt(err.to_string()))?;
    content.push('\n');
    Ok(content)
}

/// Writes through a temp file in the target directory and renames it over
/// `path`, so readers see either the old or the new content in full.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), AppError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .map_err(|err| AppError::io(format!("{}: {}", dir.display(), err)))?;

    // tempfile creates the file with mode 0600 on unix and persist keeps it.
    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|err| AppError::io(format!("failed to create temporary file: {err}")))?;
    tmp.write_all(content.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|err| AppError::io(format!("failed to write temporary file: {err}")))?;
    tmp.persist(path)
        .map_err(|err| AppError::io(format!("failed to replace {}: {}", path.display(), err)))?;

    Ok(())
}
