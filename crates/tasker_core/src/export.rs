use crate::error::AppError;
use crate::model::{Task, format_date};
use crate::query::{self, SortKey};
use crate::storage::json_store::{encode_tasks, write_atomic};
use std::fmt::Write as _;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("md") | Some("markdown") => Ok(Self::Markdown),
            _ => Err(AppError::invalid_input(
                "export path must end with .json or .md",
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "markdown",
        }
    }
}

/// Checklist of every task ordered by due date.
pub fn render_markdown(tasks: &[Task]) -> String {
    let mut out = String::from("# Tasks Export\n\n");
    for task in query::sort(tasks.to_vec(), SortKey::Due) {
        let checkbox = if task.is_completed() { "x" } else { " " };
        let _ = write!(out, "- [{checkbox}] {}", task.description());
        if let Some(project) = task.project() {
            let _ = write!(out, " [{project}]");
        }
        let _ = write!(out, " (priority: {}", task.priority());
        if let Some(due) = task.due() {
            let _ = write!(out, ", due {}", format_date(due));
        }
        out.push(')');
        if !task.tags().is_empty() {
            let _ = write!(out, " (tags: {})", task.tags().join(","));
        }
        out.push('\n');
    }
    out
}

pub fn export_tasks(tasks: &[Task], path: &Path) -> Result<ExportFormat, AppError> {
    let format = ExportFormat::from_path(path)?;
    let content = match format {
        ExportFormat::Json => encode_tasks(tasks)?,
        ExportFormat::Markdown => render_markdown(tasks),
    };
    write_atomic(path, &content)?;
    tracing::debug!(path = %path.display(), count = tasks.len(), ?format, "exported tasks");
    Ok(format)
}
