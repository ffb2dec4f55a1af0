use crate::error::AppError;
use crate::export::{self, ExportFormat};
use crate::model::{Task, TaskDraft, TaskUpdate};
use crate::query::{self, SortKey, TaskFilter};
use crate::storage::JsonStore;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct ListResult {
    pub tasks: Vec<Task>,
    /// Size of the stored collection before filtering.
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub format: ExportFormat,
    pub count: usize,
}

pub fn add_task(store: &JsonStore, draft: &TaskDraft<'_>) -> Result<Task, AppError> {
    let mut tasks = store.load_all()?;
    let task = Task::create(draft, &tasks)?;
    tasks.insert(task.clone())?;
    store.save_all(tasks.tasks())?;
    tracing::info!(id = task.id(), "added task");
    Ok(task)
}

pub fn list_tasks(
    store: &JsonStore,
    filter: &TaskFilter,
    sort: SortKey,
) -> Result<ListResult, AppError> {
    let tasks = store.load_all()?;
    let matching = filter.apply(tasks.tasks());
    Ok(ListResult {
        tasks: query::sort(matching, sort),
        total: tasks.len(),
    })
}

pub fn get_task_by_id(store: &JsonStore, id: u64) -> Result<Task, AppError> {
    store.load_all()?.find(id).cloned()
}

/// With `dry_run` the completed task is returned but nothing is written.
pub fn complete_task(store: &JsonStore, id: u64, dry_run: bool) -> Result<Task, AppError> {
    let mut tasks = store.load_all()?;
    let updated = tasks.find_mut(id)?.mark_complete()?.clone();
    if dry_run {
        return Ok(updated);
    }
    store.save_all(tasks.tasks())?;
    tracing::info!(id, "completed task");
    Ok(updated)
}

pub fn delete_task(store: &JsonStore, id: u64, dry_run: bool) -> Result<Task, AppError> {
    let tasks = store.load_all()?;
    let (removed, remaining) = tasks.delete(id)?;
    if dry_run {
        return Ok(removed);
    }
    store.save_all(remaining.tasks())?;
    tracing::info!(id, "deleted task");
    Ok(removed)
}

pub fn update_task(store: &JsonStore, id: u64, changes: &TaskUpdate<'_>) -> Result<Task, AppError> {
    let mut tasks = store.load_all()?;
    let updated = tasks.find_mut(id)?.update(changes)?.clone();
    store.save_all(tasks.tasks())?;
    tracing::info!(id, "updated task");
    Ok(updated)
}

pub fn search_tasks(store: &JsonStore, query: &str) -> Result<Vec<Task>, AppError> {
    let tasks = store.load_all()?;
    Ok(query::search(tasks.tasks(), query))
}

pub fn suggest_tasks(store: &JsonStore, limit: usize) -> Result<Vec<Task>, AppError> {
    let tasks = store.load_all()?;
    Ok(query::suggest(tasks.tasks(), limit))
}

pub fn export_tasks(store: &JsonStore, path: &Path) -> Result<ExportSummary, AppError> {
    let tasks = store.load_all()?;
    let format = export::export_tasks(tasks.tasks(), path)?;
    tracing::info!(path = %path.display(), count = tasks.len(), "exported tasks");
    Ok(ExportSummary {
        format,
        count: tasks.len(),
    })
}
