use crate::error::AppError;
use crate::model::Task;
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;
use time::Date;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    All,
    Pending,
    Completed,
}

impl View {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !task.is_completed(),
            Self::Completed => task.is_completed(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for View {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "pending" | "todo" => Ok(Self::Pending),
            "completed" | "done" => Ok(Self::Completed),
            _ => Err(AppError::invalid_input(
                "view must be one of: all, pending, completed",
            )),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Creation,
    Priority,
    Due,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Creation => "creation",
            Self::Priority => "priority",
            Self::Due => "due",
        }
    }
}

impl FromStr for SortKey {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "creation" | "created" => Ok(Self::Creation),
            "priority" => Ok(Self::Priority),
            "due" => Ok(Self::Due),
            _ => Err(AppError::invalid_input(
                "sort must be one of: creation, priority, due",
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn filter(tasks: &[Task], view: View) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| view.matches(task))
        .cloned()
        .collect()
}

/// Stable for equal keys. Priority ties keep their input order; due ties
/// fall back to creation time, and undated tasks go last.
pub fn sort(mut tasks: Vec<Task>, key: SortKey) -> Vec<Task> {
    match key {
        SortKey::Creation => tasks.sort_by_key(Task::created_at),
        SortKey::Priority => tasks.sort_by_key(|task| Reverse(task.priority().rank())),
        SortKey::Due => {
            tasks.sort_by_key(|task| (task.due().is_none(), task.due(), task.created_at()))
        }
    }
    tasks
}

/// Conjunction of every populated criterion. Due bounds are inclusive and
/// exclude undated tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub view: View,
    pub tags: Vec<String>,
    pub project: Option<String>,
    pub due_after: Option<Date>,
    pub due_before: Option<Date>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if !self.view.matches(task) {
            return false;
        }
        if !self.tags.iter().all(|tag| task.has_tag(tag)) {
            return false;
        }
        if let Some(project) = self.project.as_deref()
            && task.project() != Some(project)
        {
            return false;
        }
        if let Some(after) = self.due_after
            && !task.due().is_some_and(|due| due >= after)
        {
            return false;
        }
        if let Some(before) = self.due_before
            && !task.due().is_some_and(|due| due <= before)
        {
            return false;
        }
        true
    }

    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        tasks
            .iter()
            .filter(|task| self.matches(task))
            .cloned()
            .collect()
    }
}

/// Case-insensitive substring match on description and note.
pub fn search(tasks: &[Task], query: &str) -> Vec<Task> {
    let needle = query.trim().to_lowercase();
    tasks
        .iter()
        .filter(|task| {
            task.description().to_lowercase().contains(&needle)
                || task.note().to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Tags that lift a task ahead of otherwise equal suggestions.
const BOOST_TAGS: [&str; 2] = ["urgent", "school"];

/// Pending tasks ranked by due date, then priority, with tasks carrying a
/// boost tag ahead of otherwise equal ones.
pub fn suggest(tasks: &[Task], limit: usize) -> Vec<Task> {
    let mut pending = filter(tasks, View::Pending);
    pending.sort_by_key(|task| {
        (
            task.due().is_none(),
            task.due(),
            Reverse(task.priority().rank()),
            !BOOST_TAGS.iter().any(|tag| task.has_tag(tag)),
        )
    });
    pending.truncate(limit);
    pending
}
