use crate::error::AppError;
use crate::model::TaskList;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Sort weight; higher ranks come first when ordering by priority.
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    /// Absent or blank input falls back to [`Priority::Medium`].
    pub fn parse_optional(value: Option<&str>) -> Result<Self, AppError> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(raw) => raw.parse(),
        }
    }
}

impl FromStr for Priority {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == normalized)
            .ok_or_else(|| AppError::invalid_input("priority must be one of: low, medium, high"))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single task. Built only through [`Task::create`] or
/// [`Task::from_record`], which both enforce the field invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub(crate) id: u64,
    pub(crate) description: String,
    pub(crate) priority: Priority,
    pub(crate) due: Option<Date>,
    pub(crate) created_at: OffsetDateTime,
    pub(crate) completed_at: Option<OffsetDateTime>,
    pub(crate) tags: Vec<String>,
    pub(crate) project: Option<String>,
    pub(crate) note: String,
}

/// Input for [`Task::create`]. Optional fields are raw user text.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft<'a> {
    pub description: &'a str,
    pub priority: Option<&'a str>,
    pub due: Option<&'a str>,
    pub tags: Option<&'a str>,
    pub project: Option<&'a str>,
    pub note: Option<&'a str>,
}

impl<'a> TaskDraft<'a> {
    pub fn new(description: &'a str) -> Self {
        Self {
            description,
            ..Self::default()
        }
    }
}

/// Field changes for [`Task::update`]. An empty `due` or `project`
/// clears the field.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate<'a> {
    pub description: Option<&'a str>,
    pub priority: Option<&'a str>,
    pub due: Option<&'a str>,
    pub tags: Option<&'a str>,
    pub project: Option<&'a str>,
    pub note: Option<&'a str>,
}

impl TaskUpdate<'_> {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.priority.is_none()
            && self.due.is_none()
            && self.tags.is_none()
            && self.project.is_none()
            && self.note.is_none()
    }
}

impl Task {
    pub fn create(draft: &TaskDraft<'_>, existing: &TaskList) -> Result<Task, AppError> {
        let description = parse_description(draft.description)?;
        let priority = Priority::parse_optional(draft.priority)?;
        let due = match draft.due {
            Some(raw) => Some(parse_due_date(raw)?),
            None => None,
        };

        Ok(Task {
            id: existing.next_id(),
            description,
            priority,
            due,
            created_at: now_utc(),
            completed_at: None,
            tags: draft.tags.map(parse_tags).unwrap_or_default(),
            project: draft.project.and_then(normalize_project),
            note: draft.note.map(|note| note.trim().to_string()).unwrap_or_default(),
        })
    }

    /// One-way transition to completed; a second call is an error and
    /// leaves the first `completed_at` in place.
    pub fn mark_complete(&mut self) -> Result<&Task, AppError> {
        if self.completed_at.is_some() {
            return Err(AppError::already_completed(self.id));
        }
        self.completed_at = Some(now_utc());
        Ok(self)
    }

    pub fn update(&mut self, changes: &TaskUpdate<'_>) -> Result<&Task, AppError> {
        if changes.is_empty() {
            return Err(AppError::invalid_input("no changes requested"));
        }

        let description = changes.description.map(parse_description).transpose()?;
        let priority = changes.priority.map(str::parse::<Priority>).transpose()?;
        let due = match changes.due.map(str::trim) {
            Some("") => Some(None),
            Some(raw) => Some(Some(parse_due_date(raw)?)),
            None => None,
        };

        if let Some(description) = description {
            self.description = description;
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
        if let Some(due) = due {
            self.due = due;
        }
        if let Some(tags) = changes.tags {
            self.tags = parse_tags(tags);
        }
        if let Some(project) = changes.project {
            self.project = normalize_project(project);
        }
        if let Some(note) = changes.note {
            self.note = note.trim().to_string();
        }

        Ok(self)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn due(&self) -> Option<Date> {
        self.due
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub fn completed_at(&self) -> Option<OffsetDateTime> {
        self.completed_at
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.trim().to_lowercase();
        self.tags.iter().any(|candidate| *candidate == wanted)
    }

    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    pub fn note(&self) -> &str {
        &self.note
    }
}

/// Current UTC time cut to the microsecond precision records keep, so a
/// task compares equal to itself after a save and reload.
pub(crate) fn now_utc() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now.replace_nanosecond(now.microsecond() * 1_000)
        .unwrap_or(now)
}

pub(crate) fn parse_description(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("description is required"));
    }
    Ok(trimmed.to_string())
}

pub fn parse_due_date(raw: &str) -> Result<Date, AppError> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| AppError::invalid_input("due date must use YYYY-MM-DD format"))
}

/// Splits on `,` or `|`, lowercases, and drops blanks and repeats while
/// keeping first-seen order.
pub fn parse_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for part in raw.split([',', '|']) {
        let tag = part.trim().to_lowercase();
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

pub(crate) fn normalize_project(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
