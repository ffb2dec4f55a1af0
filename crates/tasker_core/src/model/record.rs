use crate::error::AppError;
use crate::model::task::{Priority, Task, normalize_project, parse_description, parse_tags};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Plain on-disk shape of a [`Task`]. Field order here is the field
/// order written to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default)]
    pub id: u64,
    #[serde(default, alias = "title")]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub due: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    /// Older files flag completion as `done`; read but never written.
    #[serde(default, skip_serializing)]
    pub done: Option<bool>,
}

impl Task {
    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            id: self.id,
            description: self.description.clone(),
            created_at: Some(format_timestamp(self.created_at)),
            priority: Some(self.priority.as_str().to_string()),
            due: self.due.map(format_date),
            completed: self.is_completed(),
            completed_at: self.completed_at.map(format_timestamp),
            tags: Some(self.tags.clone()),
            project: self.project.clone(),
            note: Some(self.note.clone()),
            done: None,
        }
    }

    pub fn from_record(record: TaskRecord) -> Result<Task, AppError> {
        if record.id == 0 {
            return Err(AppError::invalid_input("task id must be a positive integer"));
        }

        let created_at = record
            .created_at
            .as_deref()
            .ok_or_else(|| AppError::invalid_input("task record is missing created_at"))
            .and_then(|raw| {
                parse_timestamp(raw).map_err(|_| {
                    AppError::invalid_input(format!("task record has invalid created_at '{raw}'"))
                })
            })?;

        let description = parse_description(&record.description)?;
        let priority = Priority::parse_optional(record.priority.as_deref())?;
        let due = match record.due.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                Date::parse(raw, format_description!("[year]-[month]-[day]")).map_err(|_| {
                    AppError::invalid_input(format!("task record has invalid due date '{raw}'"))
                })?,
            ),
        };

        let completed = record.completed || record.done == Some(true);
        let completed_at = if completed {
            match record.completed_at.as_deref() {
                Some(raw) => Some(parse_timestamp(raw).map_err(|_| {
                    AppError::invalid_input(format!("task record has invalid completed_at '{raw}'"))
                })?),
                None => {
                    tracing::warn!(id = record.id, "completed task has no completed_at, using created_at");
                    Some(created_at)
                }
            }
        } else {
            if record.completed_at.is_some() {
                tracing::warn!(id = record.id, "dropping completed_at on a pending task");
            }
            None
        };

        let tags = record
            .tags
            .map(|tags| parse_tags(&tags.join(",")))
            .unwrap_or_default();

        Ok(Task {
            id: record.id,
            description,
            priority,
            due,
            created_at,
            completed_at,
            tags,
            project: record.project.as_deref().and_then(normalize_project),
            note: record.note.unwrap_or_default(),
        })
    }
}

/// Renders `YYYY-MM-DDTHH:MM:SS.ffffffZ` in UTC.
pub fn format_timestamp(value: OffsetDateTime) -> String {
    let utc = value.to_offset(UtcOffset::UTC);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:06}Z",
        utc.year(),
        u8::from(utc.month()),
        utc.day(),
        utc.hour(),
        utc.minute(),
        utc.second(),
        utc.microsecond()
    )
}

/// Accepts the canonical microsecond form and falls back to RFC 3339.
pub fn parse_timestamp(raw: &str) -> Result<OffsetDateTime, AppError> {
    let raw = raw.trim();
    PrimitiveDateTime::parse(
        raw,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z"),
    )
    .map(PrimitiveDateTime::assume_utc)
    .or_else(|_| OffsetDateTime::parse(raw, &Rfc3339).map(|value| value.to_offset(UtcOffset::UTC)))
    .map_err(|err| AppError::invalid_input(err.to_string()))
}

pub fn format_date(value: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        value.year(),
        u8::from(value.month()),
        value.day()
    )
}
