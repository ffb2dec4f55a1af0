use crate::error::AppError;
use crate::model::task::parse_tags;
use serde::{Deserialize, Serialize};

/// Free-standing knowledge note, kept apart from the task collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    id: u64,
    title: String,
    body: String,
    tags: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NoteDraft<'a> {
    pub title: &'a str,
    pub body: Option<&'a str>,
    pub tags: Option<&'a str>,
}

impl<'a> NoteDraft<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Note {
    /// New note with the next id after the highest one in `existing`.
    pub fn create(draft: &NoteDraft<'_>, existing: &[Note]) -> Result<Note, AppError> {
        let title = parse_title(draft.title)?;
        let next_id = existing.iter().map(Note::id).max().unwrap_or(0) + 1;

        Ok(Note {
            id: next_id,
            title,
            body: draft.body.map(|body| body.trim().to_string()).unwrap_or_default(),
            tags: draft.tags.map(parse_tags).unwrap_or_default(),
        })
    }

    pub fn to_record(&self) -> NoteRecord {
        NoteRecord {
            id: self.id,
            title: self.title.clone(),
            body: self.body.clone(),
            tags: self.tags.clone(),
        }
    }

    pub fn from_record(record: NoteRecord) -> Result<Note, AppError> {
        if record.id == 0 {
            return Err(AppError::invalid_input("note id must be a positive integer"));
        }

        Ok(Note {
            id: record.id,
            title: parse_title(&record.title)?,
            body: record.body,
            tags: parse_tags(&record.tags.join(",")),
        })
    }

    /// Case-insensitive substring match on title, body, or any tag.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.body.to_lowercase().contains(&needle)
            || self.tags.iter().any(|tag| tag.contains(&needle))
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

fn parse_title(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("note title is required"));
    }
    Ok(trimmed.to_string())
}
