use crate::error::AppError;
use crate::model::{Note, NoteRecord};
use crate::storage::json_store::{read_store_file, with_path, write_atomic};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// JSON-array persistence for notes, in a file of their own so the task
/// file stays a plain task array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteStore {
    path: PathBuf,
}

impl NoteStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Notes live next to the task file: `tasks.json` pairs with
    /// `tasks.notes.json`.
    pub fn beside(task_path: &Path) -> Self {
        let stem = task_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .unwrap_or("tasks");
        Self::new(task_path.with_file_name(format!("{stem}.notes.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_all(&self) -> Result<Vec<Note>, AppError> {
        let Some(content) = read_store_file(&self.path)? else {
            return Ok(Vec::new());
        };
        let notes = decode_notes(&content).map_err(|err| with_path(&self.path, err))?;
        tracing::debug!(path = %self.path.display(), count = notes.len(), "loaded notes");
        Ok(notes)
    }

    pub fn save_all(&self, notes: &[Note]) -> Result<(), AppError> {
        let records: Vec<NoteRecord> = notes.iter().map(Note::to_record).collect();
        let mut content = serde_json::to_string_pretty(&records)
            .map_err(|err| AppError::corrupt(err.to_string()))?;
        content.push('\n');
        write_atomic(&self.path, &content)?;
        tracing::debug!(path = %self.path.display(), count = notes.len(), "saved notes");
        Ok(())
    }
}

fn decode_notes(content: &str) -> Result<Vec<Note>, AppError> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|err| AppError::parse(err.to_string()))?;
    let serde_json::Value::Array(items) = value else {
        return Err(AppError::corrupt("expected a JSON array of notes"));
    };

    let mut seen = HashSet::with_capacity(items.len());
    let mut notes = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let position = index + 1;
        let record: NoteRecord = serde_json::from_value(item)
            .map_err(|err| AppError::corrupt(format!("note {position}: {err}")))?;
        let note = Note::from_record(record)
            .map_err(|err| AppError::corrupt(format!("note {position}: {}", err.message())))?;
        if !seen.insert(note.id()) {
            return Err(AppError::corrupt(format!(
                "note {position}: duplicate note id {}",
                note.id()
            )));
        }
        notes.push(note);
    }
    Ok(notes)
}
