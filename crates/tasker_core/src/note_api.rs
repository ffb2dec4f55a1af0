use crate::error::AppError;
use crate::model::{Note, NoteDraft};
use crate::storage::NoteStore;

pub fn add_note(store: &NoteStore, draft: &NoteDraft<'_>) -> Result<Note, AppError> {
    let mut notes = store.load_all()?;
    let note = Note::create(draft, &notes)?;
    notes.push(note.clone());
    store.save_all(&notes)?;
    tracing::info!(id = note.id(), "added note");
    Ok(note)
}

pub fn list_notes(store: &NoteStore) -> Result<Vec<Note>, AppError> {
    store.load_all()
}

pub fn search_notes(store: &NoteStore, query: &str) -> Result<Vec<Note>, AppError> {
    let notes = store.load_all()?;
    Ok(notes.into_iter().filter(|note| note.matches(query)).collect())
}
