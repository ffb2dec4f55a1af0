pub mod json_store;
pub mod note_store;

pub use json_store::JsonStore;
pub use note_store::NoteStore;
