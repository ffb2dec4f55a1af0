mod list;
mod note;
mod record;
mod task;

pub use list::TaskList;
pub use note::{Note, NoteDraft, NoteRecord};
pub use record::{TaskRecord, format_date, format_timestamp, parse_timestamp};
pub use task::{Priority, Task, TaskDraft, TaskUpdate, parse_due_date, parse_tags};
