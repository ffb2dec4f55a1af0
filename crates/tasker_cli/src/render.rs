use tabled::settings::Style;
use tabled::{Table, Tabled};
use tasker_core::config::Palette;
use tasker_core::model::{Note, Task, format_date, format_timestamp};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: &'static str,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Description")]
    description: String,
}

#[derive(Tabled)]
struct NoteRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Tags")]
    tags: String,
    #[tabled(rename = "Body")]
    body: String,
}

pub fn status_marker(task: &Task) -> &'static str {
    if task.is_completed() { "[x]" } else { "[ ]" }
}

pub fn render_table(tasks: &[Task], palette: &Palette) -> String {
    let rows = tasks.iter().map(|task| {
        let marker = status_marker(task);
        TaskRow {
            id: task.id(),
            status: if task.is_completed() {
                palette.mutedize(marker)
            } else {
                palette.accentize(marker)
            },
            priority: task.priority().as_str(),
            due: task.due().map(format_date).unwrap_or_else(|| "-".to_string()),
            description: task.description().to_string(),
        }
    });

    let mut table = Table::new(rows);
    table.with(Style::blank());
    table.to_string()
}

pub fn render_details(task: &Task) -> String {
    let mut lines = vec![
        format!("Task {}: {}", task.id(), task.description()),
        format!(
            "  Status: {}",
            if task.is_completed() { "completed" } else { "pending" }
        ),
        format!("  Priority: {}", task.priority()),
    ];
    if let Some(due) = task.due() {
        lines.push(format!("  Due: {}", format_date(due)));
    }
    if let Some(project) = task.project() {
        lines.push(format!("  Project: {project}"));
    }
    if !task.tags().is_empty() {
        lines.push(format!("  Tags: {}", task.tags().join(", ")));
    }
    if !task.note().is_empty() {
        lines.push(format!("  Note: {}", task.note()));
    }
    lines.push(format!("  Created: {}", format_timestamp(task.created_at())));
    if let Some(completed_at) = task.completed_at() {
        lines.push(format!("  Completed: {}", format_timestamp(completed_at)));
    }
    lines.join("\n")
}

pub fn task_json(task: &Task) -> serde_json::Value {
    serde_json::json!({
        "id": task.id(),
        "description": task.description(),
        "priority": task.priority().as_str(),
        "due": task.due().map(format_date),
        "completed": task.is_completed(),
        "created_at": format_timestamp(task.created_at()),
        "completed_at": task.completed_at().map(format_timestamp),
        "tags": task.tags(),
        "project": task.project(),
        "note": task.note(),
    })
}

pub fn tasks_json(tasks: &[Task]) -> serde_json::Value {
    serde_json::Value::Array(tasks.iter().map(task_json).collect())
}

pub fn render_note_table(notes: &[Note]) -> String {
    let rows = notes.iter().map(|note| NoteRow {
        id: note.id(),
        title: note.title().to_string(),
        tags: note.tags().join(","),
        body: note.body().to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::blank());
    table.to_string()
}

pub fn note_json(note: &Note) -> serde_json::Value {
    serde_json::json!({
        "id": note.id(),
        "title": note.title(),
        "body": note.body(),
        "tags": note.tags(),
    })
}

pub fn notes_json(notes: &[Note]) -> serde_json::Value {
    serde_json::Value::Array(notes.iter().map(note_json).collect())
}
