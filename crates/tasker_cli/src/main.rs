use clap::{CommandFactory, Parser};
use std::io::{self, BufRead, IsTerminal, Write};
use tasker_cli::cli::{Cli, Command, NoteCommand, collect_config_overrides, determine_view};
use tasker_cli::render;
use tasker_core::config::{self, Palette, palette_for_theme};
use tasker_core::error::AppError;
use tasker_core::model::{Note, NoteDraft, Task, TaskDraft, TaskUpdate, parse_due_date};
use tasker_core::query::{SortKey, TaskFilter};
use tasker_core::storage::{JsonStore, NoteStore};
use tasker_core::{note_api, task_api};
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "TASKER_LOG";

/// Per-invocation settings resolved from flags, config and environment.
struct Context {
    store: JsonStore,
    notes: NoteStore,
    palette: Palette,
    default_sort: SortKey,
    json: bool,
    dry_run: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn build_context(cli: &Cli) -> Result<Context, AppError> {
    let loaded = config::load_config_with_fallback();
    if let Some(err) = loaded.error.as_ref() {
        tracing::warn!(error = %err, "ignoring unreadable config, using defaults");
    }
    let overrides = collect_config_overrides(&cli.config_override)?;
    let settings = config::merge_overrides(&loaded.config, &overrides);

    let store_path = config::resolve_store_path(cli.data_path.as_deref(), &settings)?;
    tracing::debug!(path = %store_path.display(), "resolved task store");

    let default_sort = match settings.default_sort.as_deref() {
        Some(raw) => raw.parse::<SortKey>().unwrap_or_else(|err: AppError| {
            tracing::warn!(error = %err, "invalid default_sort in config, sorting by creation");
            SortKey::Creation
        }),
        None => SortKey::Creation,
    };

    let palette = if cli.color {
        palette_for_theme(settings.theme.as_deref())
    } else {
        Palette::plain()
    };

    Ok(Context {
        notes: NoteStore::beside(&store_path),
        store: JsonStore::new(store_path),
        palette,
        default_sort,
        json: cli.json,
        dry_run: cli.dry_run,
    })
}

fn print_task(ctx: &Context, task: &Task, message: String) {
    if ctx.json {
        println!("{}", render::task_json(task));
    } else {
        println!("{message}");
    }
}

fn print_task_list(ctx: &Context, tasks: &[Task], empty_message: &str) {
    if ctx.json {
        println!("{}", render::tasks_json(tasks));
    } else if tasks.is_empty() {
        println!("{empty_message}");
    } else {
        println!("{}", render::render_table(tasks, &ctx.palette));
    }
}

fn print_note_list(ctx: &Context, notes: &[Note], empty_message: &str) {
    if ctx.json {
        println!("{}", render::notes_json(notes));
    } else if notes.is_empty() {
        println!("{empty_message}");
    } else {
        println!("{}", render::render_note_table(notes));
    }
}

/// Asks on the terminal before deleting; non-interactive input always proceeds.
fn confirm_delete(task: &Task) -> Result<bool, AppError> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return Ok(true);
    }

    print!("Delete task {}: {}? [y/N] ", task.id(), task.description());
    io::stdout().flush()?;

    let mut answer = String::new();
    stdin.lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn run_command(ctx: &Context, command: Command) -> Result<(), AppError> {
    match command {
        Command::Add {
            description,
            priority,
            due,
            tags,
            project,
            note,
        } => {
            let draft = TaskDraft {
                description: &description,
                priority: priority.as_deref(),
                due: due.as_deref(),
                tags: tags.as_deref(),
                project: project.as_deref(),
                note: note.as_deref(),
            };
            let task = task_api::add_task(&ctx.store, &draft)?;
            print_task(
                ctx,
                &task,
                format!("Added task {}: {}", task.id(), task.description()),
            );
        }
        Command::List {
            all,
            completed,
            pending,
            sort,
            tags,
            project,
            after,
            before,
        } => {
            let filter = TaskFilter {
                view: determine_view(all, completed, pending)?,
                tags,
                project,
                due_after: after.as_deref().map(parse_due_date).transpose()?,
                due_before: before.as_deref().map(parse_due_date).transpose()?,
            };
            let sort = match sort.as_deref() {
                Some(raw) => raw.parse::<SortKey>()?,
                None => ctx.default_sort,
            };
            let result = task_api::list_tasks(&ctx.store, &filter, sort)?;
            let empty_message = if result.total == 0 {
                "No tasks stored."
            } else {
                "No tasks found for the selected filter."
            };
            print_task_list(ctx, &result.tasks, empty_message);
        }
        Command::Show { id } => {
            let task = task_api::get_task_by_id(&ctx.store, id)?;
            print_task(ctx, &task, render::render_details(&task));
        }
        Command::Complete { id } => {
            let task = task_api::complete_task(&ctx.store, id, ctx.dry_run)?;
            let message = if ctx.dry_run {
                format!("[dry-run] Would complete task {}: {}", id, task.description())
            } else {
                format!("Completed task {id}.")
            };
            print_task(ctx, &task, message);
        }
        Command::Delete { id, force } => {
            if !force && !ctx.dry_run {
                let task = task_api::get_task_by_id(&ctx.store, id)?;
                if !confirm_delete(&task)? {
                    println!("Aborted.");
                    return Ok(());
                }
            }
            let task = task_api::delete_task(&ctx.store, id, ctx.dry_run)?;
            let message = if ctx.dry_run {
                format!("[dry-run] Would delete task {}: {}", id, task.description())
            } else {
                format!("Deleted task {id}.")
            };
            print_task(ctx, &task, message);
        }
        Command::Set {
            id,
            description,
            priority,
            due,
            tags,
            project,
            note,
        } => {
            let changes = TaskUpdate {
                description: description.as_deref(),
                priority: priority.as_deref(),
                due: due.as_deref(),
                tags: tags.as_deref(),
                project: project.as_deref(),
                note: note.as_deref(),
            };
            let task = task_api::update_task(&ctx.store, id, &changes)?;
            print_task(
                ctx,
                &task,
                format!("Updated task {}: {}", task.id(), task.description()),
            );
        }
        Command::Search { query } => {
            let hits = task_api::search_tasks(&ctx.store, &query)?;
            print_task_list(ctx, &hits, "No matching tasks.");
        }
        Command::Suggest { limit } => {
            let picks = task_api::suggest_tasks(&ctx.store, limit)?;
            if !ctx.json && !picks.is_empty() {
                println!("Top {} suggestions:", picks.len());
            }
            print_task_list(ctx, &picks, "No suggestions.");
        }
        Command::Export { path } => {
            let summary = task_api::export_tasks(&ctx.store, &path)?;
            if ctx.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "path": path.display().to_string(),
                        "format": summary.format.as_str(),
                        "count": summary.count,
                    })
                );
            } else {
                println!("Exported {} tasks to {}", summary.count, path.display());
            }
        }
        Command::Note { action } => run_note_command(ctx, action)?,
    }

    Ok(())
}

fn run_note_command(ctx: &Context, action: NoteCommand) -> Result<(), AppError> {
    match action {
        NoteCommand::Add { title, body, tags } => {
            let draft = NoteDraft {
                title: &title,
                body: body.as_deref(),
                tags: tags.as_deref(),
            };
            let note = note_api::add_note(&ctx.notes, &draft)?;
            if ctx.json {
                println!("{}", render::note_json(&note));
            } else {
                println!("Added note {}: {}", note.id(), note.title());
            }
        }
        NoteCommand::List => {
            let notes = note_api::list_notes(&ctx.notes)?;
            print_note_list(ctx, &notes, "No notes stored.");
        }
        NoteCommand::Search { query } => {
            let hits = note_api::search_notes(&ctx.notes, &query)?;
            print_note_list(ctx, &hits, "No matching notes.");
        }
    }

    Ok(())
}

fn main() {
    init_tracing();

    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        print_help();
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    let result = build_context(&cli).and_then(|ctx| run_command(&ctx, cli.command));
    if let Err(err) = result {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
