use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tasker_core::config::{ConfigOverrides, canonicalize_key};
use tasker_core::error::AppError;
use tasker_core::query::View;

#[derive(Parser, Debug)]
#[command(name = "tasker", author, version, about = "JSON-backed command-line task manager", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the task file (overrides TASKER_STORE_PATH)
    #[arg(long = "data", value_name = "PATH", global = true)]
    pub data_path: Option<PathBuf>,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use ANSI colors in table output
    #[arg(long, global = true)]
    pub color: bool,

    /// Preview complete/delete without writing
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: tasker add "Write report" --priority high --due 2024-03-20
    Add {
        description: String,
        /// low, medium or high (default medium)
        #[arg(long)]
        priority: Option<String>,
        /// Due date in YYYY-MM-DD format
        #[arg(long)]
        due: Option<String>,
        /// Comma separated tags
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    /// List tasks
    ///
    /// Example: tasker list --all --sort due
    /// Example: tasker list --tag school --before 2024-04-01
    List {
        /// Show pending and completed tasks
        #[arg(long)]
        all: bool,
        /// Show only completed tasks
        #[arg(long)]
        completed: bool,
        /// Show only pending tasks (default)
        #[arg(long)]
        pending: bool,
        /// creation, priority or due
        #[arg(long, value_name = "KEY")]
        sort: Option<String>,
        /// Require a tag; repeat for several
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,
        #[arg(long)]
        project: Option<String>,
        /// Only tasks due on or after this date
        #[arg(long, value_name = "YYYY-MM-DD")]
        after: Option<String>,
        /// Only tasks due on or before this date
        #[arg(long, value_name = "YYYY-MM-DD")]
        before: Option<String>,
    },
    /// Show details of a task
    ///
    /// Example: tasker show 1
    Show { id: u64 },
    /// Mark a task as complete
    ///
    /// Example: tasker complete 1
    Complete { id: u64 },
    /// Delete a task
    ///
    /// Example: tasker delete 1 --force
    Delete {
        id: u64,
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Update fields of a task
    ///
    /// Example: tasker set 1 --priority low --due ""
    Set {
        id: u64,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        /// New due date; an empty value clears it
        #[arg(long)]
        due: Option<String>,
        /// Replace tags (comma separated)
        #[arg(long)]
        tags: Option<String>,
        /// New project; an empty value clears it
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Search descriptions and notes
    ///
    /// Example: tasker search dentist
    Search { query: String },
    /// Show the most pressing pending tasks
    ///
    /// Example: tasker suggest --limit 5
    Suggest {
        #[arg(long, default_value_t = 3)]
        limit: usize,
    },
    /// Export tasks to a .json or .md file
    ///
    /// Example: tasker export backup.json
    Export { path: PathBuf },
    /// Manage notes kept beside the task file
    ///
    /// Example: tasker note add "Reading list" --body "Dune" --tags books
    Note {
        #[command(subcommand)]
        action: NoteCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommand {
    /// Add a note
    ///
    /// Example: tasker note add "Landlord call" --body "ask about the lease"
    Add {
        title: String,
        #[arg(long)]
        body: Option<String>,
        /// Comma separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// List every note
    List,
    /// Search note titles, bodies and tags
    ///
    /// Example: tasker note search lease
    Search { query: String },
}

/// Resolves the mutually exclusive view flags; pending when none is set.
pub fn determine_view(all: bool, completed: bool, pending: bool) -> Result<View, AppError> {
    let selected = [all, completed, pending].into_iter().filter(|flag| *flag).count();
    if selected > 1 {
        return Err(AppError::invalid_input(
            "choose at most one of --all/--completed/--pending",
        ));
    }

    Ok(if all {
        View::All
    } else if completed {
        View::Completed
    } else {
        View::Pending
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    StorePath,
    DefaultSort,
    Theme,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, AppError> {
    let (key_raw, value_raw) = raw
        .trim()
        .split_once('=')
        .ok_or_else(|| AppError::invalid_input("override must be in KEY=VALUE format"))?;

    let key = canonicalize_key(key_raw);
    let target = match key.as_str() {
        "" => return Err(AppError::invalid_input("override key cannot be empty")),
        "store_path" | "store" | "data" => ConfigOverrideTarget::StorePath,
        "default_sort" | "sort" => ConfigOverrideTarget::DefaultSort,
        "theme" => ConfigOverrideTarget::Theme,
        other => {
            return Err(AppError::invalid_input(format!(
                "unknown config field '{other}'"
            )));
        }
    };

    Ok(ParsedConfigOverride {
        target,
        value: value_raw.trim().to_string(),
    })
}

pub fn collect_config_overrides(raw: &[String]) -> Result<ConfigOverrides, AppError> {
    let mut overrides = ConfigOverrides::default();
    for entry in raw {
        let parsed = parse_config_override(entry)?;
        match parsed.target {
            ConfigOverrideTarget::StorePath => {
                overrides.store_path = Some(PathBuf::from(parsed.value));
            }
            ConfigOverrideTarget::DefaultSort => overrides.default_sort = Some(parsed.value),
            ConfigOverrideTarget::Theme => overrides.theme = Some(parsed.value),
        }
    }
    Ok(overrides)
}
