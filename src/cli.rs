use std::path::PathBuf;

use structopt::StructOpt;

use crate::model::{Priority, Status};

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Create a new task.
    Add {
        /// The task description text.
        description: String,

        /// Base priority quadrant (urgent_important, important, urgent, normal).
        #[structopt(short, long, default_value = "normal")]
        priority: Priority,

        /// Due date (YYYY-MM-DD).
        #[structopt(short, long)]
        due: Option<String>,

        /// Category tag (security, bug_fix, meeting, ...).
        #[structopt(short = "t", long = "task-type", default_value = "general")]
        task_type: String,

        /// Estimated effort in hours.
        #[structopt(short = "e", long = "hours", default_value = "0")]
        hours: f64,
    },
    /// Rewrite one field of a task as a new version.
    Update {
        uuid: String,
        /// One of: description, status, priority, due_date, task_type, estimated_hours.
        field: String,
        /// The new value ('null' clears due_date).
        value: String,
    },
    /// Mark a task completed.
    Done { uuid: String },
    /// Soft-delete a task; its history is kept.
    Rm { uuid: String },
    /// Bring a deleted task back.
    Restore { uuid: String },
    /// List active tasks ranked by dynamic priority.
    List {
        /// Only tasks with this status (todo, in_progress, completed).
        status: Option<Status>,

        /// Show stored fields without scoring.
        #[structopt(long)]
        basic: bool,
    },
    /// Eisenhower matrix view over the recomputed priorities.
    Matrix,
    /// Show one task with its full version history.
    Show { uuid: String },
    /// Explain how a task's dynamic weight is assembled.
    Analyze { uuid: String },
    /// Search active task descriptions.
    Search { keyword: String },
    /// Export the full log to a JSON file.
    Export {
        #[structopt(parse(from_os_str))]
        path: Option<PathBuf>,
    },
    /// Replay a JSON export into the log.
    Import {
        #[structopt(parse(from_os_str))]
        path: PathBuf,
    },
}

#[derive(Debug, StructOpt)]
#[structopt(name = "eisen", about = "A smart-priority task tracker that never forgets.")]
pub struct CommandLineArgs {
    #[structopt(subcommand)]
    pub action: Command,

    /// Use a different journal file.
    #[structopt(parse(from_os_str), short, long)]
    pub journal_file: Option<PathBuf>,
}
