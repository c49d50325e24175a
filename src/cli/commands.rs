use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tasquest",
    version,
    about = "Personal task tree, goal tracker and points counter",
    after_help = "\
DATA:
  Everything lives in one JSON file: { tasks, goals, points }.
  Default location: $XDG_DATA_HOME/tasquest/tasks.json (or ~/.local/share/...).
  Override with --data <path> or TASQUEST_DATA. A missing or unreadable file
  starts an empty document.

EXIT CODES:
  0  Success
  1  Error or rejected change (nothing is modified)

COMPLETION RULES:
  A task can only be completed once every task below it is completed.
  Milestones are completed from the last one added back to the first.
  A goal can only be completed once all of its milestones are.
  Reopening is always allowed.

POINTS:
  +1 per completed task or milestone, +2 per completed goal.
  Reopening a task takes its point back; points never go below zero.

LOGGING:
  Set TASQUEST_LOG (e.g. debug) to see diagnostics on stderr."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Path of the data file
    #[arg(long, env = "TASQUEST_DATA", global = true)]
    pub data: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the data file if it does not exist yet
    Init,

    /// Show points and overall counts
    Status,

    /// List tasks that can be completed right now, grouped by parent
    Now,

    /// List completed tasks, most recent first
    Log,

    /// Completions per day for one week
    Stats {
        /// Weeks back from the current one (0 = this week)
        #[arg(long, default_value = "0")]
        week: u32,
    },

    /// Export the task graph (Graphviz DOT, or nodes/edges with --json)
    Graph,

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Goal and milestone management
    #[command(subcommand)]
    Goal(GoalCommands),
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task
    Add {
        /// Task title
        title: String,
        /// Parent task ID or prefix
        #[arg(long)]
        parent: Option<String>,
        /// Deadline: YYYY-MM-DD or YYYY-MM-DDTHH:MM
        #[arg(long)]
        deadline: Option<String>,
    },
    /// Change a task's title, deadline or parent
    Edit {
        /// Task ID or prefix
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, conflicts_with = "clear_deadline")]
        deadline: Option<String>,
        /// Remove the deadline
        #[arg(long)]
        clear_deadline: bool,
        /// Move under this task
        #[arg(long, conflicts_with = "root")]
        parent: Option<String>,
        /// Detach from its parent
        #[arg(long)]
        root: bool,
    },
    /// Delete a task; its subtasks move up to the top level
    Delete {
        id: String,
    },
    /// Complete or reopen a task
    Toggle {
        id: String,
    },
    /// List all tasks in storage order
    List,
    /// Show the task tree
    Tree {
        /// Include completed tasks
        #[arg(long)]
        all: bool,
    },
    /// Show task details
    Show {
        id: String,
    },
    /// All subtasks of a task, latest deadline first
    Timeline {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Add a goal
    Add {
        title: String,
    },
    /// Rename a goal
    Edit {
        /// Goal ID or prefix
        id: String,
        title: String,
    },
    /// Complete or reopen a goal
    Toggle {
        id: String,
    },
    /// List goals with progress
    List,
    /// Show one goal and its milestones
    Show {
        id: String,
    },
    /// Manage a goal's milestones
    #[command(subcommand)]
    Milestone(MilestoneCommands),
}

#[derive(Subcommand)]
pub enum MilestoneCommands {
    /// Append a milestone to a goal
    Add {
        /// Goal ID or prefix
        goal: String,
        title: String,
    },
    /// Rename a milestone
    Edit {
        goal: String,
        /// Milestone ID or prefix
        milestone: String,
        title: String,
    },
    /// Complete or reopen a milestone
    Toggle {
        goal: String,
        milestone: String,
    },
}
