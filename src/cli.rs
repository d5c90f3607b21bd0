use clap::{Args, Parser, Subcommand};

/// Command line interface for the application
#[derive(Parser)]
#[command(
    name = "taskherd",
    about = "Tracks units of work and supervises the worker processes that execute them"
)]
pub struct Cli {
    /// Sets the logging verbosity level for the application
    /// Possible values: "error", "warn", "info", "debug", "trace"
    /// Default: "info"
    #[arg(long, default_value_t = String::from("info"))]
    pub logging_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new task through an interactive form
    New(NewArgs),
    /// Launch and supervise the worker for a task
    Run(RunArgs),
    /// List tracked tasks
    List(ListArgs),
    /// Show a single task
    Show(ShowArgs),
    /// Delete a task
    Delete(DeleteArgs),
    /// Return a task to pending so it can be run again
    Reset(TaskIdArgs),
    /// Mark a task completed (the worker's callback path)
    Complete(TaskIdArgs),
    /// Mark a task failed with a message (the worker's callback path)
    Fail(FailArgs),
}

#[derive(Args)]
pub struct NewArgs {
    /// Run the task immediately after creating it
    #[arg(long)]
    pub run: bool,
}

#[derive(Args)]
pub struct RunArgs {
    /// Identifier (or unique prefix) of the task to run
    pub id: String,

    /// Close the hosting session tab after a successful run
    #[arg(long)]
    pub auto_close: bool,

    /// Execute the worker inside a dedicated git worktree
    #[arg(long)]
    pub worktree: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only show tasks with this status
    #[arg(long)]
    pub status: Option<String>,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Identifier (or unique prefix) of the task to show
    pub id: String,

    /// Emit JSON instead of formatted text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Identifier (or unique prefix) of the task to delete
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct TaskIdArgs {
    /// Identifier (or unique prefix) of the task
    pub id: String,
}

#[derive(Args)]
pub struct FailArgs {
    /// Identifier (or unique prefix) of the task
    pub id: String,

    /// Failure reason recorded in the store
    pub message: String,
}
