//! CLI command handlers, one module per subcommand.
//!
//! Everything here is presentation glue over the task repository; the only
//! command with real coordination logic is `run`, which hands off to the
//! supervisor.

mod delete;
mod list;
mod new;
mod reset;
mod run;
mod show;
mod transition;

pub use delete::*;
pub use list::*;
pub use new::*;
pub use reset::*;
pub use run::*;
pub use show::*;
pub use transition::*;

use crate::db::{TaskRecord, TaskRepository};
use crate::errors::Error;
use colored::{ColoredString, Colorize};

/// Resolves an operator-supplied id or prefix, failing if nothing matches
pub(crate) fn resolve_required(
    repo: &mut TaskRepository<'_>,
    query: &str,
) -> Result<TaskRecord, Error> {
    repo.resolve_task(query)?
        .ok_or_else(|| Error::TaskNotFound(query.to_string()))
}

/// Colors a (possibly padded) status string for terminal output
pub(crate) fn colored_status(status: &str) -> ColoredString {
    match status.trim_end() {
        "completed" => status.green(),
        "failed" => status.red(),
        "processing" => status.yellow(),
        _ => status.normal(),
    }
}
