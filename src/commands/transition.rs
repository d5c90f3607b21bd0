//! Store transition paths invoked by the worker process itself.
//!
//! The worker receives the task id in its environment and calls back into
//! the store through these commands; the supervisor only ever observes the
//! result through its status polls.

use super::resolve_required;
use crate::db::{Database, TaskRepository};
use crate::errors::Error;
use colored::Colorize;

/// Marks a task completed
pub fn complete(database: &Database, id: &str) -> Result<(), Error> {
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);
    let record = resolve_required(&mut repo, id)?;

    repo.complete_task(&record.id)?;
    println!("{} {}", "✅ Marked completed:".green(), record.title.bold());
    Ok(())
}

/// Marks a task failed with the given message
pub fn fail(database: &Database, id: &str, message: &str) -> Result<(), Error> {
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);
    let record = resolve_required(&mut repo, id)?;

    repo.fail_task(&record.id, message)?;
    println!("{} {}", "❌ Marked failed:".red(), record.title.bold());
    Ok(())
}
