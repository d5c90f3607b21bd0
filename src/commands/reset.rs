use super::resolve_required;
use crate::db::{Database, TaskRepository};
use crate::errors::Error;
use colored::Colorize;

/// Returns a task to pending so it can be run again
pub fn reset(database: &Database, id: &str) -> Result<(), Error> {
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);
    let record = resolve_required(&mut repo, id)?;

    repo.reset_task_status(&record.id)?;
    println!(
        "{} {} {}",
        "↩️  Task".cyan(),
        record.title.bold(),
        "is pending again".cyan()
    );
    Ok(())
}
