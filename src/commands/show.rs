use super::{colored_status, resolve_required};
use crate::cli::ShowArgs;
use crate::db::{Database, TaskRepository};
use crate::errors::Error;
use colored::Colorize;

/// Shows one task in full
pub fn show(database: &Database, args: &ShowArgs) -> Result<(), Error> {
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);
    let record = resolve_required(&mut repo, &args.id)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("{}  {}", "Task".bold(), record.id);
    println!("{}  {}", "Title".bold(), record.title);
    if let Some(description) = &record.description {
        println!("{}  {}", "Description".bold(), description);
    }
    if let Some(project) = &record.project {
        println!("{}  {}", "Project".bold(), project);
    }
    println!("{}  {}", "Status".bold(), colored_status(&record.status));
    if let Some(reason) = record.failure_reason() {
        println!("{}  {}", "Failure".bold(), reason.red());
    }
    println!("{}  {}", "Created".bold(), record.created_at);
    println!("{}  {}", "Updated".bold(), record.updated_at);
    if let Some(completed_at) = &record.completed_at {
        println!("{}  {}", "Finished".bold(), completed_at);
    }
    Ok(())
}
