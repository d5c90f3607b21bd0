use super::colored_status;
use crate::cli::ListArgs;
use crate::core::TaskStatus;
use crate::db::{Database, TaskRepository};
use crate::errors::Error;
use crate::utils::short_id;
use colored::Colorize;

/// Lists tracked tasks as a table or as JSON
pub fn list(database: &Database, args: &ListArgs) -> Result<(), Error> {
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);

    let records = match &args.status {
        Some(raw) => {
            let status: TaskStatus = raw.parse()?;
            repo.list_tasks_by_status(status)?
        }
        None => repo.list_tasks()?,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    println!(
        "{:<10} {:<12} {:<40} {}",
        "ID".bold(),
        "STATUS".bold(),
        "TITLE".bold(),
        "CREATED".bold()
    );
    for record in records {
        println!(
            "{:<10} {} {:<40} {}",
            short_id(&record.id),
            colored_status(&format!("{:<12}", record.status)),
            record.title,
            record.created_at
        );
    }
    Ok(())
}
