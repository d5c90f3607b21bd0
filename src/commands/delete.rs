use super::resolve_required;
use crate::cli::DeleteArgs;
use crate::db::{Database, TaskRepository};
use crate::errors::Error;
use crate::utils::short_id;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm};

/// Deletes a task after confirmation
pub fn delete(database: &Database, args: &DeleteArgs) -> Result<(), Error> {
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);
    let record = resolve_required(&mut repo, &args.id)?;

    let confirmed = args.yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Delete task '{}' ({})?",
                record.title,
                short_id(&record.id)
            ))
            .default(false)
            .interact()
            .expect("Failed to read input");
    if !confirmed {
        println!("Aborted.");
        return Ok(());
    }

    repo.delete_task(&record.id)?;
    println!("{} {}", "🗑  Deleted task".yellow(), record.title.bold());
    Ok(())
}
