use crate::cli::{NewArgs, RunArgs};
use crate::config::Config;
use crate::db::{Database, TaskRepository};
use crate::errors::Error;
use crate::project;
use crate::utils::short_id;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

/// Separator line used for visual formatting
const SEPARATOR: &str = "\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";

/// Creates a task through an interactive text form, optionally running it
/// right away
pub async fn new_task(database: &Database, config: &Config, args: &NewArgs) -> Result<(), Error> {
    println!("{}{}{}", SEPARATOR, "📋 New Task".blue().bold(), SEPARATOR);

    let theme = ColorfulTheme::default();
    let title: String = Input::with_theme(&theme)
        .with_prompt("📝 Title")
        .interact_text()
        .expect("Failed to read input");
    let description: String = Input::with_theme(&theme)
        .with_prompt("🗒  Description (empty to skip)")
        .allow_empty(true)
        .interact_text()
        .expect("Failed to read input");

    let description = {
        let trimmed = description.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };
    let project = project::project_name();

    let record = {
        let mut conn = database.get_conn();
        let mut repo = TaskRepository::new(&mut conn);
        repo.insert_task(title.trim(), description, Some(project))?
    };
    println!(
        "{} {} ({})",
        "✅ Created task".green(),
        record.title.bold(),
        short_id(&record.id)
    );

    let run_now = args.run
        || Confirm::with_theme(&theme)
            .with_prompt("🚀 Run it now?")
            .default(false)
            .interact()
            .expect("Failed to read input");

    if run_now {
        let run_args = RunArgs {
            id: record.id.clone(),
            auto_close: false,
            worktree: false,
        };
        super::run(database, config, &run_args).await?;
    }
    Ok(())
}
