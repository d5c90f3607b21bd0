//! Main entry point for the application.
//!
//! This module initializes logging, loads environment variables and
//! configuration, opens the task database, and dispatches the requested
//! subcommand. The `run` command additionally logs to a rotating file so the
//! worker's inherited terminal stays usable.

use clap::Parser;
use colored::Colorize;
use taskherd::cli::{Cli, Command};
use taskherd::db::Database;
use taskherd::{commands, config, utils};
use tracing::debug;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    utils::init_logging(&cli.logging_level, matches!(cli.command, Command::Run(_)));

    if let Err(e) = dotenvy::dotenv() {
        debug!("No .env file loaded: {}", e);
    }

    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Configuration error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    let db_path = config.database.resolved_path();
    if let Some(parent) = db_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("{} {}: {}", "Error:".red().bold(), parent.display(), e);
            std::process::exit(1);
        }
    }
    let database = Database::new(&db_path.to_string_lossy());
    if let Err(e) = database.initialize() {
        eprintln!("{} {}", "Database error:".red().bold(), e);
        std::process::exit(1);
    }

    let result = match &cli.command {
        Command::New(args) => commands::new_task(&database, &config, args).await,
        Command::Run(args) => commands::run(&database, &config, args).await,
        Command::List(args) => commands::list(&database, args),
        Command::Show(args) => commands::show(&database, args),
        Command::Delete(args) => commands::delete(&database, args),
        Command::Reset(args) => commands::reset(&database, &args.id),
        Command::Complete(args) => commands::complete(&database, &args.id),
        Command::Fail(args) => commands::fail(&database, &args.id, &args.message),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
