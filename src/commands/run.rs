use super::resolve_required;
use crate::cli::RunArgs;
use crate::config::Config;
use crate::core::{ProcessWorkerLauncher, Supervisor, SupervisorConfig};
use crate::db::{Database, TaskRepository};
use crate::errors::Error;
use crate::project;
use colored::Colorize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Launches and supervises the worker for one task.
///
/// Wires the operator interrupt into the supervisor's cancellation token and
/// translates the supervision outcome into terminal output and the process
/// exit code.
pub async fn run(database: &Database, config: &Config, args: &RunArgs) -> Result<(), Error> {
    let record = {
        let mut conn = database.get_conn();
        let mut repo = TaskRepository::new(&mut conn);
        resolve_required(&mut repo, &args.id)?
    };

    let project = project::project_name();
    let worktree_path = if args.worktree {
        Some(project::create_worktree(&project, &record.id)?)
    } else {
        None
    };

    let launcher = ProcessWorkerLauncher::new(
        config.worker.command.clone(),
        config.worker.args.clone(),
        worktree_path.clone(),
    );
    let supervisor_config = SupervisorConfig {
        auto_close_session: args.auto_close || config.session.auto_close,
        session_name: Some(project::session_name(
            &config.session.prefix,
            &project,
            &record.id,
        )),
    };
    let supervisor = Supervisor::new(database.clone(), Arc::new(launcher), supervisor_config);

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    println!("{} {}", "🚀 Running task".cyan().bold(), record.title.bold());
    let result = supervisor.supervise(&record.id, cancel).await;

    match &result {
        Ok(()) => {
            println!("{}", "✅ Task completed".green().bold());
            if let Some(path) = &worktree_path {
                project::remove_worktree(path);
            }
        }
        Err(e) => {
            println!("{} {}", "❌".red(), e.to_string().red());
            if worktree_path.is_some() {
                println!("{}", "Worktree kept for inspection.".yellow());
            }
        }
    }
    result
}
