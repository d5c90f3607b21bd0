use super::session::{SupervisionSession, TerminationCause};
use super::Supervisor;
use crate::constants::{
    CANCELLATION_GRACE_PERIOD, STATUS_POLL_INTERVAL, TERMINATION_GRACE_PERIOD,
};
use crate::core::TaskStatus;
use crate::db::{TaskRecord, TaskRepository};
use crate::errors::Error;
use crate::project::close_session;
use crate::utils::format_duration;
use std::process::ExitStatus;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

impl Supervisor {
    /// Supervises one worker run for the given task.
    ///
    /// Resolves the task, launches the worker, races worker exit against
    /// store-observed status changes and cancellation, enforces the
    /// graceful-then-forced termination protocol, and reconciles the final
    /// status against the store. The store's `completed` marker is
    /// authoritative for success; a clean worker exit alone is not.
    ///
    /// # Arguments
    ///
    /// * `task_id` - Task to supervise; must exist in the store
    /// * `cancel` - Idempotent cancellation signal, honored at any point
    ///   during monitoring
    ///
    /// # Errors
    ///
    /// Returns an Error for every non-success outcome; terminal failures are
    /// also recorded into the store so other tooling can observe them.
    pub async fn supervise(&self, task_id: &str, cancel: CancellationToken) -> Result<(), Error> {
        let mut conn = self.database.get_conn();
        let mut repo = TaskRepository::new(&mut conn);

        let record = repo
            .get_task(task_id)?
            .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))?;
        repo.start_task(task_id)?;
        info!("Starting worker for task '{}' ({})", record.title, task_id);

        let worker = match self.launcher.launch(task_id).await {
            Ok(worker) => worker,
            Err(e) => {
                repo.fail_task(task_id, &e.to_string())?;
                return Err(e);
            }
        };

        let mut session = SupervisionSession::new(task_id, worker);
        let cause = monitor(&mut repo, &mut session, &cancel).await;
        debug!("Monitoring of task {} ended: {:?}", task_id, cause);

        match cause {
            TerminationCause::ProcessExited => {}
            TerminationCause::StoreCompleted | TerminationCause::StoreFailed => {
                session.shutdown_worker(TERMINATION_GRACE_PERIOD).await;
            }
            TerminationCause::Cancelled => {
                session.shutdown_worker(CANCELLATION_GRACE_PERIOD).await;
            }
        }

        let result = self.reconcile(&mut repo, &session, cause);
        if result.is_ok() {
            self.close_session_tab();
        }
        result
    }

    /// Reconciles the session outcome against the store's final word.
    ///
    /// Always re-reads the task; a concurrent actor (the worker itself, or
    /// an operator reset) may have raced the monitoring loop, so status
    /// cached during polling is never trusted. Read failures here surface to
    /// the caller since the true final state cannot be confirmed.
    fn reconcile(
        &self,
        repo: &mut TaskRepository<'_>,
        session: &SupervisionSession,
        cause: TerminationCause,
    ) -> Result<(), Error> {
        let elapsed = format_duration(session.elapsed());

        let record = repo
            .get_task(&session.task_id)?
            .ok_or_else(|| Error::TaskNotFound(session.task_id.clone()))?;
        let status = record.parsed_status()?;

        match cause {
            TerminationCause::Cancelled => {
                let message = format!("supervision interrupted after {elapsed}");
                record_failure(repo, &record, status, &message)?;
                Err(Error::Interrupted(elapsed))
            }
            TerminationCause::ProcessExited => match session.exit_status() {
                Some(exit) if exit.success() => match status {
                    TaskStatus::Completed => {
                        info!("Task {} completed after {}", session.task_id, elapsed);
                        Ok(())
                    }
                    // The worker reported its own failure through the store
                    // before exiting cleanly; keep its reason.
                    TaskStatus::Failed if record.failure_reason().is_some() => Err(
                        Error::TaskFailed(record.failure_reason().unwrap_or_default().to_string()),
                    ),
                    _ => {
                        let message = format!(
                            "worker exited cleanly after {elapsed} but never marked the task completed"
                        );
                        repo.fail_task(&session.task_id, &message)?;
                        Err(Error::SilentIncompletion(session.task_id.clone()))
                    }
                },
                exit => {
                    let detail = describe_exit(exit);
                    let message = format!("worker exited with {detail} after {elapsed}");
                    record_failure(repo, &record, status, &message)?;
                    Err(Error::WorkerExit { detail, elapsed })
                }
            },
            TerminationCause::StoreCompleted | TerminationCause::StoreFailed => match status {
                TaskStatus::Completed => {
                    info!("Task {} completed after {}", session.task_id, elapsed);
                    Ok(())
                }
                TaskStatus::Failed => {
                    let message = match record.failure_reason() {
                        Some(reason) => reason.to_string(),
                        None => {
                            let message = format!("task failed after {elapsed}");
                            repo.fail_task(&session.task_id, &message)?;
                            message
                        }
                    };
                    Err(Error::TaskFailed(message))
                }
                TaskStatus::Pending | TaskStatus::Processing => {
                    // A reset raced the poll; the terminal status observed
                    // during monitoring is gone, so this run cannot be
                    // called successful.
                    let message =
                        format!("task left its terminal status during supervision after {elapsed}");
                    repo.fail_task(&session.task_id, &message)?;
                    Err(Error::TaskFailed(message))
                }
            },
        }
    }

    /// Best-effort request to close the hosting session tab after a
    /// successful run. Never escalates into a supervision failure.
    fn close_session_tab(&self) {
        if !self.config.auto_close_session {
            return;
        }
        let Some(name) = self.config.session_name.as_deref() else {
            return;
        };
        if let Err(e) = close_session(name) {
            warn!("Failed to close session '{}': {}", name, e);
        }
    }
}

/// Races the three monitoring event sources until exactly one decides the
/// termination cause.
///
/// Transient store-read failures during polling are tolerated as "no new
/// information this tick"; they never abort supervision.
async fn monitor(
    repo: &mut TaskRepository<'_>,
    session: &mut SupervisionSession,
    cancel: &CancellationToken,
) -> TerminationCause {
    let mut poll = tokio::time::interval(STATUS_POLL_INTERVAL);
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            event = session.worker.wait_exit() => {
                session.record_exit(event);
                break TerminationCause::ProcessExited;
            }
            _ = poll.tick() => {
                match repo.get_task(&session.task_id) {
                    Ok(Some(record)) => match record.parsed_status() {
                        Ok(TaskStatus::Completed) => break TerminationCause::StoreCompleted,
                        Ok(TaskStatus::Failed) => break TerminationCause::StoreFailed,
                        Ok(_) => {}
                        Err(e) => warn!("Ignoring unreadable status for task {}: {}", session.task_id, e),
                    },
                    Ok(None) => warn!(
                        "Task {} missing from store during poll; treating as no new information",
                        session.task_id
                    ),
                    Err(e) => warn!(
                        "Status poll for task {} failed ({}); retrying next interval",
                        session.task_id, e
                    ),
                }
            }
            _ = cancel.cancelled() => {
                info!("Cancellation requested for task {}", session.task_id);
                break TerminationCause::Cancelled;
            }
        }
    }
}

/// Records a failure into the store unless it already carries a failure
/// reason, which must not be overwritten.
fn record_failure(
    repo: &mut TaskRepository<'_>,
    record: &TaskRecord,
    status: TaskStatus,
    message: &str,
) -> Result<(), Error> {
    if status == TaskStatus::Failed && record.failure_reason().is_some() {
        return Ok(());
    }
    repo.fail_task(&record.id, message)
}

fn describe_exit(exit: Option<ExitStatus>) -> String {
    match exit {
        Some(status) => match status.code() {
            Some(code) => format!("status {code}"),
            None => status.to_string(),
        },
        None => "an unknown status".to_string(),
    }
}
