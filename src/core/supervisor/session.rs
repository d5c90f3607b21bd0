use crate::core::worker::WorkerHandle;
use std::process::ExitStatus;
use std::time::{Duration, Instant};
use tracing::warn;

/// Why the monitoring loop stopped. Decided exactly once per supervision run;
/// once chosen, the other event sources are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationCause {
    /// The worker process exited on its own
    ProcessExited,
    /// A status poll observed the task completed in the store
    StoreCompleted,
    /// A status poll observed the task failed in the store
    StoreFailed,
    /// Cancellation was requested
    Cancelled,
}

/// Transient state of one supervision run.
///
/// Created at supervisor entry, dropped when it returns; never persisted and
/// never shared across tasks. Owns the worker handle exclusively.
pub struct SupervisionSession {
    /// The task under supervision
    pub task_id: String,
    /// Handle to the spawned worker
    pub worker: WorkerHandle,
    started_at: Instant,
    exit_status: Option<ExitStatus>,
    exit_drained: bool,
}

impl SupervisionSession {
    /// Starts a session clock for the freshly launched worker
    pub fn new(task_id: &str, worker: WorkerHandle) -> Self {
        SupervisionSession {
            task_id: task_id.to_string(),
            worker,
            started_at: Instant::now(),
            exit_status: None,
            exit_drained: false,
        }
    }

    /// Wall-clock time since the worker was launched
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Exit status of the worker, if the exit event carried one
    pub fn exit_status(&self) -> Option<ExitStatus> {
        self.exit_status
    }

    /// True once the exit event has been drained and the child reaped
    pub fn worker_exited(&self) -> bool {
        self.exit_drained
    }

    /// Records the drained exit event.
    ///
    /// Must be called exactly once per session; every monitoring and
    /// termination path funnels its single channel read through here.
    pub fn record_exit(&mut self, event: Option<std::io::Result<ExitStatus>>) {
        self.exit_drained = true;
        match event {
            Some(Ok(status)) => self.exit_status = Some(status),
            Some(Err(e)) => warn!("Failed to reap worker for task {}: {}", self.task_id, e),
            None => warn!(
                "Worker exit channel for task {} closed without a status",
                self.task_id
            ),
        }
    }
}
