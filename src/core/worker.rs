use crate::constants::TASK_ID_ENV_VAR;
use crate::errors::Error;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::debug;

/// Handle to a spawned worker process.
///
/// The child itself is owned by a background waiter task that reaps it and
/// publishes the exit status into a capacity-1 channel. The handle keeps the
/// pid for signaling and the receiving side of that channel; the supervision
/// session is the sole consumer and must drain the event exactly once.
#[derive(Debug)]
pub struct WorkerHandle {
    pid: u32,
    exit_rx: mpsc::Receiver<std::io::Result<ExitStatus>>,
}

impl WorkerHandle {
    /// Hands the child off to a background waiter and returns the handle
    ///
    /// # Errors
    ///
    /// Returns an Error if the child has no pid, i.e. it was already reaped
    pub fn from_child(mut child: tokio::process::Child) -> Result<Self, Error> {
        let pid = child.id().ok_or_else(|| {
            Error::WorkerLaunch("worker exited before supervision began".to_string())
        })?;

        let (exit_tx, exit_rx) = mpsc::channel(1);
        tokio::spawn(async move {
            let status = child.wait().await;
            let _ = exit_tx.send(status).await;
        });

        Ok(WorkerHandle { pid, exit_rx })
    }

    /// Pid of the worker process
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Waits for the exit event published by the background waiter
    ///
    /// Yields at most one status per handle; `None` means the waiter is gone.
    pub async fn wait_exit(&mut self) -> Option<std::io::Result<ExitStatus>> {
        self.exit_rx.recv().await
    }

    /// Requests graceful termination of the worker
    pub fn request_termination(&self) {
        self.signal(libc::SIGTERM);
    }

    /// Forcefully kills the worker
    pub fn force_kill(&self) {
        self.signal(libc::SIGKILL);
    }

    fn signal(&self, signal: i32) {
        // Signaling an already-exited pid fails with ESRCH; the exit event is
        // still in the channel, so callers just proceed to drain it.
        let rc = unsafe { libc::kill(self.pid as i32, signal) };
        if rc != 0 {
            debug!(
                "signal {} to worker pid {} failed: {}",
                signal,
                self.pid,
                std::io::Error::last_os_error()
            );
        }
    }
}

/// Seam between the supervisor and the worker process it runs.
///
/// Production uses [`ProcessWorkerLauncher`]; tests substitute a spy to
/// assert that certain paths never launch anything.
#[async_trait]
pub trait WorkerLauncher: Send + Sync {
    /// Spawns the worker process bound to the given task id
    async fn launch(&self, task_id: &str) -> Result<WorkerHandle, Error>;
}

/// Launches the configured worker program with the task id in its
/// environment and the supervisor's stdio inherited, so the operator can
/// interact with the worker directly.
#[derive(Debug, Clone)]
pub struct ProcessWorkerLauncher {
    /// Worker program to execute
    pub command: String,
    /// Arguments passed to the worker program
    pub args: Vec<String>,
    /// Optional working directory for the worker
    pub workdir: Option<PathBuf>,
}

impl ProcessWorkerLauncher {
    /// Creates a launcher for the given program, arguments and working
    /// directory
    pub fn new(command: String, args: Vec<String>, workdir: Option<PathBuf>) -> Self {
        ProcessWorkerLauncher {
            command,
            args,
            workdir,
        }
    }
}

#[async_trait]
impl WorkerLauncher for ProcessWorkerLauncher {
    async fn launch(&self, task_id: &str) -> Result<WorkerHandle, Error> {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args)
            .env(TASK_ID_ENV_VAR, task_id)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        let child = cmd
            .spawn()
            .map_err(|e| Error::WorkerLaunch(format!("{}: {}", self.command, e)))?;
        let handle = WorkerHandle::from_child(child)?;
        debug!(
            "Launched worker '{}' (pid {}) for task {}",
            self.command,
            handle.pid(),
            task_id
        );
        Ok(handle)
    }
}
