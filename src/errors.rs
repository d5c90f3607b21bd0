use diesel::result::Error as DieselError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("task '{0}' not found")]
    TaskNotFound(String),
    #[error("failed to start worker: {0}")]
    WorkerLaunch(String),
    #[error("worker exited with {detail} after {elapsed}")]
    WorkerExit { detail: String, elapsed: String },
    #[error("supervision interrupted after {0}")]
    Interrupted(String),
    #[error("worker exited without completing task '{0}'; run `taskherd reset {0}` and re-run to retry")]
    SilentIncompletion(String),
    #[error("task failed: {0}")]
    TaskFailed(String),
    #[error("unrecognized task status '{0}'")]
    UnknownStatus(String),
    #[error("task id '{0}' matches more than one task")]
    AmbiguousTask(String),
    #[error("session error: {0}")]
    Session(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("worktree error: {0}")]
    Worktree(String),
    #[error("Diesel error: {0}")]
    DieselError(#[from] DieselError),
    #[error("Serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
