mod run;
mod session;
mod terminate;

pub use session::*;

use crate::core::worker::WorkerLauncher;
use crate::db::Database;
use std::sync::Arc;

/// Explicit per-invocation supervisor configuration.
///
/// Carried by value into each supervisor so no process-wide mutable flag
/// state exists.
#[derive(Debug, Clone, Default)]
pub struct SupervisorConfig {
    /// Close the hosting terminal session tab after a successful run
    pub auto_close_session: bool,
    /// Session tab to close when auto-close is enabled
    pub session_name: Option<String>,
}

/// Owns the full lifecycle of one worker-process invocation tied to one
/// task: launch, concurrent monitoring, termination and status
/// reconciliation.
pub struct Supervisor {
    /// Task store the supervisor reads from and records failures into
    pub database: Database,
    /// Seam used to start the worker process
    pub launcher: Arc<dyn WorkerLauncher>,
    /// Invocation-scoped configuration
    pub config: SupervisorConfig,
}

impl Supervisor {
    /// Creates a supervisor over the given store and worker launcher
    pub fn new(database: Database, launcher: Arc<dyn WorkerLauncher>, config: SupervisorConfig) -> Self {
        Supervisor {
            database,
            launcher,
            config,
        }
    }
}
