use super::session::SupervisionSession;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

impl SupervisionSession {
    /// Graceful-then-forced worker shutdown.
    ///
    /// Sends a termination request, waits up to `grace` for the worker to
    /// exit on its own, then kills it outright. Whichever path is taken, the
    /// exit event is drained exactly once so the background waiter never
    /// leaks and the child is always reaped. A no-op when the worker has
    /// already exited.
    pub async fn shutdown_worker(&mut self, grace: Duration) {
        if self.worker_exited() {
            return;
        }

        debug!(
            "Requesting termination of worker pid {} for task {}",
            self.worker.pid(),
            self.task_id
        );
        self.worker.request_termination();

        match timeout(grace, self.worker.wait_exit()).await {
            Ok(event) => self.record_exit(event),
            Err(_) => {
                warn!(
                    "Worker pid {} for task {} did not exit within {:?}; killing",
                    self.worker.pid(),
                    self.task_id,
                    grace
                );
                self.worker.force_kill();
                let event = self.worker.wait_exit().await;
                self.record_exit(event);
            }
        }
    }
}
