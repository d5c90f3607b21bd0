use crate::errors::Error;
use std::str::FromStr;

/// Represents the current status of a task in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Task has been created but no worker has been started for it
    Pending,
    /// A worker is (or was last known to be) running for this task
    Processing,
    /// The worker confirmed completion through the store
    Completed,
    /// The task failed; the store carries the failure message
    Failed,
}

#[allow(clippy::to_string_trait_impl)]
impl ToString for TaskStatus {
    /// Converts the TaskStatus enum to its string representation
    fn to_string(&self) -> String {
        match self {
            TaskStatus::Pending => "pending".to_string(),
            TaskStatus::Processing => "processing".to_string(),
            TaskStatus::Completed => "completed".to_string(),
            TaskStatus::Failed => "failed".to_string(),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    /// Attempts to create a TaskStatus from a string representation
    ///
    /// The status set is closed; anything outside it is an error rather than
    /// a silent default, since the store must never produce other values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "processing" => Ok(TaskStatus::Processing),
            "completed" => Ok(TaskStatus::Completed),
            "failed" => Ok(TaskStatus::Failed),
            other => Err(Error::UnknownStatus(other.to_string())),
        }
    }
}

impl TaskStatus {
    /// Whether a worker may be started for a task in this status
    pub fn is_runnable(&self) -> bool {
        matches!(self, TaskStatus::Pending | TaskStatus::Failed)
    }

    /// Whether this status ends the monitoring loop
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            TaskStatus::Pending,
            TaskStatus::Processing,
            TaskStatus::Completed,
            TaskStatus::Failed,
        ] {
            let parsed: TaskStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(matches!(
            "cancelled".parse::<TaskStatus>(),
            Err(Error::UnknownStatus(s)) if s == "cancelled"
        ));
    }

    #[test]
    fn terminal_statuses() {
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Failed.is_terminal());
        assert!(!TaskStatus::Processing.is_terminal());
        assert!(!TaskStatus::Pending.is_terminal());
    }
}
