use crate::core::TaskStatus;
use crate::errors::Error;
use crate::schema::tasks;
use diesel::{AsChangeset, Identifiable, Insertable, Queryable};
use serde::{Deserialize, Serialize};

/// Represents a task in the database
#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, AsChangeset, Insertable,
)]
#[diesel(table_name = tasks)]
pub struct TaskRecord {
    /// Unique identifier for the task
    pub id: String,
    /// Short human-readable title
    pub title: String,
    /// Optional description of what the work entails
    pub description: Option<String>,
    /// Optional project the task belongs to
    pub project: Option<String>,
    /// Current status of the task, one of the closed status set
    pub status: String,
    /// Failure message, set only when the task is failed
    pub error_message: Option<String>,
    /// Timestamp when the task was created
    pub created_at: String,
    /// Timestamp when the task was last updated
    pub updated_at: String,
    /// Timestamp when the task reached a terminal status
    pub completed_at: Option<String>,
}

impl TaskRecord {
    /// Parses the raw status column into the closed status set
    ///
    /// # Errors
    ///
    /// Returns an Error if the store holds an unrecognized status value
    pub fn parsed_status(&self) -> Result<TaskStatus, Error> {
        self.status.parse()
    }

    /// True iff the worker confirmed completion through the store
    pub fn was_completed_by_worker(&self) -> bool {
        matches!(self.parsed_status(), Ok(TaskStatus::Completed))
    }

    /// Returns the recorded failure reason, if any
    pub fn failure_reason(&self) -> Option<&str> {
        self.error_message.as_deref().filter(|m| !m.is_empty())
    }
}
