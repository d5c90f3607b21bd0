use crate::core::TaskStatus;
use crate::db::models::TaskRecord;
use crate::errors::Error;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use uuid::Uuid;

/// Repository for managing task records in the SQLite database
pub struct TaskRepository<'a> {
    /// Database connection
    pub conn: &'a mut SqliteConnection,
}

impl<'a> TaskRepository<'a> {
    /// Creates a new TaskRepository instance
    ///
    /// # Arguments
    ///
    /// * `conn` - Mutable reference to SQLite database connection
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        TaskRepository { conn }
    }

    /// Inserts a new task record with status `pending`
    ///
    /// # Arguments
    ///
    /// * `title` - Short human-readable title
    /// * `description` - Optional description of the work
    /// * `project` - Optional project the task belongs to
    ///
    /// # Returns
    ///
    /// The freshly inserted task record
    ///
    /// # Errors
    ///
    /// Returns an Error if database operations fail
    pub fn insert_task(
        &mut self,
        title: &str,
        description: Option<String>,
        project: Option<String>,
    ) -> Result<TaskRecord, Error> {
        use crate::schema::tasks;

        let now = Utc::now().to_rfc3339();
        let record = TaskRecord {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description,
            project,
            status: TaskStatus::Pending.to_string(),
            error_message: None,
            created_at: now.clone(),
            updated_at: now,
            completed_at: None,
        };

        diesel::insert_into(tasks::table)
            .values(&record)
            .execute(self.conn)?;

        Ok(record)
    }

    /// Retrieves a single task by id
    ///
    /// An absent id is `None`, not an error; callers decide whether that is
    /// fatal for them.
    ///
    /// # Errors
    ///
    /// Returns an Error if database operations fail
    pub fn get_task(&mut self, the_task_id: &str) -> Result<Option<TaskRecord>, Error> {
        use crate::schema::tasks::dsl::*;

        let found = tasks
            .filter(id.eq(the_task_id))
            .first::<TaskRecord>(self.conn)
            .optional()?;
        Ok(found)
    }

    /// Finds a task by exact id or unique id prefix
    ///
    /// Operators usually type the short id shown by the list command; an
    /// exact match always wins, and a prefix matching several tasks is an
    /// error rather than a guess.
    ///
    /// # Errors
    ///
    /// Returns an Error if the prefix is ambiguous or database operations
    /// fail
    pub fn resolve_task(&mut self, query: &str) -> Result<Option<TaskRecord>, Error> {
        if let Some(record) = self.get_task(query)? {
            return Ok(Some(record));
        }

        use crate::schema::tasks::dsl::*;
        let mut matches = tasks
            .filter(id.like(format!("{}%", query)))
            .load::<TaskRecord>(self.conn)?;
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            _ => Err(Error::AmbiguousTask(query.to_string())),
        }
    }

    /// Retrieves all tasks ordered by creation time, newest first
    ///
    /// # Errors
    ///
    /// Returns an Error if database operations fail
    pub fn list_tasks(&mut self) -> Result<Vec<TaskRecord>, Error> {
        use crate::schema::tasks::dsl::*;

        let found = tasks
            .order_by(created_at.desc())
            .load::<TaskRecord>(self.conn)?;
        Ok(found)
    }

    /// Retrieves all tasks with the given status, newest first
    ///
    /// # Arguments
    ///
    /// * `filter_status` - The TaskStatus to filter by
    ///
    /// # Errors
    ///
    /// Returns an Error if database operations fail
    pub fn list_tasks_by_status(
        &mut self,
        filter_status: TaskStatus,
    ) -> Result<Vec<TaskRecord>, Error> {
        use crate::schema::tasks::dsl::*;

        let found = tasks
            .filter(status.eq(filter_status.to_string()))
            .order_by(created_at.desc())
            .load::<TaskRecord>(self.conn)?;
        Ok(found)
    }

    /// Deletes a task by id
    ///
    /// # Returns
    ///
    /// True if a record was removed
    ///
    /// # Errors
    ///
    /// Returns an Error if database operations fail
    pub fn delete_task(&mut self, the_task_id: &str) -> Result<bool, Error> {
        use crate::schema::tasks::dsl::*;

        let removed = diesel::delete(tasks.filter(id.eq(the_task_id))).execute(self.conn)?;
        Ok(removed > 0)
    }

    /// Transitions a task to `processing` and clears any stale failure message
    ///
    /// Called by the supervisor right before launching a worker.
    ///
    /// # Errors
    ///
    /// Returns an Error if database operations fail
    pub fn start_task(&mut self, the_task_id: &str) -> Result<(), Error> {
        use crate::schema::tasks::dsl::*;
        let now = Utc::now().to_rfc3339();
        let runnable = vec![
            TaskStatus::Pending.to_string(),
            TaskStatus::Failed.to_string(),
        ];

        diesel::update(tasks.filter(id.eq(the_task_id).and(status.eq_any(runnable))))
            .set((
                status.eq(TaskStatus::Processing.to_string()),
                error_message.eq(None::<String>),
                updated_at.eq(&now),
            ))
            .execute(self.conn)?;
        Ok(())
    }

    /// Marks a task as `completed` and records the completion time
    ///
    /// This is the worker's own completion path; the supervisor never calls
    /// it.
    ///
    /// # Errors
    ///
    /// Returns an Error if database operations fail
    pub fn complete_task(&mut self, the_task_id: &str) -> Result<(), Error> {
        use crate::schema::tasks::dsl::*;
        let now = Utc::now().to_rfc3339();

        diesel::update(tasks.filter(id.eq(the_task_id)))
            .set((
                status.eq(TaskStatus::Completed.to_string()),
                error_message.eq(None::<String>),
                updated_at.eq(&now),
                completed_at.eq(&now),
            ))
            .execute(self.conn)?;
        Ok(())
    }

    /// Marks a task as `failed` with the given message
    ///
    /// Idempotent in effect; a later call overwrites the message.
    ///
    /// # Arguments
    ///
    /// * `the_task_id` - The task to fail
    /// * `message` - Failure reason stored alongside the status
    ///
    /// # Errors
    ///
    /// Returns an Error if database operations fail
    pub fn fail_task(&mut self, the_task_id: &str, message: &str) -> Result<(), Error> {
        use crate::schema::tasks::dsl::*;
        let now = Utc::now().to_rfc3339();

        diesel::update(tasks.filter(id.eq(the_task_id)))
            .set((
                status.eq(TaskStatus::Failed.to_string()),
                error_message.eq(message),
                updated_at.eq(&now),
                completed_at.eq(&now),
            ))
            .execute(self.conn)?;
        Ok(())
    }

    /// Returns a task to `pending`, clearing failure and completion metadata
    ///
    /// Invoked by the reset command so a task can be run again.
    ///
    /// # Errors
    ///
    /// Returns an Error if database operations fail
    pub fn reset_task_status(&mut self, the_task_id: &str) -> Result<(), Error> {
        use crate::schema::tasks::dsl::*;
        let now = Utc::now().to_rfc3339();

        diesel::update(tasks.filter(id.eq(the_task_id)))
            .set((
                status.eq(TaskStatus::Pending.to_string()),
                error_message.eq(None::<String>),
                updated_at.eq(&now),
                completed_at.eq(None::<String>),
            ))
            .execute(self.conn)?;
        Ok(())
    }
}
