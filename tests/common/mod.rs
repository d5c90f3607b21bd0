#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use taskherd::core::{ProcessWorkerLauncher, Supervisor, SupervisorConfig, WorkerHandle, WorkerLauncher};
use taskherd::db::{Database, TaskRecord, TaskRepository};
use taskherd::errors::Error;
use tempfile::TempDir;

/// Creates an empty task database in a scratch directory.
///
/// The TempDir must stay alive for as long as the database is used.
pub fn setup_database() -> (TempDir, Database) {
    let dir = TempDir::new().expect("create temp dir");
    let db_path = dir.path().join("tasks.db");
    let database = Database::new(&db_path.to_string_lossy());
    database.initialize().expect("initialize schema");
    (dir, database)
}

pub fn insert_task(database: &Database, title: &str) -> TaskRecord {
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);
    repo.insert_task(title, None, Some("testproj".to_string()))
        .expect("insert task")
}

pub fn task_record(database: &Database, id: &str) -> TaskRecord {
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);
    repo.get_task(id).expect("read task").expect("task exists")
}

/// Launcher running a short shell script in place of the real worker
pub fn sh_launcher(script: &str) -> ProcessWorkerLauncher {
    ProcessWorkerLauncher::new(
        "sh".to_string(),
        vec!["-c".to_string(), script.to_string()],
        None,
    )
}

pub fn supervisor_with<L: WorkerLauncher + 'static>(
    database: &Database,
    launcher: L,
) -> Supervisor {
    Supervisor::new(
        database.clone(),
        Arc::new(launcher),
        SupervisorConfig::default(),
    )
}

/// Records launch requests and refuses to spawn anything; used to prove
/// certain paths never start a worker
pub struct SpyLauncher {
    pub launches: Arc<Mutex<Vec<String>>>,
}

impl SpyLauncher {
    pub fn new() -> Self {
        SpyLauncher {
            launches: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl WorkerLauncher for SpyLauncher {
    async fn launch(&self, task_id: &str) -> Result<WorkerHandle, Error> {
        self.launches.lock().unwrap().push(task_id.to_string());
        Err(Error::WorkerLaunch("spy launcher refuses to spawn".to_string()))
    }
}
