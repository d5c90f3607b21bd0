mod common;

use common::*;
use std::time::{Duration, Instant};
use taskherd::core::ProcessWorkerLauncher;
use taskherd::db::TaskRepository;
use taskherd::errors::Error;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

/// Upper bound for every supervision test; a hang here means a leaked waiter
/// or an unreaped worker.
const TEST_TIMEOUT: Duration = Duration::from_secs(20);

#[tokio::test]
async fn unknown_task_is_rejected_before_any_launch() {
    timeout(TEST_TIMEOUT, async {
        let (_dir, database) = setup_database();
        let spy = SpyLauncher::new();
        let launches = spy.launches.clone();
        let supervisor = supervisor_with(&database, spy);

        let result = supervisor
            .supervise("no-such-task", CancellationToken::new())
            .await;

        assert!(matches!(result, Err(Error::TaskNotFound(_))));
        assert!(launches.lock().unwrap().is_empty());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn launch_failure_is_recorded_as_task_failure() {
    timeout(TEST_TIMEOUT, async {
        let (_dir, database) = setup_database();
        let record = insert_task(&database, "unlaunchable");
        let launcher =
            ProcessWorkerLauncher::new("/nonexistent/worker-binary".to_string(), vec![], None);
        let supervisor = supervisor_with(&database, launcher);

        let result = supervisor
            .supervise(&record.id, CancellationToken::new())
            .await;

        assert!(matches!(result, Err(Error::WorkerLaunch(_))));
        let stored = task_record(&database, &record.id);
        assert_eq!(stored.status, "failed");
        assert!(stored
            .error_message
            .unwrap()
            .contains("failed to start worker"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn clean_exit_without_completion_is_a_failure() {
    timeout(TEST_TIMEOUT, async {
        let (_dir, database) = setup_database();
        let record = insert_task(&database, "quiet worker");
        let supervisor = supervisor_with(&database, sh_launcher("exit 0"));

        let result = supervisor
            .supervise(&record.id, CancellationToken::new())
            .await;

        assert!(matches!(result, Err(Error::SilentIncompletion(_))));
        let stored = task_record(&database, &record.id);
        assert_eq!(stored.status, "failed");
        assert!(stored
            .error_message
            .unwrap()
            .contains("never marked the task completed"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn worker_error_exit_is_recorded_with_its_status() {
    timeout(TEST_TIMEOUT, async {
        let (_dir, database) = setup_database();
        let record = insert_task(&database, "crashing worker");
        let supervisor = supervisor_with(&database, sh_launcher("exit 3"));

        let result = supervisor
            .supervise(&record.id, CancellationToken::new())
            .await;

        match result {
            Err(Error::WorkerExit { detail, .. }) => assert!(detail.contains("status 3")),
            other => panic!("expected WorkerExit, got {:?}", other),
        }
        let stored = task_record(&database, &record.id);
        assert_eq!(stored.status, "failed");
        assert!(stored.error_message.unwrap().contains("status 3"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn completion_recorded_by_worker_yields_success() {
    timeout(TEST_TIMEOUT, async {
        let (_dir, database) = setup_database();
        let record = insert_task(&database, "dutiful worker");

        // Stand-in for the worker's own callback: mark the task completed
        // while the process is still running, then let it exit 0.
        let db = database.clone();
        let id = record.id.clone();
        let marker = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            let mut conn = db.get_conn();
            let mut repo = TaskRepository::new(&mut conn);
            repo.complete_task(&id).expect("complete task");
        });

        let supervisor = supervisor_with(&database, sh_launcher("sleep 1"));
        let result = supervisor
            .supervise(&record.id, CancellationToken::new())
            .await;
        marker.await.expect("marker task");

        assert!(result.is_ok());
        let stored = task_record(&database, &record.id);
        assert_eq!(stored.status, "completed");
        assert!(stored.error_message.is_none());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn store_observed_completion_terminates_a_running_worker() {
    timeout(TEST_TIMEOUT, async {
        let (_dir, database) = setup_database();
        let record = insert_task(&database, "long runner");

        let db = database.clone();
        let id = record.id.clone();
        let marker = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(300)).await;
            let mut conn = db.get_conn();
            let mut repo = TaskRepository::new(&mut conn);
            repo.complete_task(&id).expect("complete task");
        });

        // The worker would run far longer than the test; the status poll has
        // to pick up the completion and terminate it.
        let started = Instant::now();
        let supervisor = supervisor_with(&database, sh_launcher("sleep 30"));
        let result = supervisor
            .supervise(&record.id, CancellationToken::new())
            .await;
        marker.await.expect("marker task");

        assert!(result.is_ok());
        assert!(started.elapsed() < Duration::from_secs(10));
        let stored = task_record(&database, &record.id);
        assert_eq!(stored.status, "completed");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn store_observed_failure_force_kills_a_stubborn_worker() {
    timeout(TEST_TIMEOUT, async {
        let (_dir, database) = setup_database();
        let record = insert_task(&database, "stubborn worker");

        let db = database.clone();
        let id = record.id.clone();
        let marker = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(300)).await;
            let mut conn = db.get_conn();
            let mut repo = TaskRepository::new(&mut conn);
            repo.fail_task(&id, "boom").expect("fail task");
        });

        // This worker ignores the graceful termination request, so the
        // supervisor has to escalate to a kill after the grace period and
        // still reap the process.
        let started = Instant::now();
        let supervisor = supervisor_with(&database, sh_launcher("trap '' TERM; sleep 30"));
        let result = supervisor
            .supervise(&record.id, CancellationToken::new())
            .await;
        marker.await.expect("marker task");

        match result {
            Err(Error::TaskFailed(message)) => assert_eq!(message, "boom"),
            other => panic!("expected TaskFailed, got {:?}", other),
        }
        assert!(started.elapsed() < Duration::from_secs(15));
        // The supervisor must not overwrite the reason already in the store.
        let stored = task_record(&database, &record.id);
        assert_eq!(stored.status, "failed");
        assert_eq!(stored.error_message.as_deref(), Some("boom"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn cancellation_interrupts_and_terminates_the_worker() {
    timeout(TEST_TIMEOUT, async {
        let (_dir, database) = setup_database();
        let record = insert_task(&database, "cancelled worker");

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(300)).await;
            trigger.cancel();
        });

        let started = Instant::now();
        let supervisor = supervisor_with(&database, sh_launcher("sleep 30"));
        let result = supervisor.supervise(&record.id, cancel).await;

        assert!(matches!(result, Err(Error::Interrupted(_))));
        assert!(started.elapsed() < Duration::from_secs(5));
        let stored = task_record(&database, &record.id);
        assert_eq!(stored.status, "failed");
        assert!(stored.error_message.unwrap().contains("interrupted"));
    })
    .await
    .expect("test timed out");
}
