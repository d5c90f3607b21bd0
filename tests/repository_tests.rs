mod common;

use common::*;
use taskherd::core::TaskStatus;
use taskherd::db::TaskRepository;
use taskherd::errors::Error;

#[test]
fn insert_and_read_back() {
    let (_dir, database) = setup_database();
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);

    let record = repo
        .insert_task("write docs", Some("the user guide".to_string()), None)
        .unwrap();
    assert_eq!(record.status, "pending");
    assert!(record.completed_at.is_none());

    let found = repo.get_task(&record.id).unwrap().unwrap();
    assert_eq!(found.title, "write docs");
    assert_eq!(found.description.as_deref(), Some("the user guide"));
    assert_eq!(found.parsed_status().unwrap(), TaskStatus::Pending);

    assert!(repo.get_task("missing").unwrap().is_none());
}

#[test]
fn listing_filters_by_status() {
    let (_dir, database) = setup_database();
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);

    let a = repo.insert_task("a", None, None).unwrap();
    let b = repo.insert_task("b", None, None).unwrap();
    repo.complete_task(&b.id).unwrap();

    assert_eq!(repo.list_tasks().unwrap().len(), 2);

    let pending = repo.list_tasks_by_status(TaskStatus::Pending).unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, a.id);

    let completed = repo.list_tasks_by_status(TaskStatus::Completed).unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, b.id);
}

#[test]
fn status_transitions_round_trip() {
    let (_dir, database) = setup_database();
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);
    let record = repo.insert_task("lifecycle", None, None).unwrap();

    repo.start_task(&record.id).unwrap();
    let processing = repo.get_task(&record.id).unwrap().unwrap();
    assert_eq!(processing.parsed_status().unwrap(), TaskStatus::Processing);

    repo.complete_task(&record.id).unwrap();
    let completed = repo.get_task(&record.id).unwrap().unwrap();
    assert!(completed.was_completed_by_worker());
    assert!(completed.completed_at.is_some());

    repo.reset_task_status(&record.id).unwrap();
    let reset = repo.get_task(&record.id).unwrap().unwrap();
    assert_eq!(reset.parsed_status().unwrap(), TaskStatus::Pending);
    assert!(reset.completed_at.is_none());
    assert!(reset.error_message.is_none());
}

#[test]
fn starting_a_failed_task_clears_its_error() {
    let (_dir, database) = setup_database();
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);
    let record = repo.insert_task("retry me", None, None).unwrap();

    repo.fail_task(&record.id, "first attempt died").unwrap();
    repo.start_task(&record.id).unwrap();

    let restarted = repo.get_task(&record.id).unwrap().unwrap();
    assert_eq!(restarted.parsed_status().unwrap(), TaskStatus::Processing);
    assert!(restarted.error_message.is_none());
}

#[test]
fn fail_task_is_idempotent_with_last_message_winning() {
    let (_dir, database) = setup_database();
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);
    let record = repo.insert_task("flaky", None, None).unwrap();

    repo.fail_task(&record.id, "first message").unwrap();
    repo.fail_task(&record.id, "second message").unwrap();

    let failed = repo.get_task(&record.id).unwrap().unwrap();
    assert_eq!(failed.parsed_status().unwrap(), TaskStatus::Failed);
    assert_eq!(failed.error_message.as_deref(), Some("second message"));
}

#[test]
fn delete_removes_exactly_the_target() {
    let (_dir, database) = setup_database();
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);

    let keep = repo.insert_task("keep", None, None).unwrap();
    let gone = repo.insert_task("gone", None, None).unwrap();

    assert!(repo.delete_task(&gone.id).unwrap());
    assert!(!repo.delete_task(&gone.id).unwrap());
    assert!(repo.get_task(&keep.id).unwrap().is_some());
}

#[test]
fn resolve_accepts_unique_prefixes_and_rejects_ambiguous_ones() {
    let (_dir, database) = setup_database();
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);

    let record = repo.insert_task("prefixed", None, None).unwrap();
    let prefix = &record.id[..8];

    let resolved = repo.resolve_task(prefix).unwrap().unwrap();
    assert_eq!(resolved.id, record.id);

    assert!(repo.resolve_task("zzzz-not-a-task").unwrap().is_none());

    // An empty query matches every task; with two tasks that is ambiguous.
    repo.insert_task("another", None, None).unwrap();
    assert!(matches!(
        repo.resolve_task(""),
        Err(Error::AmbiguousTask(_))
    ));
}
