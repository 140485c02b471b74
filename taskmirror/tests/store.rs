use taskmirror::sea_orm::Database;
use taskmirror::{StoreError, TaskStore, schema};

async fn fresh_store() -> TaskStore {
    let conn = Database::connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    schema::create_tasks_table(&conn)
        .await
        .expect("failed to bootstrap schema");
    TaskStore::new(conn)
}

#[tokio::test]
async fn test_bootstrap_is_idempotent() {
    let store = fresh_store().await;
    // Second bootstrap over the same connection must be a no-op.
    schema::create_tasks_table(store.connection())
        .await
        .expect("re-running bootstrap failed");

    store.insert("still works", "after double bootstrap").await.unwrap();
    assert_eq!(store.all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_insert_assigns_ids_and_defaults() {
    let store = fresh_store().await;

    let first = store.insert("Buy milk", "2%").await.unwrap();
    let second = store.insert("Call Bob", "re: invoice").await.unwrap();

    assert!(second.id > first.id);
    assert!(!first.completed);
    assert!(first.remote_id.is_none());
    assert!(!first.is_linked());
}

#[tokio::test]
async fn test_insert_rejects_blank_fields() {
    let store = fresh_store().await;

    let err = store.insert("   ", "desc").await.expect_err("blank name accepted");
    assert!(matches!(err, StoreError::Invalid(_)));
    let err = store.insert("name", "").await.expect_err("blank description accepted");
    assert!(matches!(err, StoreError::Invalid(_)));
    assert!(store.all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unlinked_filters_and_keeps_insertion_order() {
    let store = fresh_store().await;

    let a = store.insert("a", "first in").await.unwrap();
    let b = store.insert("b", "second in").await.unwrap();
    let c = store.insert("c", "third in").await.unwrap();
    store.set_remote_id(b.id, "remote-b").await.unwrap();

    let unlinked: Vec<i32> = store.unlinked().await.unwrap().iter().map(|t| t.id).collect();
    assert_eq!(unlinked, vec![a.id, c.id]);
}

#[tokio::test]
async fn test_set_remote_id_on_missing_row() {
    let store = fresh_store().await;
    let err = store.set_remote_id(42, "xyz789").await.expect_err("row should be missing");
    assert!(matches!(err, StoreError::NotFound(42)));
}

#[tokio::test]
async fn test_set_remote_id_links_row() {
    let store = fresh_store().await;
    let task = store.insert("Buy milk", "2%").await.unwrap();

    store.set_remote_id(task.id, "xyz789").await.unwrap();

    let task = store.get(task.id).await.unwrap();
    assert_eq!(task.remote_id.as_deref(), Some("xyz789"));
    assert!(task.is_linked());
}

#[tokio::test]
async fn test_update_details_roundtrip() {
    let store = fresh_store().await;
    let task = store.insert("old name", "old description").await.unwrap();

    store.update_details(task.id, "new name", "new description").await.unwrap();

    let task = store.get(task.id).await.unwrap();
    assert_eq!(task.name, "new name");
    assert_eq!(task.description, "new description");

    let err = store
        .update_details(task.id, "", "x")
        .await
        .expect_err("blank name accepted");
    assert!(matches!(err, StoreError::Invalid(_)));
}

#[tokio::test]
async fn test_set_completed_reports_linkage() {
    let store = fresh_store().await;
    let task = store.insert("Buy milk", "2%").await.unwrap();
    store.set_remote_id(task.id, "xyz789").await.unwrap();

    let completed = store.set_completed(task.id).await.unwrap();
    assert!(completed.completed);
    assert_eq!(completed.remote_id.as_deref(), Some("xyz789"));
}

#[tokio::test]
async fn test_delete_removes_row() {
    let store = fresh_store().await;
    let task = store.insert("Buy milk", "2%").await.unwrap();

    store.delete(task.id).await.unwrap();

    let err = store.get(task.id).await.expect_err("row should be gone");
    assert!(matches!(err, StoreError::NotFound(_)));
    assert!(matches!(
        store.delete(task.id).await,
        Err(StoreError::NotFound(_))
    ));
}
