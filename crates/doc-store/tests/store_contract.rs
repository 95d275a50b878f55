//! Store Contract Tests
//!
//! Behaviour every `DocumentStore` backend must share, checked against
//! the in-memory backend.

use doc_store::{DocumentPath, DocumentStore, Fields, MemoryStore, StoreError, Value};

fn fields(pairs: &[(&str, Value)]) -> Fields {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

fn user_path() -> DocumentPath {
    DocumentPath::new("users", "ada@example.com").unwrap()
}

#[tokio::test]
async fn test_get_missing_returns_none() {
    let store = MemoryStore::new();
    let found = store.get(&user_path()).await.expect("get failed");
    assert!(found.is_none());
}

#[tokio::test]
async fn test_set_replaces_all_fields() {
    let store = MemoryStore::new();
    let path = user_path();

    store.set(&path, fields(&[("a", 1i64.into()), ("b", 2i64.into())])).await.unwrap();
    store.set(&path, fields(&[("a", 3i64.into())])).await.unwrap();

    let doc = store.get(&path).await.unwrap().unwrap();
    assert_eq!(doc.integer_field("a"), Some(3));
    assert!(doc.get("b").is_none());
}

#[tokio::test]
async fn test_update_merges_fields() {
    let store = MemoryStore::new();
    let path = user_path();

    store.set(&path, fields(&[("a", 1i64.into()), ("b", 2i64.into())])).await.unwrap();
    store.update(&path, fields(&[("b", 5i64.into())])).await.unwrap();

    let doc = store.get(&path).await.unwrap().unwrap();
    assert_eq!(doc.integer_field("a"), Some(1));
    assert_eq!(doc.integer_field("b"), Some(5));
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let store = MemoryStore::new();
    let result = store.update(&user_path(), fields(&[("a", 1i64.into())])).await;
    assert!(matches!(result, Err(StoreError::NotFound(_))));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let store = MemoryStore::new();
    let path = user_path();

    store.set(&path, Fields::new()).await.unwrap();
    store.delete(&path).await.unwrap();
    store.delete(&path).await.unwrap();

    assert!(store.get(&path).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_children_only_direct_children() {
    let store = MemoryStore::new();
    let user = user_path();
    let tasks = user.collection("tasks").unwrap();
    let other = DocumentPath::new("users", "bob@example.com").unwrap().collection("tasks").unwrap();

    store.set(&user, Fields::new()).await.unwrap();
    store.set(&tasks.doc("b").unwrap(), fields(&[("description", "second".into())])).await.unwrap();
    store.set(&tasks.doc("a").unwrap(), fields(&[("description", "first".into())])).await.unwrap();
    store.set(&other.doc("c").unwrap(), Fields::new()).await.unwrap();
    // Grandchild must not show up
    let nested = tasks.doc("a").unwrap().collection("notes").unwrap().doc("n").unwrap();
    store.set(&nested, Fields::new()).await.unwrap();

    let children = store.list_children(&tasks).await.unwrap();
    let ids: Vec<&str> = children.iter().map(|d| d.id()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test]
async fn test_injected_failures() {
    let store = MemoryStore::new();
    store.set_fail_writes(true);
    let result = store.set(&user_path(), Fields::new()).await;
    assert!(matches!(result, Err(StoreError::Transport(_))));
    assert_eq!(store.write_count(), 0);

    store.set_fail_writes(false);
    store.set_fail_reads(true);
    store.set(&user_path(), Fields::new()).await.unwrap();
    assert!(store.get(&user_path()).await.is_err());
    assert_eq!(store.write_count(), 1);
}
