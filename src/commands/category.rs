//! Category Commands
//!
//! Category documents under `users/{email}/categories`.

use doc_store::{DocumentStore, Record, StoreResult};

use crate::models::{Category, Task};
use super::{categories_of, tasks_of};

/// All categories, sorted by position (ties by id). Undecodable documents are skipped.
pub async fn list_categories(store: &dyn DocumentStore, user_key: &str) -> StoreResult<Vec<Category>> {
    let docs = store.list_children(&categories_of(user_key)?).await?;
    let mut categories: Vec<Category> = docs
        .iter()
        .filter_map(|doc| match Category::from_document(doc) {
            Ok(category) => Some(category),
            Err(e) => {
                tracing::warn!(path = %doc.path, "skipping malformed category: {}", e);
                None
            }
        })
        .collect();
    categories.sort_by(|a, b| (a.position, &a.id).cmp(&(b.position, &b.id)));
    Ok(categories)
}

pub async fn create_category(store: &dyn DocumentStore, user_key: &str, category: &Category) -> StoreResult<()> {
    let path = categories_of(user_key)?.doc(&category.id)?;
    store.set(&path, category.to_fields()).await
}

/// Delete every task of the category, then every category document with
/// that name. Works from the stored documents, not local state, so remote
/// leftovers are removed too. Returns the number of documents deleted.
pub async fn delete_category_cascade(store: &dyn DocumentStore, user_key: &str, name: &str) -> StoreResult<usize> {
    let mut deleted = 0;

    for doc in store.list_children(&tasks_of(user_key)?).await? {
        // Undecodable tasks are skipped rather than aborting the cascade
        let Ok(task) = Task::from_document(&doc) else {
            tracing::warn!(path = %doc.path, "skipping malformed task during cascade");
            continue;
        };
        if task.category == name {
            store.delete(&doc.path).await?;
            deleted += 1;
        }
    }

    for doc in store.list_children(&categories_of(user_key)?).await? {
        if doc.str_field("name").ok() == Some(name) {
            store.delete(&doc.path).await?;
            deleted += 1;
        }
    }

    tracing::debug!(category = name, deleted, "category cascade finished");
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_store::MemoryStore;

    const USER: &str = "ada@example.com";

    async fn seed_task(store: &MemoryStore, id: &str, category: &str) {
        let task = Task { id: id.into(), description: id.into(), category: category.into(), position: 0 };
        let path = tasks_of(USER).unwrap().doc(id).unwrap();
        store.set(&path, task.to_fields()).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_categories_sorted_by_position() {
        let store = MemoryStore::new();
        // ids sort opposite to positions
        create_category(&store, USER, &Category { id: "a".into(), name: "Later".into(), position: 5 }).await.unwrap();
        create_category(&store, USER, &Category { id: "z".into(), name: "First".into(), position: 0 }).await.unwrap();

        let names: Vec<String> = list_categories(&store, USER).await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["First", "Later"]);
    }

    #[tokio::test]
    async fn test_malformed_category_is_skipped() {
        let store = MemoryStore::new();
        create_category(&store, USER, &Category { id: "c1".into(), name: "Work".into(), position: 0 }).await.unwrap();
        let mut fields = doc_store::Fields::new();
        fields.insert("position".to_string(), 1i64.into());
        store.set(&categories_of(USER).unwrap().doc("c2").unwrap(), fields).await.unwrap();

        let categories = list_categories(&store, USER).await.unwrap();

        assert_eq!(categories, vec![Category { id: "c1".into(), name: "Work".into(), position: 0 }]);
    }

    #[tokio::test]
    async fn test_cascade_removes_remote_only_entries() {
        let store = MemoryStore::new();
        // Two category documents with the same name (e.g. written by another tab)
        create_category(&store, USER, &Category { id: "c1".into(), name: "Home".into(), position: 0 }).await.unwrap();
        create_category(&store, USER, &Category { id: "c2".into(), name: "Home".into(), position: 1 }).await.unwrap();
        create_category(&store, USER, &Category { id: "c3".into(), name: "Work".into(), position: 2 }).await.unwrap();
        seed_task(&store, "t1", "Home").await;
        seed_task(&store, "t2", "Home").await;
        seed_task(&store, "t3", "Work").await;

        let deleted = delete_category_cascade(&store, USER, "Home").await.unwrap();

        assert_eq!(deleted, 4);
        let remaining = store.list_children(&tasks_of(USER).unwrap()).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id(), "t3");
        let categories = list_categories(&store, USER).await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Work");
    }

    #[tokio::test]
    async fn test_cascade_write_failure_is_reported() {
        let store = MemoryStore::new();
        create_category(&store, USER, &Category { id: "c1".into(), name: "Home".into(), position: 0 }).await.unwrap();
        store.set_fail_writes(true);

        assert!(delete_category_cascade(&store, USER, "Home").await.is_err());
    }
}
