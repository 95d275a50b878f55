//! Task Commands
//!
//! Task documents under `users/{email}/tasks`.

use doc_store::{DocumentStore, Fields, Record, StoreResult};

use crate::models::Task;
use super::tasks_of;

/// All tasks, sorted by position (ties by id). Undecodable documents are skipped.
pub async fn list_tasks(store: &dyn DocumentStore, user_key: &str) -> StoreResult<Vec<Task>> {
    let docs = store.list_children(&tasks_of(user_key)?).await?;
    let mut tasks: Vec<Task> = docs
        .iter()
        .filter_map(|doc| match Task::from_document(doc) {
            Ok(task) => Some(task),
            Err(e) => {
                tracing::warn!(path = %doc.path, "skipping malformed task: {}", e);
                None
            }
        })
        .collect();
    tasks.sort_by(|a, b| (a.position, &a.id).cmp(&(b.position, &b.id)));
    Ok(tasks)
}

pub async fn create_task(store: &dyn DocumentStore, user_key: &str, task: &Task) -> StoreResult<()> {
    let path = tasks_of(user_key)?.doc(&task.id)?;
    store.set(&path, task.to_fields()).await
}

/// Replace only the description field
pub async fn update_task_description(
    store: &dyn DocumentStore,
    user_key: &str,
    task_id: &str,
    description: &str,
) -> StoreResult<()> {
    let path = tasks_of(user_key)?.doc(task_id)?;
    let mut fields = Fields::new();
    fields.insert("description".to_string(), description.into());
    store.update(&path, fields).await
}

pub async fn delete_task(store: &dyn DocumentStore, user_key: &str, task_id: &str) -> StoreResult<()> {
    let path = tasks_of(user_key)?.doc(task_id)?;
    store.delete(&path).await
}
