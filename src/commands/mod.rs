//! Store Commands
//!
//! Per-user operations against the document store, organized by domain.
//! Every function takes the store explicitly; nothing here holds state.

mod category;
mod task;
mod user;

use std::future::Future;

use doc_store::{CollectionPath, DocumentPath, DocumentStore, StoreResult};

use crate::models::{Category, Task};
use crate::sync::{run_with_retry, RetryPolicy, SyncOp};

// Re-export all public items
pub use category::*;
pub use task::*;
pub use user::*;

const USERS: &str = "users";
const CATEGORIES: &str = "categories";
const TASKS: &str = "tasks";

// ========================
// Paths
// ========================

/// `users/{user_key}`
pub fn user_doc(user_key: &str) -> StoreResult<DocumentPath> {
    DocumentPath::new(USERS, user_key)
}

/// `users/{user_key}/categories`
pub fn categories_of(user_key: &str) -> StoreResult<CollectionPath> {
    user_doc(user_key)?.collection(CATEGORIES)
}

/// `users/{user_key}/tasks`
pub fn tasks_of(user_key: &str) -> StoreResult<CollectionPath> {
    user_doc(user_key)?.collection(TASKS)
}

// ========================
// Commands
// ========================

/// Load all categories and tasks of a user, each sorted by position
pub async fn load_todo(store: &dyn DocumentStore, user_key: &str) -> StoreResult<(Vec<Category>, Vec<Task>)> {
    let categories = list_categories(store, user_key).await?;
    let tasks = list_tasks(store, user_key).await?;
    Ok((categories, tasks))
}

/// Apply one local mutation to the store
pub async fn apply(store: &dyn DocumentStore, user_key: &str, op: &SyncOp) -> StoreResult<()> {
    match op {
        SyncOp::CreateCategory(category) => create_category(store, user_key, category).await,
        SyncOp::DeleteCategory { name } => delete_category_cascade(store, user_key, name).await.map(|_| ()),
        SyncOp::CreateTask(task) => create_task(store, user_key, task).await,
        SyncOp::UpdateTask { id, description } => update_task_description(store, user_key, id, description).await,
        SyncOp::DeleteTask { id } => delete_task(store, user_key, id).await,
    }
}

/// Apply one local mutation, retrying per `policy`
pub async fn apply_with_retry<Sleep, SleepFut>(
    store: &dyn DocumentStore,
    user_key: &str,
    op: &SyncOp,
    policy: &RetryPolicy,
    sleep: Sleep,
) -> StoreResult<()>
where
    Sleep: FnMut(u32) -> SleepFut,
    SleepFut: Future<Output = ()>,
{
    run_with_retry(policy, |e| op.is_retryable(e), || apply(store, user_key, op), sleep).await
}
