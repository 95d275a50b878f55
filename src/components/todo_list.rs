//! Task List Component
//!
//! Protected page: categories, the task form and the task list.
//! `TodoController` applies each change to the local store first, then
//! writes it to the document store in the background.

use doc_store::auto_id;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands;
use crate::context::AppContext;
use crate::store::{TodoState, TodoStore};
use crate::sync::{sleep_ms, RetryPolicy, SyncOp};
use super::{CategoryPanel, SyncBanner, TaskForm, TaskRow};

/// Task list actions, provided via context
#[derive(Clone, Copy)]
pub struct TodoController {
    ctx: AppContext,
    store: TodoStore,
}

impl TodoController {
    pub fn new(ctx: AppContext, store: TodoStore) -> Self {
        Self { ctx, store }
    }

    /// Write one change to the document store with retries
    fn persist(&self, op: Option<SyncOp>) {
        let Some(op) = op else {
            return;
        };
        let Some(user_key) = self.ctx.user_key() else {
            tracing::warn!(op = %op.describe(), "no signed-in user, change kept locally only");
            return;
        };
        let backend = self.ctx.store();
        let store = self.store;

        spawn_local(async move {
            let policy = RetryPolicy::default();
            let result = commands::apply_with_retry(backend.as_ref(), &user_key, &op, &policy, sleep_ms).await;

            match result {
                Ok(()) => tracing::debug!(op = %op.describe(), "saved"),
                Err(e) => {
                    tracing::error!(op = %op.describe(), "change could not be saved: {}", e);
                    store.update(|s| s.record_failure(op, e.to_string()));
                }
            }
        });
    }

    /// Fetch the signed-in user's categories and tasks
    pub fn load_initial(&self) {
        let Some(user_key) = self.ctx.user_key() else {
            return;
        };
        let backend = self.ctx.store();
        let store = self.store;

        spawn_local(async move {
            match commands::load_todo(backend.as_ref(), &user_key).await {
                Ok((categories, tasks)) => {
                    let (category_count, task_count) = (categories.len(), tasks.len());
                    let dropped = store
                        .try_update(|s| s.replace_loaded(categories, tasks))
                        .unwrap_or(0);
                    if dropped > 0 {
                        tracing::warn!(dropped, "ignored tasks without a matching category");
                    }
                    tracing::info!(categories = category_count, tasks = task_count, "task list loaded");
                }
                Err(e) => tracing::error!("failed to load task list: {}", e),
            }
        });
    }

    // ========================
    // Categories
    // ========================

    pub fn set_category_input(&self, text: String) {
        self.store.update(|s| s.category_input = text);
    }

    /// Add the category typed in the input
    pub fn add_category(&self) {
        let op = self
            .store
            .try_update(|s| {
                let name = s.category_input.clone();
                s.add_category(&name, auto_id())
            })
            .flatten();
        self.persist(op);
    }

    pub fn remove_category(&self, name: &str) {
        let op = self.store.try_update(|s| s.remove_category(name)).flatten();
        self.persist(op);
    }

    pub fn select_category(&self, value: &str) {
        self.store.update(|s| s.select_category(value));
    }

    // ========================
    // Tasks
    // ========================

    pub fn set_task_input(&self, text: String) {
        self.store.update(|s| s.task_input = text);
    }

    /// Add the task typed in the input to the selected category
    pub fn add_task(&self) {
        let op = self
            .store
            .try_update(|s| {
                let description = s.task_input.clone();
                s.add_task(&description, auto_id())
            })
            .flatten();
        self.persist(op);
    }

    pub fn remove_task(&self, category: &str, task_id: &str) {
        let op = self.store.try_update(|s| s.remove_task(category, task_id)).flatten();
        self.persist(op);
    }

    pub fn begin_edit(&self, task_id: &str) {
        self.store.update(|s| s.begin_edit(task_id));
    }

    pub fn set_edit_buffer(&self, text: String) {
        self.store.update(|s| s.set_edit_buffer(text));
    }

    pub fn commit_edit(&self) {
        let op = self.store.try_update(|s| s.commit_edit()).flatten();
        self.persist(op);
    }

    pub fn cancel_edit(&self) {
        self.store.update(|s| s.cancel_edit());
    }

    // ========================
    // Sync failures
    // ========================

    /// Re-apply every failed change
    pub fn retry_failed(&self) {
        let failed = self.store.try_update(|s| s.take_failures()).unwrap_or_default();
        tracing::info!(count = failed.len(), "retrying failed changes");
        for failure in failed {
            self.persist(Some(failure.op));
        }
    }

    pub fn dismiss_failed(&self) {
        self.store.update(|s| {
            s.take_failures();
        });
    }

    pub fn logout(&self) {
        spawn_local(self.ctx.logout());
    }
}

#[component]
pub fn TodoList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = Store::new(TodoState::default());
    let controller = TodoController::new(ctx, store);
    provide_context(store);
    provide_context(controller);

    // Initial load once signed in
    Effect::new(move |_| {
        if ctx.auth.with(|s| s.is_authenticated()) {
            controller.load_initial();
        }
    });

    let welcome = move || {
        let name = ctx.auth.with(|s| s.profile().map(|p| p.display_name().to_string()));
        format!("Welcome, {}!", name.unwrap_or_default())
    };

    view! {
        <div class="todo-page">
            <header class="todo-header">
                <h2>{welcome}</h2>
                <button class="logout-btn" on:click=move |_| controller.logout()>"Log Out"</button>
            </header>

            <SyncBanner />
            <CategoryPanel />
            <TaskForm />

            <ul class="task-list">
                <For
                    each=move || store.with(|s| s.visible_tasks())
                    key=|task| (task.id.clone(), task.description.clone())
                    children=move |task| view! { <TaskRow task=task /> }
                />
            </ul>
        </div>
    }
}
