//! Task List State Store
//!
//! Uses Leptos reactive_stores for the task list's in-memory state.
//! All transitions are plain methods on `TodoState`; each one that needs
//! persisting returns the `SyncOp` to apply.

use std::collections::HashMap;

use leptos::prelude::expect_context;
use reactive_stores::Store;

use crate::models::{Category, Task};
use crate::sync::{FailedSync, SyncOp};

/// Warning shown when adding a task without a selected category
pub const SELECT_CATEGORY_WARNING: &str = "Please select a category and enter a task.";

/// Task currently being edited in place
#[derive(Clone, Debug, PartialEq)]
pub struct EditState {
    pub task_id: String,
    pub category: String,
    pub buffer: String,
}

/// Task list state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct TodoState {
    /// Categories in display order
    pub categories: Vec<Category>,
    /// Category name -> its tasks in display order
    pub tasks: HashMap<String, Vec<Task>>,
    /// New-category input text
    pub category_input: String,
    /// New-task input text
    pub task_input: String,
    pub selected_category: Option<String>,
    pub editing: Option<EditState>,
    pub warning: Option<String>,
    /// Writes that exhausted their retries
    pub failed_syncs: Vec<FailedSync>,
}

/// Type alias for the store
pub type TodoStore = Store<TodoState>;

/// Get the task list store from context
pub fn use_todo_store() -> TodoStore {
    expect_context::<TodoStore>()
}

impl TodoState {
    // ========================
    // Loading
    // ========================

    /// Replace categories and tasks with freshly loaded ones.
    ///
    /// Inputs must already be sorted by position. Duplicate category names
    /// keep the first; tasks naming an unknown category are dropped.
    /// Entries added locally while the load was in flight are kept after
    /// the loaded ones. Returns the number of dropped tasks.
    pub fn replace_loaded(&mut self, categories: Vec<Category>, tasks: Vec<Task>) -> usize {
        let local_categories = std::mem::take(&mut self.categories);
        let mut local_buckets = std::mem::take(&mut self.tasks);
        let local_tasks: Vec<Task> = local_categories
            .iter()
            .flat_map(|c| local_buckets.remove(&c.name).unwrap_or_default())
            .collect();

        for category in categories {
            if self.has_category(&category.name) {
                continue;
            }
            self.tasks.insert(category.name.clone(), Vec::new());
            self.categories.push(category);
        }

        for category in local_categories {
            if !self.has_category(&category.name) {
                self.tasks.insert(category.name.clone(), Vec::new());
                self.categories.push(category);
            }
        }

        let mut dropped = 0;
        for task in tasks {
            match self.tasks.get_mut(&task.category) {
                Some(bucket) => bucket.push(task),
                None => dropped += 1,
            }
        }

        for task in local_tasks {
            if self.find_task(&task.id).is_some() {
                continue;
            }
            if let Some(bucket) = self.tasks.get_mut(&task.category) {
                bucket.push(task);
            }
        }

        if let Some(selected) = &self.selected_category {
            if !self.tasks.contains_key(selected) {
                self.selected_category = None;
            }
        }
        dropped
    }

    // ========================
    // Queries
    // ========================

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    pub fn category_names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    /// Tasks of the selected category, or all tasks in category order
    pub fn visible_tasks(&self) -> Vec<Task> {
        match &self.selected_category {
            Some(name) => self.tasks.get(name).cloned().unwrap_or_default(),
            None => self
                .categories
                .iter()
                .flat_map(|c| self.tasks.get(&c.name).into_iter().flatten())
                .cloned()
                .collect(),
        }
    }

    pub fn find_task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.values().flatten().find(|t| t.id == task_id)
    }

    /// Warning to display: the select-category prompt while nothing is
    /// selected, otherwise the last warning set
    pub fn visible_warning(&self) -> Option<String> {
        match self.selected_category {
            None => Some(SELECT_CATEGORY_WARNING.to_string()),
            Some(_) => self.warning.clone(),
        }
    }

    pub fn is_editing(&self, task_id: &str) -> bool {
        self.editing.as_ref().map_or(false, |e| e.task_id == task_id)
    }

    fn next_category_position(&self) -> i64 {
        self.categories.iter().map(|c| c.position + 1).max().unwrap_or(0)
    }

    fn next_task_position(&self, category: &str) -> i64 {
        self.tasks
            .get(category)
            .and_then(|bucket| bucket.iter().map(|t| t.position + 1).max())
            .unwrap_or(0)
    }

    // ========================
    // Categories
    // ========================

    /// Append a category unless `name` is blank or already present
    pub fn add_category(&mut self, name: &str, id: String) -> Option<SyncOp> {
        if name.trim().is_empty() || self.has_category(name) {
            return None;
        }
        let category = Category {
            id,
            name: name.to_string(),
            position: self.next_category_position(),
        };
        self.tasks.insert(category.name.clone(), Vec::new());
        self.categories.push(category.clone());
        self.category_input.clear();
        Some(SyncOp::CreateCategory(category))
    }

    /// Remove a category and every task in it
    pub fn remove_category(&mut self, name: &str) -> Option<SyncOp> {
        if !self.has_category(name) {
            return None;
        }
        self.categories.retain(|c| c.name != name);
        self.tasks.remove(name);
        if self.selected_category.as_deref() == Some(name) {
            self.selected_category = None;
        }
        if self.editing.as_ref().map_or(false, |e| e.category == name) {
            self.editing = None;
        }
        Some(SyncOp::DeleteCategory { name: name.to_string() })
    }

    /// Select a category; an empty value clears the selection
    pub fn select_category(&mut self, value: &str) {
        if value.is_empty() || !self.has_category(value) {
            self.selected_category = None;
        } else {
            self.selected_category = Some(value.to_string());
            self.warning = None;
        }
    }

    // ========================
    // Tasks
    // ========================

    /// Append a task to the selected category
    pub fn add_task(&mut self, description: &str, id: String) -> Option<SyncOp> {
        let Some(category) = self.selected_category.clone() else {
            self.warning = Some(SELECT_CATEGORY_WARNING.to_string());
            return None;
        };
        if description.trim().is_empty() {
            return None;
        }
        let task = Task {
            id,
            description: description.to_string(),
            category: category.clone(),
            position: self.next_task_position(&category),
        };
        self.tasks.entry(category).or_default().push(task.clone());
        self.task_input.clear();
        self.warning = None;
        Some(SyncOp::CreateTask(task))
    }

    pub fn remove_task(&mut self, category: &str, task_id: &str) -> Option<SyncOp> {
        let bucket = self.tasks.get_mut(category)?;
        let before = bucket.len();
        bucket.retain(|t| t.id != task_id);
        if bucket.len() == before {
            return None;
        }
        if self.is_editing(task_id) {
            self.editing = None;
        }
        Some(SyncOp::DeleteTask { id: task_id.to_string() })
    }

    /// Start editing: copy the task's text into the buffer
    pub fn begin_edit(&mut self, task_id: &str) {
        if let Some(task) = self.find_task(task_id) {
            self.editing = Some(EditState {
                task_id: task.id.clone(),
                category: task.category.clone(),
                buffer: task.description.clone(),
            });
        }
    }

    pub fn set_edit_buffer(&mut self, text: String) {
        if let Some(edit) = self.editing.as_mut() {
            edit.buffer = text;
        }
    }

    /// Write the buffer back into the edited task
    pub fn commit_edit(&mut self) -> Option<SyncOp> {
        let edit = self.editing.take()?;
        let task = self
            .tasks
            .get_mut(&edit.category)?
            .iter_mut()
            .find(|t| t.id == edit.task_id)?;
        task.description = edit.buffer.clone();
        Some(SyncOp::UpdateTask {
            id: edit.task_id,
            description: edit.buffer,
        })
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    // ========================
    // Sync failures
    // ========================

    pub fn record_failure(&mut self, op: SyncOp, error: String) {
        self.failed_syncs.push(FailedSync { op, error });
    }

    /// Remove and return all failed ops (for a retry)
    pub fn take_failures(&mut self) -> Vec<FailedSync> {
        std::mem::take(&mut self.failed_syncs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(categories: &[&str]) -> TodoState {
        let mut state = TodoState::default();
        for (i, name) in categories.iter().enumerate() {
            state.add_category(name, format!("c{}", i));
        }
        state
    }

    fn add_task_to(state: &mut TodoState, category: &str, description: &str, id: &str) {
        state.select_category(category);
        state.add_task(description, id.to_string()).expect("task should be added");
    }

    fn descriptions(state: &TodoState, category: &str) -> Vec<String> {
        state.tasks[category].iter().map(|t| t.description.clone()).collect()
    }

    #[test]
    fn test_add_category_creates_empty_bucket() {
        let mut state = TodoState::default();
        let op = state.add_category("Work", "c1".to_string());

        assert_eq!(state.category_names(), vec!["Work"]);
        assert_eq!(state.tasks.len(), 1);
        assert!(state.tasks["Work"].is_empty());
        assert!(matches!(op, Some(SyncOp::CreateCategory(c)) if c.name == "Work" && c.id == "c1"));
    }

    #[test]
    fn test_add_category_twice_keeps_one() {
        let mut state = TodoState::default();
        state.add_category("Work", "c1".to_string());
        let second = state.add_category("Work", "c2".to_string());

        assert!(second.is_none());
        assert_eq!(state.category_names(), vec!["Work"]);
    }

    #[test]
    fn test_add_category_is_case_sensitive_and_rejects_blank() {
        let mut state = TodoState::default();
        assert!(state.add_category("   ", "c0".to_string()).is_none());
        state.add_category("Work", "c1".to_string());
        state.add_category("work", "c2".to_string());

        assert_eq!(state.category_names(), vec!["Work", "work"]);
    }

    #[test]
    fn test_add_category_clears_input_and_keeps_order() {
        let mut state = TodoState::default();
        state.category_input = "Home".to_string();
        state.add_category("Home", "c1".to_string());
        state.add_category("Work", "c2".to_string());

        assert!(state.category_input.is_empty());
        assert_eq!(state.categories[0].position, 0);
        assert_eq!(state.categories[1].position, 1);
    }

    #[test]
    fn test_remove_category_cascades_only_its_tasks() {
        let mut state = state_with(&["Work", "Home"]);
        add_task_to(&mut state, "Work", "Report", "t1");
        add_task_to(&mut state, "Home", "Buy milk", "t2");
        add_task_to(&mut state, "Home", "Laundry", "t3");

        let op = state.remove_category("Home");

        assert_eq!(op, Some(SyncOp::DeleteCategory { name: "Home".to_string() }));
        assert_eq!(state.category_names(), vec!["Work"]);
        assert!(!state.tasks.contains_key("Home"));
        assert_eq!(descriptions(&state, "Work"), vec!["Report"]);
    }

    #[test]
    fn test_remove_selected_category_clears_selection() {
        let mut state = state_with(&["Work", "Home"]);
        state.select_category("Home");

        state.remove_category("Home");

        assert_eq!(state.category_names(), vec!["Work"]);
        assert!(!state.tasks.contains_key("Home"));
        assert_eq!(state.selected_category, None);
    }

    #[test]
    fn test_remove_category_clears_edit_of_its_task() {
        let mut state = state_with(&["Home"]);
        add_task_to(&mut state, "Home", "Buy milk", "t1");
        state.begin_edit("t1");

        state.remove_category("Home");

        assert!(state.editing.is_none());
    }

    #[test]
    fn test_add_task_without_category_warns() {
        let mut state = state_with(&["Work"]);
        state.select_category("");

        let op = state.add_task("x", "t1".to_string());

        assert!(op.is_none());
        assert!(state.tasks["Work"].is_empty());
        assert_eq!(state.warning.as_deref(), Some(SELECT_CATEGORY_WARNING));
    }

    #[test]
    fn test_add_task_appends_and_clears_warning() {
        let mut state = state_with(&["Work"]);
        state.add_task("x", "t0".to_string());
        assert!(state.warning.is_some());

        state.select_category("Work");
        state.task_input = "Buy milk".to_string();
        let op = state.add_task("Buy milk", "t1".to_string());

        assert!(matches!(op, Some(SyncOp::CreateTask(ref t)) if t.category == "Work"));
        assert_eq!(descriptions(&state, "Work"), vec!["Buy milk"]);
        assert!(state.task_input.is_empty());
        assert!(state.warning.is_none());
    }

    #[test]
    fn test_add_blank_task_is_noop() {
        let mut state = state_with(&["Work"]);
        state.select_category("Work");
        assert!(state.add_task("  ", "t1".to_string()).is_none());
        assert!(state.tasks["Work"].is_empty());
    }

    #[test]
    fn test_remove_task() {
        let mut state = state_with(&["Work"]);
        add_task_to(&mut state, "Work", "Buy milk", "t1");

        let op = state.remove_task("Work", "t1");

        assert_eq!(op, Some(SyncOp::DeleteTask { id: "t1".to_string() }));
        assert!(state.tasks["Work"].is_empty());
        assert!(state.remove_task("Work", "t1").is_none());
    }

    #[test]
    fn test_commit_edit_replaces_only_that_task() {
        let mut state = state_with(&["Work"]);
        add_task_to(&mut state, "Work", "a", "t1");
        add_task_to(&mut state, "Work", "b", "t2");
        add_task_to(&mut state, "Work", "c", "t3");

        state.begin_edit("t2");
        assert_eq!(state.editing.as_ref().unwrap().buffer, "b");
        state.set_edit_buffer("B!".to_string());
        let op = state.commit_edit();

        assert_eq!(op, Some(SyncOp::UpdateTask { id: "t2".to_string(), description: "B!".to_string() }));
        assert_eq!(descriptions(&state, "Work"), vec!["a", "B!", "c"]);
        assert!(state.editing.is_none());
    }

    #[test]
    fn test_cancel_edit_leaves_tasks_unchanged() {
        let mut state = state_with(&["Work"]);
        add_task_to(&mut state, "Work", "a", "t1");
        let before = state.tasks.clone();

        state.begin_edit("t1");
        state.set_edit_buffer("changed".to_string());
        state.cancel_edit();

        assert_eq!(state.tasks, before);
        assert!(state.editing.is_none());
        assert!(state.commit_edit().is_none());
    }

    #[test]
    fn test_visible_tasks_follow_selection() {
        let mut state = state_with(&["Work", "Home"]);
        add_task_to(&mut state, "Home", "h1", "t1");
        add_task_to(&mut state, "Work", "w1", "t2");

        state.select_category("");
        let all: Vec<String> = state.visible_tasks().into_iter().map(|t| t.description).collect();
        assert_eq!(all, vec!["w1", "h1"]);

        state.select_category("Home");
        let home: Vec<String> = state.visible_tasks().into_iter().map(|t| t.description).collect();
        assert_eq!(home, vec!["h1"]);
    }

    #[test]
    fn test_replace_loaded_drops_orphans_and_duplicates() {
        let mut state = TodoState::default();
        let categories = vec![
            Category { id: "c1".into(), name: "Work".into(), position: 0 },
            Category { id: "c2".into(), name: "Work".into(), position: 1 },
            Category { id: "c3".into(), name: "Home".into(), position: 2 },
        ];
        let tasks = vec![
            Task { id: "t1".into(), description: "a".into(), category: "Work".into(), position: 0 },
            Task { id: "t2".into(), description: "b".into(), category: "Gone".into(), position: 0 },
        ];

        let dropped = state.replace_loaded(categories, tasks);

        assert_eq!(dropped, 1);
        assert_eq!(state.category_names(), vec!["Work", "Home"]);
        assert_eq!(descriptions(&state, "Work"), vec!["a"]);
        assert!(state.tasks["Home"].is_empty());
    }

    #[test]
    fn test_replace_loaded_keeps_entries_added_during_load() {
        let mut state = state_with(&["Inbox"]);
        add_task_to(&mut state, "Inbox", "local", "t9");
        state.select_category("");

        // "Inbox" already landed remotely, its task did not
        let categories = vec![
            Category { id: "c1".into(), name: "Work".into(), position: 0 },
            Category { id: "c0".into(), name: "Inbox".into(), position: 1 },
        ];
        let tasks = vec![Task { id: "t1".into(), description: "remote".into(), category: "Work".into(), position: 0 }];

        state.replace_loaded(categories, tasks);

        assert_eq!(state.category_names(), vec!["Work", "Inbox"]);
        assert_eq!(descriptions(&state, "Work"), vec!["remote"]);
        assert_eq!(descriptions(&state, "Inbox"), vec!["local"]);
    }

    #[test]
    fn test_replace_loaded_does_not_duplicate_landed_task() {
        let mut state = state_with(&["Work"]);
        add_task_to(&mut state, "Work", "a", "t1");
        let landed = state.tasks["Work"].clone();

        state.replace_loaded(state.categories.clone(), landed);

        assert_eq!(descriptions(&state, "Work"), vec!["a"]);
    }

    #[test]
    fn test_visible_warning_follows_selection() {
        let mut state = state_with(&["Work"]);
        assert_eq!(state.visible_warning().as_deref(), Some(SELECT_CATEGORY_WARNING));

        state.select_category("Work");
        assert_eq!(state.visible_warning(), None);

        state.select_category("");
        state.add_task("x", "t1".to_string());
        assert_eq!(state.visible_warning().as_deref(), Some(SELECT_CATEGORY_WARNING));
    }

    #[test]
    fn test_take_failures_empties_list() {
        let mut state = TodoState::default();
        state.record_failure(SyncOp::DeleteTask { id: "t1".into() }, "offline".into());
        assert_eq!(state.take_failures().len(), 1);
        assert!(state.failed_syncs.is_empty());
    }
}
