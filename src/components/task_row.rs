//! Task Row Component
//!
//! One task: "description - category" with Edit/Delete, or the edit form.

use leptos::prelude::*;

use crate::models::Task;
use crate::store::{use_todo_store, TodoStateStoreFields};
use super::{DeleteConfirmButton, TodoController};

#[component]
pub fn TaskRow(task: Task) -> impl IntoView {
    let store = use_todo_store();
    let controller = use_context::<TodoController>().expect("TodoController should be provided");

    let id = task.id.clone();
    let label = format!("{} - {}", task.description, task.category);
    let is_editing = {
        let id = id.clone();
        move || store.editing().with(|e| e.as_ref().map_or(false, |e| e.task_id == id))
    };

    let commit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        controller.commit_edit();
    };

    move || {
        if is_editing() {
            view! {
                <li class="task-row editing">
                    <form class="task-edit-form" on:submit=commit>
                        <input
                            type="text"
                            prop:value=move || {
                                store.editing().with(|e| e.as_ref().map(|e| e.buffer.clone()).unwrap_or_default())
                            }
                            on:input=move |ev| controller.set_edit_buffer(event_target_value(&ev))
                        />
                        <button type="submit">"Save"</button>
                        <button type="button" on:click=move |_| controller.cancel_edit()>"Cancel"</button>
                    </form>
                </li>
            }
            .into_any()
        } else {
            let edit_id = id.clone();
            let delete_id = id.clone();
            let category = task.category.clone();
            view! {
                <li class="task-row">
                    <span class="task-text">{label.clone()}</span>
                    <button class="edit-btn" on:click=move |_| controller.begin_edit(&edit_id)>"Edit"</button>
                    <DeleteConfirmButton
                        label="Delete"
                        button_class="delete-btn"
                        on_confirm=move |_| controller.remove_task(&category, &delete_id)
                    />
                </li>
            }
            .into_any()
        }
    }
}
