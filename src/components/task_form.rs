//! Task Form Component
//!
//! Category selector and new-task input.

use leptos::prelude::*;

use crate::store::{use_todo_store, TodoStateStoreFields};
use super::TodoController;

#[component]
pub fn TaskForm() -> impl IntoView {
    let store = use_todo_store();
    let controller = use_context::<TodoController>().expect("TodoController should be provided");

    let add_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        controller.add_task();
    };

    let no_selection = move || store.selected_category().with(Option::is_none);

    view! {
        <form class="task-add-form" on:submit=add_task>
            <select
                prop:value=move || store.selected_category().get().unwrap_or_default()
                on:change=move |ev| controller.select_category(&event_target_value(&ev))
            >
                <option value="">"Select a category"</option>
                <For
                    each=move || store.categories().get()
                    key=|category| category.id.clone()
                    children=move |category| {
                        let name = category.name;
                        let value = name.clone();
                        let label = name.clone();
                        let selected = move || store.selected_category().with(|s| s.as_deref() == Some(name.as_str()));
                        view! {
                            <option value=value prop:selected=selected>{label}</option>
                        }
                    }
                />
            </select>
            <input
                type="text"
                placeholder="New task"
                prop:value=move || store.task_input().get()
                on:input=move |ev| controller.set_task_input(event_target_value(&ev))
            />
            <button type="submit" disabled=no_selection>"Add Task"</button>
        </form>
        {move || store.with(|s| s.visible_warning()).map(|warning| view! {
            <p class="warning">{warning}</p>
        })}
    }
}
