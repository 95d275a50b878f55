//! Category Panel Component
//!
//! Add-category form and the list of categories with delete buttons.

use leptos::prelude::*;

use crate::store::{use_todo_store, TodoStateStoreFields};
use super::{DeleteConfirmButton, TodoController};

#[component]
pub fn CategoryPanel() -> impl IntoView {
    let store = use_todo_store();
    let controller = use_context::<TodoController>().expect("TodoController should be provided");

    let add_category = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        controller.add_category();
    };

    view! {
        <section class="category-panel">
            <form class="category-add-form" on:submit=add_category>
                <input
                    type="text"
                    placeholder="New category"
                    prop:value=move || store.category_input().get()
                    on:input=move |ev| controller.set_category_input(event_target_value(&ev))
                />
                <button type="submit">"Add Category"</button>
            </form>

            <ul class="category-list">
                <For
                    each=move || store.categories().get()
                    key=|category| category.id.clone()
                    children=move |category| {
                        let name = category.name.clone();
                        view! {
                            <li class="category-row">
                                <span class="category-name">{category.name}</span>
                                <DeleteConfirmButton
                                    label="Delete"
                                    button_class="delete-btn"
                                    on_confirm=move |_| controller.remove_category(&name)
                                />
                            </li>
                        }
                    }
                />
            </ul>
        </section>
    }
}
