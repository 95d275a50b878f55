//! Sync Banner Component
//!
//! Lists changes that could not be saved, with Retry and Dismiss.

use leptos::prelude::*;

use crate::store::{use_todo_store, TodoStateStoreFields};
use super::TodoController;

#[component]
pub fn SyncBanner() -> impl IntoView {
    let store = use_todo_store();
    let controller = use_context::<TodoController>().expect("TodoController should be provided");

    let count = move || store.failed_syncs().with(Vec::len);

    view! {
        <Show when=move || { count() > 0 }>
            <div class="sync-banner" role="alert">
                <strong>{move || format!("{} change(s) could not be saved", count())}</strong>
                <ul class="sync-failures">
                    {move || store.failed_syncs().get().into_iter().map(|failure| view! {
                        <li>{failure.op.describe()} ": " {failure.error}</li>
                    }).collect_view()}
                </ul>
                <button on:click=move |_| controller.retry_failed()>"Retry"</button>
                <button on:click=move |_| controller.dismiss_failed()>"Dismiss"</button>
            </div>
        </Show>
    }
}
