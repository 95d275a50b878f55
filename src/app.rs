//! Todo Gate App
//!
//! Root component: builds the service clients from configuration and
//! switches between the landing page and the protected task list.

use std::rc::Rc;

use doc_store::{DocumentStore, FirestoreStore};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{AuthLanding, SessionGate, TodoList};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::identity::Auth0Identity;
use crate::router::Route;

#[component]
pub fn App() -> impl IntoView {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid configuration: {}", e);
            return view! {
                <div class="config-error">
                    <h1>"Configuration error"</h1>
                    <p>{e.to_string()}</p>
                </div>
            }
            .into_any();
        }
    };

    let store: Rc<dyn DocumentStore> = Rc::new(FirestoreStore::new(config.firestore()));
    let identity = Rc::new(Auth0Identity::new(config.identity.clone()));
    let ctx = AppContext::new(store, identity);
    provide_context(ctx);

    // Back/forward navigation
    let popstate = window_event_listener(leptos::ev::popstate, move |_| ctx.sync_route_from_location());
    on_cleanup(move || popstate.remove());

    spawn_local(ctx.bootstrap_auth());

    view! {
        <main class="app">
            {move || match ctx.route.get() {
                Route::Landing => view! { <AuthLanding /> }.into_any(),
                Route::Todo => view! {
                    <SessionGate>
                        <TodoList />
                    </SessionGate>
                }
                .into_any(),
            }}
        </main>
    }
    .into_any()
}
