//! Auth Landing Component
//!
//! Sign-in page. Once the user is signed in, provisions their user record
//! and hands off to the task list.

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::AppContext;
use crate::router::Route;

#[component]
pub fn AuthLanding() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (busy, set_busy) = signal(false);

    let login_popup = move |_| {
        set_busy.set(true);
        spawn_local(async move {
            if let Err(e) = ctx.identity().login_with_popup().await {
                tracing::error!("popup login failed: {}", e);
            }
            ctx.refresh_auth().await;
            set_busy.set(false);
        });
    };

    let login_redirect = move |_| {
        set_busy.set(true);
        spawn_local(async move {
            // On success the browser leaves the page
            if let Err(e) = ctx.identity().login_with_redirect().await {
                tracing::error!("redirect login failed: {}", e);
                set_busy.set(false);
            }
        });
    };

    // Provision the user record, then hand off
    Effect::new(move |_| {
        let key = ctx
            .auth
            .with(|status| status.profile().map(|p| p.user_key().map(str::to_string)));
        let Some(key) = key else {
            return;
        };
        let Some(key) = key else {
            tracing::warn!("signed-in profile has neither email nor sub");
            return;
        };
        spawn_local(async move {
            let store = ctx.store();
            match commands::ensure_user_record(store.as_ref(), &key, Utc::now()).await {
                Ok(true) => tracing::info!(user = %key, "created user record"),
                Ok(false) => tracing::debug!(user = %key, "user record exists"),
                Err(e) => tracing::error!(user = %key, "failed to provision user record: {}", e),
            }
            ctx.navigate(Route::Todo);
        });
    });

    let status_text = move || {
        if ctx.auth.with(|s| s.is_authenticated()) {
            "User is Logged in"
        } else {
            "User is Not logged in"
        }
    };

    view! {
        <div class="landing">
            <h1>"Todo Gate"</h1>
            <div class="login-buttons">
                <button on:click=login_popup disabled=move || busy.get()>"Log In with Popup"</button>
                <button on:click=login_redirect disabled=move || busy.get()>"Log In with Redirect"</button>
            </div>
            <h3>{status_text}</h3>
            {move || ctx.auth.with(|s| s.profile().map(|p| p.to_pretty_json())).map(|json| view! {
                <pre class="profile-json">{json}</pre>
            })}
        </div>
    }
}
