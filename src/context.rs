//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::rc::Rc;

use doc_store::DocumentStore;
use leptos::prelude::*;

use crate::identity::{is_redirect_callback, Auth0Identity, AuthStatus};
use crate::router::{self, Route};

/// App-wide signals and service handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Authentication status - read
    pub auth: ReadSignal<AuthStatus>,
    /// Authentication status - write
    set_auth: WriteSignal<AuthStatus>,
    /// Current route - read
    pub route: ReadSignal<Route>,
    /// Current route - write
    set_route: WriteSignal<Route>,
    store: StoredValue<Rc<dyn DocumentStore>, LocalStorage>,
    identity: StoredValue<Rc<Auth0Identity>, LocalStorage>,
}

impl AppContext {
    pub fn new(store: Rc<dyn DocumentStore>, identity: Rc<Auth0Identity>) -> Self {
        let (auth, set_auth) = signal(AuthStatus::Loading);
        let (route, set_route) = signal(router::current());
        Self {
            auth,
            set_auth,
            route,
            set_route,
            store: StoredValue::new_local(store),
            identity: StoredValue::new_local(identity),
        }
    }

    pub fn store(&self) -> Rc<dyn DocumentStore> {
        self.store.get_value()
    }

    pub fn identity(&self) -> Rc<Auth0Identity> {
        self.identity.get_value()
    }

    /// Go to `route`, pushing a history entry if it differs
    pub fn navigate(&self, route: Route) {
        if self.route.get_untracked() == route {
            return;
        }
        tracing::debug!(path = route.path(), "navigate");
        router::push(route);
        self.set_route.set(route);
    }

    /// Re-read the route after back/forward navigation
    pub fn sync_route_from_location(&self) {
        self.set_route.set(router::current());
    }

    pub fn set_auth(&self, status: AuthStatus) {
        self.set_auth.set(status);
    }

    /// Key of the signed-in user's documents (untracked)
    pub fn user_key(&self) -> Option<String> {
        self.auth
            .with_untracked(|status| status.profile().and_then(|p| p.user_key()).map(str::to_string))
    }

    /// Ask the identity provider for the current status
    pub async fn refresh_auth(self) {
        match self.identity().status().await {
            Ok(status) => {
                tracing::info!(authenticated = status.is_authenticated(), "auth status resolved");
                self.set_auth(status);
            }
            Err(e) => {
                tracing::error!("failed to read auth status: {}", e);
                self.set_auth(AuthStatus::Anonymous);
            }
        }
    }

    /// First status check on page load. Completes a pending redirect login
    /// when the URL carries the provider's callback parameters.
    pub async fn bootstrap_auth(self) {
        if is_redirect_callback(&router::current_search()) {
            match self.identity().handle_redirect_callback().await {
                Ok(()) => tracing::info!("redirect login completed"),
                Err(e) => tracing::error!("redirect callback failed: {}", e),
            }
            router::clear_query();
        }
        self.refresh_auth().await;
    }

    /// Sign out and return to the landing page
    pub async fn logout(self) {
        let return_to = router::origin();
        if let Err(e) = self.identity().logout(&return_to).await {
            tracing::error!("logout failed: {}", e);
            return;
        }
        self.set_auth(AuthStatus::Anonymous);
        self.navigate(Route::Landing);
    }
}
