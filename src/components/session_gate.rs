//! Session Gate Component
//!
//! Renders protected children only for a signed-in user.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::identity::AuthStatus;
use crate::router::Route;

/// What the gate does for a given auth status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Status unknown; show a placeholder
    Wait,
    Render,
    Redirect(Route),
}

impl GateDecision {
    pub fn for_status(status: &AuthStatus) -> Self {
        match status {
            AuthStatus::Loading => GateDecision::Wait,
            AuthStatus::Authenticated(_) => GateDecision::Render,
            AuthStatus::Anonymous => GateDecision::Redirect(Route::Landing),
        }
    }
}

/// Wraps a protected view; sends anonymous visitors to the landing page
#[component]
pub fn SessionGate(children: ChildrenFn) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let decision = Memo::new(move |_| ctx.auth.with(GateDecision::for_status));

    Effect::new(move |_| {
        if let GateDecision::Redirect(route) = decision.get() {
            tracing::info!(path = route.path(), "not signed in, redirecting");
            ctx.navigate(route);
        }
    });

    move || match decision.get() {
        GateDecision::Wait => view! { <p class="loading">"Loading..."</p> }.into_any(),
        GateDecision::Render => children().into_any(),
        GateDecision::Redirect(_) => ().into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::UserProfile;

    #[test]
    fn test_gate_decisions() {
        assert_eq!(GateDecision::for_status(&AuthStatus::Loading), GateDecision::Wait);
        assert_eq!(
            GateDecision::for_status(&AuthStatus::Anonymous),
            GateDecision::Redirect(Route::Landing)
        );
        let signed_in = AuthStatus::Authenticated(UserProfile {
            email: Some("ada@example.com".into()),
            ..Default::default()
        });
        assert_eq!(GateDecision::for_status(&signed_in), GateDecision::Render);
    }
}
