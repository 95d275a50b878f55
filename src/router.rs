//! Routing
//!
//! Two client-side routes on top of the History API.

use wasm_bindgen::JsValue;

/// Client-side routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`: sign-in page
    Landing,
    /// `/todo`: protected task list
    Todo,
}

impl Route {
    /// Resolve a pathname; unknown paths fall back to the landing page
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/todo" => Route::Todo,
            _ => Route::Landing,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Todo => "/todo",
        }
    }
}

/// Route of the current location
pub fn current() -> Route {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .map(|p| Route::from_path(&p))
        .unwrap_or(Route::Landing)
}

/// Query string of the current location, including the leading `?`
pub fn current_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

pub fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Push a history entry for `route`
pub fn push(route: Route) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(route.path())) {
        tracing::warn!("history push failed: {:?}", e);
    }
}

/// Drop the query string without adding a history entry
pub fn clear_query() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let path = window.location().pathname().unwrap_or_else(|_| "/".to_string());
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&path));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(Route::from_path("/"), Route::Landing);
        assert_eq!(Route::from_path(""), Route::Landing);
        assert_eq!(Route::from_path("/todo"), Route::Todo);
        assert_eq!(Route::from_path("/todo/"), Route::Todo);
        assert_eq!(Route::from_path("/settings"), Route::Landing);
    }

    #[test]
    fn test_path_resolves_back() {
        for route in [Route::Landing, Route::Todo] {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }
}
