//! Identity Service Bindings
//!
//! Frontend bindings to the Auth0 SPA SDK (`auth0.createAuth0Client`),
//! loaded by the host page. The SDK client is created on first use.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::IdentityConfig;

#[wasm_bindgen]
extern "C" {
    #[derive(Clone)]
    type Auth0Client;

    #[wasm_bindgen(catch, js_namespace = ["window", "auth0"], js_name = createAuth0Client)]
    async fn create_auth0_client(options: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = loginWithPopup)]
    async fn login_with_popup(this: &Auth0Client) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = loginWithRedirect)]
    async fn login_with_redirect(this: &Auth0Client) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = handleRedirectCallback)]
    async fn handle_redirect_callback(this: &Auth0Client) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch)]
    async fn logout(this: &Auth0Client, options: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = isAuthenticated)]
    async fn is_authenticated(this: &Auth0Client) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = getUser)]
    async fn get_user(this: &Auth0Client) -> Result<JsValue, JsValue>;
}

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientOptions<'a> {
    domain: &'a str,
    client_id: &'a str,
    cache_location: &'a str,
    authorization_params: AuthorizationParams<'a>,
}

#[derive(Serialize)]
struct AuthorizationParams<'a> {
    redirect_uri: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    audience: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LogoutOptions<'a> {
    logout_params: LogoutParams<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LogoutParams<'a> {
    return_to: &'a str,
}

// ========================
// Profile and Status
// ========================

/// Claims of the signed-in user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Every other claim the provider returned
    #[serde(flatten)]
    pub claims: serde_json::Map<String, serde_json::Value>,
}

impl UserProfile {
    /// Document key for this user: email, falling back to `sub`
    pub fn user_key(&self) -> Option<&str> {
        self.email
            .as_deref()
            .filter(|e| !e.is_empty())
            .or_else(|| self.sub.as_deref().filter(|s| !s.is_empty()))
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("there")
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Authentication status as observed by the views
#[derive(Debug, Clone, PartialEq)]
pub enum AuthStatus {
    /// SDK has not answered yet
    Loading,
    Anonymous,
    Authenticated(UserProfile),
}

impl AuthStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthStatus::Authenticated(_))
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            AuthStatus::Authenticated(profile) => Some(profile),
            _ => None,
        }
    }
}

/// True when the query string carries an authorization response
pub fn is_redirect_callback(search: &str) -> bool {
    let params: Vec<&str> = search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split('=').next())
        .collect();
    (params.contains(&"code") || params.contains(&"error")) && params.contains(&"state")
}

// ========================
// Client
// ========================

/// Auth0 SPA SDK wrapper
pub struct Auth0Identity {
    config: IdentityConfig,
    client: RefCell<Option<Auth0Client>>,
}

impl Auth0Identity {
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            config,
            client: RefCell::new(None),
        }
    }

    async fn client(&self) -> Result<Auth0Client, String> {
        let cached = self.client.borrow().clone();
        if let Some(client) = cached {
            return Ok(client);
        }

        let origin = crate::router::origin();
        let options = ClientOptions {
            domain: &self.config.domain,
            client_id: &self.config.client_id,
            cache_location: "localstorage",
            authorization_params: AuthorizationParams {
                redirect_uri: &origin,
                audience: self.config.audience.as_deref(),
            },
        };
        let js_options = serde_wasm_bindgen::to_value(&options).map_err(|e| e.to_string())?;
        let client: Auth0Client = create_auth0_client(js_options).await.map_err(js_error)?.unchecked_into();
        *self.client.borrow_mut() = Some(client.clone());
        Ok(client)
    }

    pub async fn login_with_popup(&self) -> Result<(), String> {
        self.client().await?.login_with_popup().await.map_err(js_error)?;
        Ok(())
    }

    pub async fn login_with_redirect(&self) -> Result<(), String> {
        self.client().await?.login_with_redirect().await.map_err(js_error)?;
        Ok(())
    }

    /// Finish a redirect login after the provider sends the browser back
    pub async fn handle_redirect_callback(&self) -> Result<(), String> {
        self.client().await?.handle_redirect_callback().await.map_err(js_error)?;
        Ok(())
    }

    pub async fn logout(&self, return_to: &str) -> Result<(), String> {
        let options = LogoutOptions {
            logout_params: LogoutParams { return_to },
        };
        let js_options = serde_wasm_bindgen::to_value(&options).map_err(|e| e.to_string())?;
        self.client().await?.logout(js_options).await.map_err(js_error)?;
        Ok(())
    }

    /// Current status and, when signed in, the user's claims
    pub async fn status(&self) -> Result<AuthStatus, String> {
        let client = self.client().await?;
        let authenticated = client.is_authenticated().await.map_err(js_error)?.as_bool().unwrap_or(false);
        if !authenticated {
            return Ok(AuthStatus::Anonymous);
        }
        let user = client.get_user().await.map_err(js_error)?;
        if user.is_undefined() || user.is_null() {
            return Ok(AuthStatus::Anonymous);
        }
        let profile: UserProfile = serde_wasm_bindgen::from_value(user).map_err(|e| e.to_string())?;
        Ok(AuthStatus::Authenticated(profile))
    }
}

fn js_error(value: JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
