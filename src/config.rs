//! App Configuration
//!
//! Service credentials for the identity provider and the document store.
//! Read from `window.__TODO_GATE_CONFIG__` when the host page sets it,
//! otherwise from values baked in at build time.

use doc_store::{FirestoreConfig, DEFAULT_BASE_URL, DEFAULT_DATABASE};
use serde::{Deserialize, Serialize};

/// Global the host page may define before the wasm bundle loads
const WINDOW_CONFIG_KEY: &str = "__TODO_GATE_CONFIG__";

/// Auth0 application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityConfig {
    pub domain: String,
    pub client_id: String,
    #[serde(default)]
    pub audience: Option<String>,
}

/// Firestore settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    pub project_id: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_database() -> String {
    DEFAULT_DATABASE.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            api_key: None,
            database: default_database(),
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub identity: IdentityConfig,
    pub store: StoreConfig,
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(field) => write!(f, "Missing configuration value: {}", field),
            ConfigError::Invalid(field, reason) => write!(f, "Invalid configuration value {}: {}", field, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    /// Resolve and validate the configuration for this page
    pub fn load() -> Result<Self, ConfigError> {
        let config = match Self::from_window()? {
            Some(config) => {
                tracing::info!("using configuration from {}", WINDOW_CONFIG_KEY);
                config
            }
            None => Self::from_build_env(),
        };
        config.validate()?;
        Ok(config)
    }

    fn from_window() -> Result<Option<Self>, ConfigError> {
        let Some(window) = web_sys::window() else {
            return Ok(None);
        };
        let value = js_sys::Reflect::get(&window, &WINDOW_CONFIG_KEY.into())
            .map_err(|e| ConfigError::Invalid("window config", format!("{:?}", e)))?;
        if value.is_undefined() || value.is_null() {
            return Ok(None);
        }
        serde_wasm_bindgen::from_value(value)
            .map(Some)
            .map_err(|e| ConfigError::Invalid("window config", e.to_string()))
    }

    /// Values from `TODO_GATE_*` variables at compile time
    pub fn from_build_env() -> Self {
        Self {
            identity: IdentityConfig {
                domain: option_env!("TODO_GATE_AUTH0_DOMAIN").unwrap_or_default().to_string(),
                client_id: option_env!("TODO_GATE_AUTH0_CLIENT_ID").unwrap_or_default().to_string(),
                audience: option_env!("TODO_GATE_AUTH0_AUDIENCE").map(str::to_string),
            },
            store: StoreConfig {
                project_id: option_env!("TODO_GATE_FIREBASE_PROJECT_ID").unwrap_or_default().to_string(),
                api_key: option_env!("TODO_GATE_FIREBASE_API_KEY").map(str::to_string),
                database: default_database(),
                base_url: option_env!("TODO_GATE_FIRESTORE_BASE_URL")
                    .map(str::to_string)
                    .unwrap_or_else(default_base_url),
            },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.identity.domain.trim().is_empty() {
            return Err(ConfigError::Missing("identity.domain"));
        }
        if self.identity.client_id.trim().is_empty() {
            return Err(ConfigError::Missing("identity.clientId"));
        }
        if self.store.project_id.trim().is_empty() {
            return Err(ConfigError::Missing("store.projectId"));
        }
        if self.store.database.trim().is_empty() {
            return Err(ConfigError::Missing("store.database"));
        }
        if !(self.store.base_url.starts_with("https://") || self.store.base_url.starts_with("http://")) {
            return Err(ConfigError::Invalid("store.baseUrl", "must be an http(s) URL".to_string()));
        }
        Ok(())
    }

    pub fn firestore(&self) -> FirestoreConfig {
        FirestoreConfig {
            base_url: self.store.base_url.clone(),
            project_id: self.store.project_id.clone(),
            database: self.store.database.clone(),
            api_key: self.store.api_key.clone().filter(|k| !k.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> AppConfig {
        serde_json::from_value(json!({
            "identity": { "domain": "example.eu.auth0.com", "clientId": "abc123" },
            "store": { "projectId": "to-do-app", "apiKey": "key" }
        }))
        .unwrap()
    }

    #[test]
    fn test_defaults_filled_in() {
        let config = valid();
        assert_eq!(config.store.database, "(default)");
        assert_eq!(config.store.base_url, "https://firestore.googleapis.com/v1");
        assert_eq!(config.identity.audience, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_values_rejected() {
        let mut config = valid();
        config.identity.client_id.clear();
        assert_eq!(config.validate(), Err(ConfigError::Missing("identity.clientId")));

        let mut config = valid();
        config.store.project_id = "  ".into();
        assert_eq!(config.validate(), Err(ConfigError::Missing("store.projectId")));
    }

    #[test]
    fn test_base_url_must_be_http() {
        let mut config = valid();
        config.store.base_url = "localhost:8080".into();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid("store.baseUrl", _))));
    }

    #[test]
    fn test_firestore_config_drops_empty_key() {
        let mut config = valid();
        config.store.api_key = Some(String::new());
        assert_eq!(config.firestore().api_key, None);
        assert_eq!(config.firestore().project_id, "to-do-app");
    }
}
