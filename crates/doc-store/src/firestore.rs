//! Firestore Store
//!
//! `DocumentStore` over the Cloud Firestore REST API (v1).
//! On wasm32 `reqwest` goes through the browser's `fetch`.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::{StoreError, StoreResult};
use crate::path::{decode_segments, CollectionPath, DocumentPath};
use crate::traits::DocumentStore;
use crate::value::Fields;

pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_DATABASE: &str = "(default)";

/// Documents requested per list page
const PAGE_SIZE: u32 = 300;

/// Connection settings for a Firestore database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirestoreConfig {
    /// API root, override to point at the emulator
    pub base_url: String,
    pub project_id: String,
    pub database: String,
    /// Web API key, sent as the `key` query parameter
    pub api_key: Option<String>,
}

impl FirestoreConfig {
    pub fn new(project_id: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            project_id: project_id.into(),
            database: DEFAULT_DATABASE.to_string(),
            api_key,
        }
    }
}

// ========================
// Wire Structs
// ========================

#[derive(Deserialize)]
struct WireDocument {
    name: String,
    #[serde(default)]
    fields: Fields,
}

#[derive(Serialize)]
struct WriteBody<'a> {
    fields: &'a Fields,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<WireDocument>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

// ========================
// Store
// ========================

/// Firestore-backed document store
pub struct FirestoreStore {
    client: Client,
    config: FirestoreConfig,
}

impl FirestoreStore {
    pub fn new(config: FirestoreConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &FirestoreConfig {
        &self.config
    }

    fn documents_root(&self) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents",
            self.config.base_url.trim_end_matches('/'),
            self.config.project_id,
            self.config.database
        )
    }

    pub(crate) fn url_for(&self, encoded_path: &str) -> String {
        format!("{}/{}", self.documents_root(), encoded_path)
    }

    fn with_key(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.api_key.as_deref() {
            Some(key) if !key.is_empty() => request.query(&[("key", key)]),
            _ => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> StoreResult<Response> {
        Ok(self.with_key(request).send().await?)
    }
}

#[async_trait(?Send)]
impl DocumentStore for FirestoreStore {
    async fn get(&self, path: &DocumentPath) -> StoreResult<Option<Document>> {
        tracing::debug!(%path, "firestore get");
        let response = self.send(self.client.get(self.url_for(&path.encoded()))).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(error_from(response).await);
        }
        let wire: WireDocument = response.json().await?;
        document_from_wire(wire).map(Some)
    }

    async fn set(&self, path: &DocumentPath, fields: Fields) -> StoreResult<()> {
        tracing::debug!(%path, "firestore set");
        let request = self
            .client
            .patch(self.url_for(&path.encoded()))
            .json(&WriteBody { fields: &fields });
        let response = self.send(request).await?;
        if !response.status().is_success() {
            return Err(error_from(response).await);
        }
        Ok(())
    }

    async fn update(&self, path: &DocumentPath, fields: Fields) -> StoreResult<()> {
        tracing::debug!(%path, fields = fields.len(), "firestore update");
        // A PATCH without a mask replaces the whole document
        if fields.is_empty() {
            return match self.get(path).await? {
                Some(_) => Ok(()),
                None => Err(StoreError::NotFound(path.to_string())),
            };
        }

        let mut request = self
            .client
            .patch(self.url_for(&path.encoded()))
            .query(&[("currentDocument.exists", "true")]);
        for name in fields.keys() {
            request = request.query(&[("updateMask.fieldPaths", field_path(name))]);
        }
        let response = self.send(request.json(&WriteBody { fields: &fields })).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(path.to_string()));
        }
        if !response.status().is_success() {
            return Err(error_from(response).await);
        }
        Ok(())
    }

    async fn delete(&self, path: &DocumentPath) -> StoreResult<()> {
        tracing::debug!(%path, "firestore delete");
        let response = self.send(self.client.delete(self.url_for(&path.encoded()))).await?;
        if !response.status().is_success() {
            return Err(error_from(response).await);
        }
        Ok(())
    }

    async fn list_children(&self, collection: &CollectionPath) -> StoreResult<Vec<Document>> {
        tracing::debug!(%collection, "firestore list");
        let url = self.url_for(&collection.encoded());
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self.client.get(url.clone()).query(&[("pageSize", PAGE_SIZE)]);
            if let Some(token) = page_token.as_deref() {
                request = request.query(&[("pageToken", token)]);
            }
            let response = self.send(request).await?;
            if !response.status().is_success() {
                return Err(error_from(response).await);
            }
            let page: ListResponse = response.json().await?;
            for wire in page.documents {
                documents.push(document_from_wire(wire)?);
            }
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(documents)
    }
}

// ========================
// Helpers
// ========================

async fn error_from(response: Response) -> StoreError {
    let code = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    parse_error_body(code, &body)
}

fn parse_error_body(code: u16, body: &str) -> StoreError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => StoreError::Status {
            code,
            status: envelope.error.status,
            message: envelope.error.message,
        },
        Err(_) => StoreError::Status {
            code,
            status: String::new(),
            message: body.to_string(),
        },
    }
}

/// Resource name `projects/p/databases/d/documents/a/b` -> `Document`
fn document_from_wire(wire: WireDocument) -> StoreResult<Document> {
    let (_, relative) = wire
        .name
        .split_once("/documents/")
        .ok_or_else(|| StoreError::Decode(format!("unexpected document name '{}'", wire.name)))?;
    let path = DocumentPath::from_segments(decode_segments(relative))?;
    Ok(Document::new(path, wire.fields))
}

/// Field path for `updateMask`; non-identifier names are backquoted
fn field_path(name: &str) -> String {
    let mut chars = name.chars();
    let simple = chars
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if simple {
        name.to_string()
    } else {
        format!("`{}`", name.replace('\\', "\\\\").replace('`', "\\`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use serde_json::json;

    fn store() -> FirestoreStore {
        FirestoreStore::new(FirestoreConfig::new("todo-app", Some("k".into())))
    }

    #[test]
    fn test_document_url() {
        let path = DocumentPath::new("users", "ada@example.com").unwrap();
        assert_eq!(
            store().url_for(&path.encoded()),
            "https://firestore.googleapis.com/v1/projects/todo-app/databases/(default)/documents/users/ada@example.com"
        );
    }

    #[test]
    fn test_emulator_base_url() {
        let mut config = FirestoreConfig::new("demo", None);
        config.base_url = "http://localhost:8080/v1/".into();
        let store = FirestoreStore::new(config);
        assert_eq!(
            store.url_for("users"),
            "http://localhost:8080/v1/projects/demo/databases/(default)/documents/users"
        );
    }

    #[test]
    fn test_document_from_wire() {
        let wire: WireDocument = serde_json::from_value(json!({
            "name": "projects/todo-app/databases/(default)/documents/users/ada@example.com/tasks/t1",
            "fields": {
                "description": {"stringValue": "Buy milk"},
                "position": {"integerValue": "0"}
            },
            "createTime": "2024-05-01T12:30:00Z"
        }))
        .unwrap();
        let doc = document_from_wire(wire).unwrap();
        assert_eq!(doc.path.to_string(), "users/ada@example.com/tasks/t1");
        assert_eq!(doc.get("description"), Some(&Value::from("Buy milk")));
    }

    #[test]
    fn test_list_response_without_documents() {
        let page: ListResponse = serde_json::from_str("{}").unwrap();
        assert!(page.documents.is_empty());
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn test_parse_error_body() {
        let body = r#"{"error":{"code":403,"message":"Missing or insufficient permissions.","status":"PERMISSION_DENIED"}}"#;
        assert_eq!(
            parse_error_body(403, body),
            StoreError::Status {
                code: 403,
                status: "PERMISSION_DENIED".into(),
                message: "Missing or insufficient permissions.".into(),
            }
        );
        assert!(matches!(parse_error_body(502, "Bad Gateway"), StoreError::Status { code: 502, .. }));
    }

    #[test]
    fn test_field_path_quoting() {
        assert_eq!(field_path("description"), "description");
        assert_eq!(field_path("created_at"), "created_at");
        assert_eq!(field_path("2fa"), "`2fa`");
        assert_eq!(field_path("a.b"), "`a.b`");
    }
}
