//! Store Errors
//!
//! Error type shared by every document store backend.

use serde::{Deserialize, Serialize};

/// Common result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Document store errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreError {
    /// Path is malformed (empty segment, `/` inside an id, wrong depth)
    InvalidPath(String),
    /// Target document does not exist (only raised by `update`)
    NotFound(String),
    /// Request never produced a response
    Transport(String),
    /// Backend answered with a non-success status
    Status {
        code: u16,
        status: String,
        message: String,
    },
    /// Response or stored document could not be decoded
    Decode(String),
}

impl StoreError {
    /// True for failures worth retrying (network or server side)
    pub fn is_transient(&self) -> bool {
        match self {
            StoreError::Transport(_) => true,
            StoreError::Status { code, .. } => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::InvalidPath(msg) => write!(f, "Invalid path: {}", msg),
            StoreError::NotFound(path) => write!(f, "Not found: {}", path),
            StoreError::Transport(msg) => write!(f, "Transport error: {}", msg),
            StoreError::Status { code, status, message } => {
                write!(f, "Store returned {} {}: {}", code, status, message)
            }
            StoreError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<reqwest::Error> for StoreError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            StoreError::Decode(value.to_string())
        } else {
            StoreError::Transport(value.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        StoreError::Decode(value.to_string())
    }
}
