//! Frontend Models
//!
//! Per-user records and their document mapping:
//! - `users/{email}`                     -> UserRecord
//! - `users/{email}/categories/{id}`     -> Category
//! - `users/{email}/tasks/{id}`          -> Task

use chrono::{DateTime, Utc};
use doc_store::{Document, Fields, Record, StoreResult};
use serde::{Deserialize, Serialize};

/// User document, created on first login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Named grouping that owns tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Document id
    pub id: String,
    pub name: String,
    /// Insertion order
    pub position: i64,
}

/// A to-do item inside one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Document id
    pub id: String,
    pub description: String,
    /// Name of the owning category
    pub category: String,
    /// Insertion order within the category
    pub position: i64,
}

impl Record for UserRecord {
    fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("email".to_string(), self.email.as_str().into());
        fields.insert("createdAt".to_string(), self.created_at.into());
        fields
    }

    fn from_document(doc: &Document) -> StoreResult<Self> {
        Ok(Self {
            email: doc.str_field("email")?.to_string(),
            created_at: doc.timestamp_field("createdAt")?,
        })
    }
}

impl Record for Category {
    fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("name".to_string(), self.name.as_str().into());
        fields.insert("position".to_string(), self.position.into());
        fields
    }

    fn from_document(doc: &Document) -> StoreResult<Self> {
        Ok(Self {
            id: doc.id().to_string(),
            name: doc.str_field("name")?.to_string(),
            position: doc.integer_field("position").unwrap_or(0),
        })
    }
}

impl Record for Task {
    fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("description".to_string(), self.description.as_str().into());
        fields.insert("category".to_string(), self.category.as_str().into());
        fields.insert("position".to_string(), self.position.into());
        fields
    }

    fn from_document(doc: &Document) -> StoreResult<Self> {
        Ok(Self {
            id: doc.id().to_string(),
            description: doc.str_field("description")?.to_string(),
            category: doc.str_field("category")?.to_string(),
            position: doc.integer_field("position").unwrap_or(0),
        })
    }
}
