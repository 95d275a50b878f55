//! Documents and Records
//!
//! A `Document` is a path plus its fields. `Record` maps typed structs
//! onto documents, the way repositories map rows onto entities.

use chrono::{DateTime, Utc};

use crate::error::{StoreError, StoreResult};
use crate::path::DocumentPath;
use crate::value::{Fields, Value};

/// A stored document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub path: DocumentPath,
    pub fields: Fields,
}

impl Document {
    pub fn new(path: DocumentPath, fields: Fields) -> Self {
        Self { path, fields }
    }

    pub fn id(&self) -> &str {
        self.path.id()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Required string field
    pub fn str_field(&self, key: &str) -> StoreResult<&str> {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| self.missing(key, "string"))
    }

    /// Optional integer field, absent or mistyped reads as `None`
    pub fn integer_field(&self, key: &str) -> Option<i64> {
        self.fields.get(key).and_then(Value::as_integer)
    }

    /// Required timestamp field
    pub fn timestamp_field(&self, key: &str) -> StoreResult<DateTime<Utc>> {
        self.fields
            .get(key)
            .and_then(Value::as_timestamp)
            .ok_or_else(|| self.missing(key, "timestamp"))
    }

    fn missing(&self, key: &str, kind: &str) -> StoreError {
        StoreError::Decode(format!("{}: missing {} field '{}'", self.path, kind, key))
    }
}

/// Typed view of a document
pub trait Record: Sized {
    /// Fields written when the record is stored
    fn to_fields(&self) -> Fields;

    /// Build the record from a stored document
    fn from_document(doc: &Document) -> StoreResult<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_accessors() {
        let path = DocumentPath::new("users", "ada@example.com").unwrap();
        let mut fields = Fields::new();
        fields.insert("email".into(), "ada@example.com".into());
        fields.insert("position".into(), 2i64.into());
        let doc = Document::new(path, fields);

        assert_eq!(doc.id(), "ada@example.com");
        assert_eq!(doc.str_field("email").unwrap(), "ada@example.com");
        assert_eq!(doc.integer_field("position"), Some(2));
        assert_eq!(doc.integer_field("missing"), None);
        assert!(matches!(doc.timestamp_field("createdAt"), Err(StoreError::Decode(_))));
    }
}
