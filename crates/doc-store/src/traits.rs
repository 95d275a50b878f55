//! Store Trait
//!
//! Abstract interface over a hierarchical document store.
//! Implementations: Firestore over REST, in-memory.

use async_trait::async_trait;

use crate::document::Document;
use crate::error::StoreResult;
use crate::path::{CollectionPath, DocumentPath};
use crate::value::Fields;

/// Core document store operations
///
/// Futures are not `Send`: the browser backend runs on a single-threaded
/// event loop.
#[async_trait(?Send)]
pub trait DocumentStore {
    /// Read a document, `None` if it does not exist
    async fn get(&self, path: &DocumentPath) -> StoreResult<Option<Document>>;

    /// Create the document or replace all of its fields
    async fn set(&self, path: &DocumentPath, fields: Fields) -> StoreResult<()>;

    /// Merge `fields` into an existing document, `NotFound` if absent
    async fn update(&self, path: &DocumentPath, fields: Fields) -> StoreResult<()>;

    /// Delete a document; deleting a missing document succeeds
    async fn delete(&self, path: &DocumentPath) -> StoreResult<()>;

    /// Direct child documents of a collection, ordered by document id
    async fn list_children(&self, collection: &CollectionPath) -> StoreResult<Vec<Document>>;
}
