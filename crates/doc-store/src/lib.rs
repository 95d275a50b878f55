//! Document Store
//!
//! Hierarchical key-document storage:
//! - path: collection/document addressing
//! - value: typed field values (Firestore wire encoding)
//! - document: documents and the `Record` mapping trait
//! - traits: the `DocumentStore` interface
//! - firestore / memory: implementations

mod document;
mod error;
mod firestore;
mod memory;
mod path;
mod traits;
mod value;

pub use document::{Document, Record};
pub use error::{StoreError, StoreResult};
pub use firestore::{FirestoreConfig, FirestoreStore, DEFAULT_BASE_URL, DEFAULT_DATABASE};
pub use memory::MemoryStore;
pub use path::{auto_id, CollectionPath, DocumentPath};
pub use traits::DocumentStore;
pub use value::{ArrayValue, Fields, GeoPoint, MapValue, Value};
