//! In-Memory Store
//!
//! `DocumentStore` backed by a `BTreeMap`. Used by tests; supports
//! injected failures to exercise error paths.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::document::Document;
use crate::error::{StoreError, StoreResult};
use crate::path::{CollectionPath, DocumentPath};
use crate::traits::DocumentStore;
use crate::value::Fields;

/// In-memory implementation of `DocumentStore`
#[derive(Default)]
pub struct MemoryStore {
    docs: RefCell<BTreeMap<DocumentPath, Fields>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read fail with a transport error
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// Make every subsequent write fail with a transport error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful writes (set, update, delete)
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.borrow().is_empty()
    }

    fn check_read(&self) -> StoreResult<()> {
        if self.fail_reads.get() {
            return Err(StoreError::Transport("injected read failure".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> StoreResult<()> {
        if self.fail_writes.get() {
            return Err(StoreError::Transport("injected write failure".to_string()));
        }
        Ok(())
    }

    fn record_write(&self) {
        self.writes.set(self.writes.get() + 1);
    }
}

#[async_trait(?Send)]
impl DocumentStore for MemoryStore {
    async fn get(&self, path: &DocumentPath) -> StoreResult<Option<Document>> {
        self.check_read()?;
        let docs = self.docs.borrow();
        Ok(docs.get(path).map(|fields| Document::new(path.clone(), fields.clone())))
    }

    async fn set(&self, path: &DocumentPath, fields: Fields) -> StoreResult<()> {
        self.check_write()?;
        self.docs.borrow_mut().insert(path.clone(), fields);
        self.record_write();
        Ok(())
    }

    async fn update(&self, path: &DocumentPath, fields: Fields) -> StoreResult<()> {
        self.check_write()?;
        let mut docs = self.docs.borrow_mut();
        let existing = docs
            .get_mut(path)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
        existing.extend(fields);
        drop(docs);
        self.record_write();
        Ok(())
    }

    async fn delete(&self, path: &DocumentPath) -> StoreResult<()> {
        self.check_write()?;
        self.docs.borrow_mut().remove(path);
        self.record_write();
        Ok(())
    }

    async fn list_children(&self, collection: &CollectionPath) -> StoreResult<Vec<Document>> {
        self.check_read()?;
        let docs = self.docs.borrow();
        let mut children: Vec<Document> = docs
            .iter()
            .filter(|(path, _)| collection.is_parent_of(path))
            .map(|(path, fields)| Document::new(path.clone(), fields.clone()))
            .collect();
        children.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(children)
    }
}
