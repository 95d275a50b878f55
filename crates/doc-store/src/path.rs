//! Document Paths
//!
//! Paths alternate collection and document ids: `users/{email}/tasks/{id}`.
//! A path with an odd number of segments names a collection, an even
//! number names a document.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::{StoreError, StoreResult};

/// Characters escaped inside a single URL path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'\\')
    .add(b'^')
    .add(b'|');

const AUTO_ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const AUTO_ID_LEN: usize = 20;

fn validate_segment(segment: &str) -> StoreResult<()> {
    if segment.is_empty() {
        return Err(StoreError::InvalidPath("empty segment".to_string()));
    }
    if segment.contains('/') {
        return Err(StoreError::InvalidPath(format!("'{}' contains '/'", segment)));
    }
    if segment == "." || segment == ".." {
        return Err(StoreError::InvalidPath(format!("'{}' is reserved", segment)));
    }
    Ok(())
}

/// Address of a single document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentPath {
    segments: Vec<String>,
}

/// Address of a collection of documents
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionPath {
    segments: Vec<String>,
}

impl DocumentPath {
    /// Top-level document, e.g. `DocumentPath::new("users", email)`
    pub fn new(collection: &str, id: &str) -> StoreResult<Self> {
        CollectionPath::root(collection)?.doc(id)
    }

    pub fn from_segments(segments: Vec<String>) -> StoreResult<Self> {
        if segments.is_empty() || segments.len() % 2 != 0 {
            return Err(StoreError::InvalidPath(format!(
                "document path needs an even number of segments, got {}",
                segments.len()
            )));
        }
        for segment in &segments {
            validate_segment(segment)?;
        }
        Ok(Self { segments })
    }

    /// Sub-collection under this document
    pub fn collection(&self, name: &str) -> StoreResult<CollectionPath> {
        validate_segment(name)?;
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Ok(CollectionPath { segments })
    }

    /// Collection containing this document
    pub fn parent(&self) -> CollectionPath {
        CollectionPath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        }
    }

    pub fn id(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// Percent-encoded form for use in a URL path
    pub fn encoded(&self) -> String {
        encode_segments(&self.segments)
    }
}

impl CollectionPath {
    /// Top-level collection
    pub fn root(name: &str) -> StoreResult<Self> {
        validate_segment(name)?;
        Ok(Self { segments: vec![name.to_string()] })
    }

    /// Document inside this collection
    pub fn doc(&self, id: &str) -> StoreResult<DocumentPath> {
        validate_segment(id)?;
        let mut segments = self.segments.clone();
        segments.push(id.to_string());
        Ok(DocumentPath { segments })
    }

    pub fn id(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// True when `doc` sits directly inside this collection
    pub fn is_parent_of(&self, doc: &DocumentPath) -> bool {
        doc.segments.len() == self.segments.len() + 1 && doc.segments.starts_with(&self.segments)
    }

    pub fn encoded(&self) -> String {
        encode_segments(&self.segments)
    }
}

impl std::fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl std::fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

fn encode_segments(segments: &[String]) -> String {
    segments
        .iter()
        .map(|s| utf8_percent_encode(s, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Decode a `/`-joined, percent-encoded relative path into raw segments
pub fn decode_segments(encoded: &str) -> Vec<String> {
    encoded
        .split('/')
        .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
        .collect()
}

/// Random 20-character document id (same alphabet as Firestore auto-ids)
pub fn auto_id() -> String {
    (0..AUTO_ID_LEN)
        .map(|_| AUTO_ID_ALPHABET[random_index(AUTO_ID_ALPHABET.len())] as char)
        .collect()
}

#[cfg(target_arch = "wasm32")]
fn random_index(len: usize) -> usize {
    (js_sys::Math::random() * len as f64) as usize % len
}

#[cfg(not(target_arch = "wasm32"))]
fn random_index(len: usize) -> usize {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u64(COUNTER.fetch_add(1, Ordering::Relaxed));
    (hasher.finish() % len as u64) as usize
}
