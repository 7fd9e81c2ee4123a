//! Storage abstraction for persisted documents.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::canvas::Canvas;
use crate::document::{Document, DocumentError};
use crate::elements::Element;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Version written into every stored document.
pub const FORMAT_VERSION: u32 = 1;

/// Longest accepted document name.
pub const MAX_NAME_LEN: usize = 64;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Invalid document name: {0:?}")]
    InvalidName(String),
    #[error("Unsupported format version {0}")]
    UnsupportedVersion(u32),
    #[error("Invalid document: {0}")]
    Invalid(#[from] DocumentError),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Serialize)]
struct StoredRef<'a> {
    version: u32,
    elements: &'a [Element],
}

#[derive(Deserialize)]
struct Stored {
    version: u32,
    elements: Vec<Element>,
}

/// Encode a document in the library format:
/// `{"version": 1, "elements": [...]}`.
pub fn encode_document(document: &Document) -> StorageResult<String> {
    let stored = StoredRef {
        version: FORMAT_VERSION,
        elements: document.elements(),
    };
    serde_json::to_string_pretty(&stored).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Decode a stored document. A bare element array (the export format) is
/// accepted as version 1. Duplicate ids are rejected.
pub fn decode_document(json: &str) -> StorageResult<Document> {
    let value: serde_json::Value = serde_json::from_str(json).map_err(|e| StorageError::Serialization(e.to_string()))?;
    let elements: Vec<Element> = if value.is_array() {
        serde_json::from_value(value).map_err(|e| StorageError::Serialization(e.to_string()))?
    } else {
        let stored: Stored = serde_json::from_value(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
        if stored.version == 0 || stored.version > FORMAT_VERSION {
            return Err(StorageError::UnsupportedVersion(stored.version));
        }
        stored.elements
    };
    Ok(Document::from_elements(elements)?)
}

/// Check a document name. Names are kept verbatim; anything that could
/// escape the library directory is rejected rather than rewritten.
pub fn validate_name(name: &str) -> StorageResult<&str> {
    let ok = !name.is_empty()
        && name.len() <= MAX_NAME_LEN
        && name.trim() == name
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' ' | '.'));
    if ok { Ok(name) } else { Err(StorageError::InvalidName(name.to_string())) }
}

/// Named document store.
///
/// On native platforms, implementations must be Send + Sync.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    fn save(&self, name: &str, document: &Document) -> BoxFuture<'_, StorageResult<()>>;

    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<Document>>;

    fn delete(&self, name: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all stored document names.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    fn exists(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Named document store (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    fn save(&self, name: &str, document: &Document) -> BoxFuture<'_, StorageResult<()>>;

    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<Document>>;

    fn delete(&self, name: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all stored document names.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    fn exists(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

impl Canvas {
    /// Save the live document under `name`.
    pub async fn save_to(&self, storage: &dyn Storage, name: &str) -> StorageResult<()> {
        storage.save(name, &self.document).await?;
        log::info!("saved document {:?} ({} elements)", name, self.document.len());
        Ok(())
    }

    /// Load `name` and replace the live document, committing it.
    /// Failures leave the document untouched and raise an error notice.
    pub async fn load_from(&mut self, storage: &dyn Storage, name: &str) -> StorageResult<()> {
        match storage.load(name).await {
            Ok(document) => {
                self.replace_document(document);
                Ok(())
            }
            Err(err) => {
                self.notify_error(format!("Could not load {name}: {err}"));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Element, ShapeElement, ShapeKind};
    use kurbo::Point;
    use pollster::block_on;

    #[test]
    fn test_canvas_save_and_load() {
        let storage = MemoryStorage::new();
        let mut canvas = Canvas::new();
        canvas.add_elements(vec![Element::Shape(ShapeElement::new(ShapeKind::Circle, Point::new(1.0, 2.0)))]);
        block_on(canvas.save_to(&storage, "sketch")).unwrap();

        let mut other = Canvas::new();
        block_on(other.load_from(&storage, "sketch")).unwrap();
        assert_eq!(other.document(), canvas.document());
        assert!(other.can_undo());
    }

    fn shape() -> Element {
        Element::Shape(ShapeElement::new(ShapeKind::Rectangle, Point::new(3.0, 4.0)))
    }

    #[test]
    fn test_encoded_format_is_versioned() {
        let mut document = Document::new();
        document.push(shape());
        let json = encode_document(&document).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], FORMAT_VERSION);
        assert_eq!(value["elements"][0]["kind"], "shape");
        assert_eq!(decode_document(&json).unwrap(), document);
    }

    #[test]
    fn test_decode_accepts_bare_export() {
        let mut document = Document::new();
        document.push(shape());
        let decoded = decode_document(&document.to_json().unwrap()).unwrap();
        assert_eq!(decoded, document);
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        let el = shape();
        let twice = serde_json::to_string(&vec![el.clone(), el]).unwrap();
        assert!(matches!(
            decode_document(&twice),
            Err(StorageError::Invalid(DocumentError::DuplicateId(_)))
        ));
        assert!(matches!(
            decode_document(r#"{"version": 7, "elements": []}"#),
            Err(StorageError::UnsupportedVersion(7))
        ));
        assert!(matches!(decode_document("{"), Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("sketch-01").is_ok());
        assert!(validate_name("My sketch v2.1").is_ok());
        for bad in ["", " padded", "../escape", "a/b", ".hidden", "semi;colon"] {
            assert!(matches!(validate_name(bad), Err(StorageError::InvalidName(_))), "{bad:?}");
        }
        assert!(validate_name(&"x".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_canvas_load_missing_raises_notice() {
        let storage = MemoryStorage::new();
        let mut canvas = Canvas::new();
        let result = block_on(canvas.load_from(&storage, "missing"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
        assert_eq!(canvas.notices.len(), 1);
        assert!(!canvas.can_undo());
    }
}
