//! Process-local document library.

use super::{BoxFuture, Storage, StorageError, StorageResult, decode_document, encode_document, validate_name};
use crate::document::Document;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Keeps encoded documents in memory.
///
/// Documents go through the same encode/decode path as files, so a
/// document that would not survive a save to disk does not survive here
/// either.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        // Entries are replaced whole, so a poisoned map is still consistent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Storage for MemoryStorage {
    fn save(&self, name: &str, document: &Document) -> BoxFuture<'_, StorageResult<()>> {
        let encoded = validate_name(name).and_then(|name| Ok((name.to_string(), encode_document(document)?)));
        Box::pin(async move {
            let (name, json) = encoded?;
            self.entries().insert(name, json);
            Ok(())
        })
    }

    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<Document>> {
        let name = name.to_string();
        Box::pin(async move {
            let json = self.entries().get(&name).cloned();
            match json {
                Some(json) => decode_document(&json),
                None => Err(StorageError::NotFound(name)),
            }
        })
    }

    fn delete(&self, name: &str) -> BoxFuture<'_, StorageResult<()>> {
        let name = name.to_string();
        Box::pin(async move {
            match self.entries().remove(&name) {
                Some(_) => Ok(()),
                None => Err(StorageError::NotFound(name)),
            }
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move { Ok(self.entries().keys().cloned().collect()) })
    }

    fn exists(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let name = name.to_string();
        Box::pin(async move { Ok(self.entries().contains_key(&name)) })
    }
}
