//! Document library on the local filesystem.

use super::{BoxFuture, Storage, StorageError, StorageResult, decode_document, encode_document, validate_name};
use crate::document::Document;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

/// One `<name>.json` file per document in a library directory.
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Open the library at `root`, creating the directory if needed.
    pub fn new(root: PathBuf) -> StorageResult<Self> {
        fs::create_dir_all(&root).map_err(|e| io_error("create", &root, e))?;
        Ok(Self { root })
    }

    /// The per-user library, e.g. `~/.local/share/promptcanvas/library`.
    pub fn default_location() -> StorageResult<Self> {
        let data = dirs::data_dir().ok_or_else(|| StorageError::Io("no user data directory".to_string()))?;
        Self::new(data.join("promptcanvas").join("library"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> StorageResult<PathBuf> {
        let name = validate_name(name)?;
        Ok(self.root.join(format!("{name}.{EXTENSION}")))
    }
}

fn io_error(op: &str, path: &Path, err: std::io::Error) -> StorageError {
    StorageError::Io(format!("{op} {}: {err}", path.display()))
}

impl Storage for FileStorage {
    fn save(&self, name: &str, document: &Document) -> BoxFuture<'_, StorageResult<()>> {
        let prepared = self
            .path_for(name)
            .and_then(|path| Ok((path, encode_document(document)?)));
        Box::pin(async move {
            let (path, json) = prepared?;
            fs::write(&path, json).map_err(|e| io_error("write", &path, e))?;
            log::debug!("wrote {}", path.display());
            Ok(())
        })
    }

    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<Document>> {
        let path = self.path_for(name);
        let name = name.to_string();
        Box::pin(async move {
            let path = path?;
            let json = match fs::read_to_string(&path) {
                Ok(json) => json,
                Err(e) if e.kind() == ErrorKind::NotFound => return Err(StorageError::NotFound(name)),
                Err(e) => return Err(io_error("read", &path, e)),
            };
            decode_document(&json)
        })
    }

    fn delete(&self, name: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.path_for(name);
        let name = name.to_string();
        Box::pin(async move {
            let path = path?;
            match fs::remove_file(&path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound(name)),
                Err(e) => Err(io_error("delete", &path, e)),
            }
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let entries = fs::read_dir(&self.root).map_err(|e| io_error("list", &self.root, e))?;
            let mut names: Vec<String> = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == EXTENSION))
                .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
                .filter(|name| validate_name(name).is_ok())
                .collect();
            names.sort();
            Ok(names)
        })
    }

    fn exists(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.path_for(name);
        Box::pin(async move { Ok(path?.is_file()) })
    }
}
