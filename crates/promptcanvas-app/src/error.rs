use promptcanvas_core::{ConfigError, DocumentError, StorageError};
use promptcanvas_generate::GenerateError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid document: {0}")]
    Document(#[from] DocumentError),

    #[error("invalid {what}: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("unknown element id: {0}")]
    UnknownElement(String),
}

pub type AppResult<T> = Result<T, AppError>;

pub(crate) fn read_file(path: &std::path::Path) -> AppResult<Vec<u8>> {
    std::fs::read(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn read_text(path: &std::path::Path) -> AppResult<String> {
    std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn write_text(path: &std::path::Path, contents: &str) -> AppResult<()> {
    std::fs::write(path, contents).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}
