use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum Dir2txtError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Walk error: {0}")]
    Walk(String),
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    #[error("{0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
impl Dir2txtError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Dir2txtError::Io {
            path: path.into(),
            source,
        }
    }
}
