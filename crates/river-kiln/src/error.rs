//! Kiln Error Types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for kiln operations
pub type KilnResult<T> = Result<T, KilnError>;

#[derive(Error, Debug)]
pub enum KilnError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Kiln root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Note not found: {0}")]
    NoteNotFound(String),
}

impl KilnError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        KilnError::Io {
            path: path.into(),
            source,
        }
    }
}
