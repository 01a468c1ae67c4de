//! # File Errors

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for file operations
pub type FileResult<T> = Result<T, FileError>;

/// File-system errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileError {
    #[error("Directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Location file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Unsafe path: {0}")]
    UnsafePath(String),

    #[error("I/O error at {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    #[error("JSON error in {}: {message}", .path.display())]
    Json { path: PathBuf, message: String },
}

impl FileError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: &Path, err: io::Error) -> Self {
        FileError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Wrap a JSON error with the file it came from
    pub fn json(path: &Path, err: serde_json::Error) -> Self {
        FileError::Json {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            FileError::MissingDirectory(_) => 404,
            FileError::AlreadyExists(_) => 409,
            FileError::UnsafePath(_) => 400,
            FileError::Io { .. } => 500,
            FileError::Json { .. } => 500,
        }
    }
}
