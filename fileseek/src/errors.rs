//! Error types for search operations.
//!
//! Two families live here. Usage errors (`EmptyTerm`, `SessionBusy`,
//! `RootNotFound`) are rejected synchronously before any background work
//! starts. Per-file errors (`FileNotFound`, `PermissionDenied`,
//! `EncodingError`) are transient: the walker logs them and skips the
//! candidate, so the skip reason stays inspectable without ever aborting
//! a traversal.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur during search operations
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Search term is empty")]
    EmptyTerm,
    #[error("A search session is already active")]
    SessionBusy,
    #[error("Search root is not an existing directory: {0}")]
    RootNotFound(PathBuf),
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Invalid UTF-8 in file {path}: {source}")]
    EncodingError {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },
    #[error("Failed to decode {path}: {reason}")]
    DecodeError { path: PathBuf, reason: String },
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl SearchError {
    pub fn root_not_found(path: impl Into<PathBuf>) -> Self {
        Self::RootNotFound(path.into())
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn encoding_error(path: impl Into<PathBuf>, source: std::string::FromUtf8Error) -> Self {
        Self::EncodingError {
            path: path.into(),
            source,
        }
    }

    pub fn decode_error(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DecodeError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Maps an `io::Error` for `path` to the matching typed variant.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::file_not_found(path),
            io::ErrorKind::PermissionDenied => Self::permission_denied(path),
            _ => Self::IoError(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let path = Path::new("test.txt");
        let err = SearchError::file_not_found(path);
        assert!(matches!(err, SearchError::FileNotFound(_)));

        let err = SearchError::permission_denied(path);
        assert!(matches!(err, SearchError::PermissionDenied(_)));

        let err = SearchError::root_not_found("missing");
        assert!(matches!(err, SearchError::RootNotFound(_)));

        let err = SearchError::config_error("Missing required field");
        assert!(matches!(err, SearchError::ConfigError(_)));
    }

    #[test]
    fn test_from_io_maps_kinds() {
        let path = Path::new("test.txt");

        let err = SearchError::from_io(path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, SearchError::FileNotFound(_)));

        let err = SearchError::from_io(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, SearchError::PermissionDenied(_)));

        let err = SearchError::from_io(path, io::Error::from(io::ErrorKind::Interrupted));
        assert!(matches!(err, SearchError::IoError(_)));
    }

    #[test]
    fn test_error_messages() {
        let err = SearchError::EmptyTerm;
        assert_eq!(err.to_string(), "Search term is empty");

        let err = SearchError::SessionBusy;
        assert_eq!(err.to_string(), "A search session is already active");

        let err = SearchError::file_not_found("test.txt");
        assert_eq!(err.to_string(), "File not found: test.txt");

        let err = SearchError::config_error("Missing required field");
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required field"
        );
    }
}
