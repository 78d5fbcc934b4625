//! Search result types.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::errors::{SearchError, SearchResult};

/// A confirmed match, with stat info resolved at the moment of emission.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    /// Absolute (as-walked) path to the file
    pub path: PathBuf,
    /// Base name of the file
    pub file_name: String,
    /// Last modification time
    pub modified: SystemTime,
    /// Lowercased extension including the leading dot, or empty
    pub extension: String,
    /// File size in bytes
    pub size_bytes: u64,
}

impl MatchRecord {
    /// Builds a record for `path`, resolving metadata now.
    ///
    /// A stat failure (e.g. the file vanished between listing and here)
    /// is returned as a typed error; the walker drops the candidate.
    pub fn from_path(path: &Path) -> SearchResult<MatchRecord> {
        let metadata = path.metadata().map_err(|e| SearchError::from_io(path, e))?;
        let modified = metadata.modified().map_err(|e| SearchError::from_io(path, e))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(MatchRecord {
            path: path.to_path_buf(),
            file_name,
            modified,
            extension: extension_of(path),
            size_bytes: metadata.len(),
        })
    }
}

/// Lowercased extension of `path` with the leading dot, or empty.
pub fn extension_of(path: &Path) -> String {
    match path.extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy().to_lowercase()),
        None => String::new(),
    }
}
