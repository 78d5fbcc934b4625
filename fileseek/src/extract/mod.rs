//! Content extraction: turns heterogeneous file formats into searchable text.
//!
//! Dispatch is keyed on the lowercased extension. Known binary types are
//! skipped without a read; office/PDF/mind-map formats go through the
//! decoder registry (currently explicit no-op stubs — the format is
//! recognized but yields no text until a real decoder is registered); JSON
//! is parsed and its logical value stringified; everything else is read as
//! UTF-8 text.
//!
//! `extract` is the never-raises boundary: one undecodable file maps to
//! empty content plus a log line, never an error the walk would see.
//! `try_extract` keeps the typed failure for callers that need the reason.

use memmap2::Mmap;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::errors::{SearchError, SearchResult};

/// Files at or above this size are read through a memory map.
const LARGE_FILE_THRESHOLD: u64 = 10 * 1024 * 1024; // 10MB

/// A pluggable per-format decoder. Adding a format means adding one entry
/// to [`DECODERS`] satisfying this signature.
pub type Decoder = fn(&Path) -> SearchResult<String>;

/// Extensions never worth reading for text content.
const SKIP_EXTENSIONS: &[&str] = &[
    "exe", "dll", "so", "dylib", "bin", "mp4", "avi", "mkv", "mov", "png", "jpg", "jpeg", "gif",
    "bmp", "ico",
];

/// Registered per-format decoders, keyed by lowercased extension
/// (without the dot).
static DECODERS: Lazy<HashMap<&'static str, Decoder>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, Decoder> = HashMap::new();
    map.insert("xls", decode_spreadsheet);
    map.insert("xlsx", decode_spreadsheet);
    map.insert("csv", decode_tabular);
    map.insert("ppt", decode_slide_deck);
    map.insert("pptx", decode_slide_deck);
    map.insert("doc", decode_document);
    map.insert("docx", decode_document);
    map.insert("xmind", decode_mind_map);
    map.insert("pdf", decode_pdf);
    map.insert("json", decode_json);
    map
});

/// Extracts the textual content of `path`, or the typed reason it cannot.
///
/// Unsupported-but-recognized formats are not errors: they yield
/// `Ok("")` by contract.
pub fn try_extract(path: &Path) -> SearchResult<String> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if SKIP_EXTENSIONS.contains(&ext.as_str()) {
        return Ok(String::new());
    }

    if let Some(decoder) = DECODERS.get(ext.as_str()) {
        return decoder(path);
    }

    decode_text(path)
}

/// The never-raises boundary: decoding failures become empty content.
pub fn extract(path: &Path) -> String {
    match try_extract(path) {
        Ok(content) => content,
        Err(e) => {
            debug!("Content extraction failed for {}: {}", path.display(), e);
            String::new()
        }
    }
}

/// Decodes raw bytes as UTF-8, preserving the exact error on failure.
fn decode_bytes(bytes: &[u8], path: &Path) -> SearchResult<String> {
    match std::str::from_utf8(bytes) {
        Ok(valid) => Ok(valid.to_owned()),
        Err(_) => {
            // Reattempt on an owned copy only in the error path so the
            // FromUtf8Error carries the offending bytes.
            match String::from_utf8(bytes.to_vec()) {
                Ok(_) => unreachable!("bytes already failed validation"),
                Err(e) => Err(SearchError::encoding_error(path, e)),
            }
        }
    }
}

/// Default path: read the file as UTF-8 text, memory-mapping large files.
fn decode_text(path: &Path) -> SearchResult<String> {
    let metadata = path.metadata().map_err(|e| SearchError::from_io(path, e))?;

    if metadata.len() >= LARGE_FILE_THRESHOLD {
        let file = File::open(path).map_err(|e| SearchError::from_io(path, e))?;
        let mmap = unsafe { Mmap::map(&file) }.map_err(SearchError::IoError)?;
        decode_bytes(&mmap, path)
    } else {
        let bytes = std::fs::read(path).map_err(|e| SearchError::from_io(path, e))?;
        decode_bytes(&bytes, path)
    }
}

/// Parses a JSON document and stringifies its logical content.
fn decode_json(path: &Path) -> SearchResult<String> {
    let text = decode_text(path)?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| SearchError::decode_error(path, e.to_string()))?;
    Ok(value.to_string())
}

// Stub decoders for the binary office/PDF/mind-map family. Each returns
// empty content by contract until a real parser is registered; a stubbed
// format can therefore never produce a content match.

fn decode_spreadsheet(_path: &Path) -> SearchResult<String> {
    Ok(String::new())
}

fn decode_tabular(_path: &Path) -> SearchResult<String> {
    Ok(String::new())
}

fn decode_slide_deck(_path: &Path) -> SearchResult<String> {
    Ok(String::new())
}

fn decode_document(_path: &Path) -> SearchResult<String> {
    Ok(String::new())
}

fn decode_mind_map(_path: &Path) -> SearchResult<String> {
    Ok(String::new())
}

fn decode_pdf(_path: &Path) -> SearchResult<String> {
    Ok(String::new())
}
