//! # JSON Document I/O
//!
//! Loads items and schemas from disk and writes migrated items back.
//! Object key order survives a load/write cycle because the workspace
//! enables `serde_json/preserve_order`.

use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;

use crate::error::LoadError;

/// Read and parse a JSON file.
///
/// # Errors
///
/// - [`LoadError::NotFound`] if `path` does not exist.
/// - [`LoadError::Read`] for any other read failure, including content that
///   is not valid UTF-8.
/// - [`LoadError::InvalidJson`] if the content does not parse.
pub fn load_json(path: &Path) -> Result<Value, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Read {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let value = serde_json::from_str(&content).map_err(|e| LoadError::InvalidJson {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "loaded JSON document");
    Ok(value)
}

/// Write `value` as 2-space indented JSON followed by a final newline.
pub fn write_json_pretty(path: &Path, value: &Value) -> Result<(), LoadError> {
    let mut body = serde_json::to_string_pretty(value).map_err(|e| LoadError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    body.push('\n');

    std::fs::write(path, body).map_err(|e| LoadError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    tracing::debug!(path = %path.display(), "wrote JSON document");
    Ok(())
}
