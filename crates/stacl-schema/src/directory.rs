//! # Schema Directory
//!
//! The `*.json` files found next to a schema, indexed by `$id` and by bare
//! filename. Both the engine's retriever and the `anyOf` context walker
//! look references up here, so they agree on what a `$ref` points at.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use stacl_core::load_json;

/// Sibling schemas keyed by `$id` and by filename.
#[derive(Debug, Default)]
pub(crate) struct SchemaDirectory {
    schemas: HashMap<String, Value>,
}

impl SchemaDirectory {
    /// Index every parseable `*.json` file in `dir`. Unreadable files are
    /// skipped with a warning.
    pub(crate) fn load(dir: &Path) -> Self {
        let mut schemas = HashMap::new();

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "cannot scan schema directory");
                return Self { schemas };
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(filename) = path.file_name().and_then(|f| f.to_str()) else {
                continue;
            };
            match load_json(&path) {
                Ok(value) => {
                    if let Some(id) = value.get("$id").and_then(Value::as_str) {
                        schemas.insert(id.to_string(), value.clone());
                    }
                    schemas.insert(filename.to_string(), value);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable sibling schema");
                }
            }
        }

        Self { schemas }
    }

    /// Number of index entries (a file with an `$id` counts twice).
    pub(crate) fn len(&self) -> usize {
        self.schemas.len()
    }

    /// The document a reference URI names, ignoring any fragment or query.
    ///
    /// Matches the full URI first, then the URI without fragment, then its
    /// last path segment as a filename.
    pub(crate) fn lookup(&self, uri: &str) -> Option<&Value> {
        if let Some(value) = self.schemas.get(uri) {
            return Some(value);
        }
        let base = document_uri(uri);
        if let Some(value) = self.schemas.get(base) {
            return Some(value);
        }
        let filename = base.rsplit('/').next().unwrap_or(base);
        self.schemas.get(filename)
    }
}

/// `uri` without its fragment and query.
pub(crate) fn document_uri(uri: &str) -> &str {
    uri.split(['#', '?']).next().unwrap_or(uri)
}
