//! # Error Hierarchy
//!
//! Structured error types built with `thiserror`. No `Box<dyn Error>`, no
//! `.unwrap()` outside tests.
//!
//! Schema-conformance failures are deliberately absent here: a document
//! that violates its schema is an outcome, not an error, and is modelled by
//! `stacl_schema::ValidationOutcome`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors while reading or writing a JSON document on disk.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file does not exist.
    #[error("File not found: {}", path.display())]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The file exists but could not be read (permissions, not UTF-8, ...).
    #[error("Cannot read {}: {source}", path.display())]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file content is not syntactically valid JSON.
    #[error("Invalid JSON in {}: {source}", path.display())]
    InvalidJson {
        /// Path of the malformed file.
        path: PathBuf,
        /// Decoder error, including line and column.
        #[source]
        source: serde_json::Error,
    },

    /// Serializing or writing a document back to disk failed.
    #[error("Cannot write {}: {reason}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Human-readable reason.
        reason: String,
    },
}

/// Errors while assembling the tool configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("config file not found: {}", path.display())]
    NotFound {
        /// Requested config path.
        path: PathBuf,
    },

    /// The config file could not be read.
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        /// Config path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML or contains unknown keys.
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        /// Config path.
        path: PathBuf,
        /// YAML decoder error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A configured value is unusable.
    #[error("invalid config value for `{field}`: {reason}")]
    InvalidValue {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
