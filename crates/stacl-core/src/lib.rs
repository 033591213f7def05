#![deny(missing_docs)]

//! # stacl-core: Foundational Types for the Liability-Claims Toolchain
//!
//! Every other crate in the workspace depends on this one. It has no
//! internal crate dependencies, only `serde`, `serde_json`, `serde_yaml`,
//! `thiserror` and `tracing` from the external ecosystem.
//!
//! ## Contents
//!
//! 1. **[`load_json`] is the sole path from disk to a parsed document.**
//!    Missing files and malformed JSON surface as distinct [`LoadError`]
//!    variants so the CLI can print a precise diagnostic.
//!
//! 2. **[`StacItem`] is a read-only view** over a parsed catalog item. It
//!    never mutates the underlying value; the migration crate is the only
//!    writer in the workspace.
//!
//! 3. **[`ValueKind`] classifies JSON values** by explicit variant instead
//!    of runtime type names, with the `array[N]` label special-cased.
//!
//! 4. **[`ToolConfig`]** carries file locations and extension identifiers,
//!    loaded from YAML with environment overrides.

pub mod config;
pub mod document;
pub mod error;
pub mod item;
pub mod kind;

pub use config::{MigrationConfig, ToolConfig};
pub use document::{load_json, write_json_pretty};
pub use error::{ConfigError, LoadError};
pub use item::{bbox_corners, AssetEntry, StacItem};
pub use kind::ValueKind;
