#![deny(missing_docs)]

//! # stacl-migrate: Sample Item Migration
//!
//! Rewrites sample items in place so they match the current release of
//! the extension:
//!
//! 1. `stac_extensions` entries pointing at any release of the extension
//!    are replaced by the target schema URI.
//! 2. Lineage process steps under `liability:quality` that carry a bare
//!    string `stepDateTime` get it wrapped into a CI_Date object,
//!    `{"processing": <string>}`.
//!
//! Both rewrites are idempotent. A file is only written when something
//! changed, and [`MigrationMode::Check`] computes the same outcome without
//! writing at all.

pub mod batch;
pub mod item;

pub use batch::{migrate_dir, FileOutcome, FileReport, MigrateError, MigrationMode, MigrationSummary};
pub use item::{migrate_item, MigrationPlan};
