#![deny(missing_docs)]

//! # stacl-report: Validation Reports
//!
//! Turns a parsed item, its schema and a [`ValidationOutcome`] into the
//! text printed by the CLI. Nothing here touches the filesystem or the
//! process; every report type implements `Display` and the caller decides
//! where it goes.
//!
//! - [`ItemSummary`]: version, extension declaration, extension fields,
//!   satisfied `require_any_field` options, quality and lineage digests,
//!   geometry, bounding box, assets.
//! - [`AdditionalChecks`]: cross-field conventions reported as warnings.
//!   They never change the exit code.
//! - [`ViolationReport`], [`Verdict`], [`ExampleBanner`]: the failure block
//!   and banners.
//! - [`QualityVerdict`]: the short report of the quality command.
//!
//! [`ValidationOutcome`]: stacl_schema::ValidationOutcome

pub mod advisory;
pub mod options;
pub mod quality;
pub mod render;
pub mod summary;

pub use advisory::{AdditionalChecks, Advisory};
pub use options::satisfied_options;
pub use quality::{validate_quality, QualityVerdict};
pub use render::{rule, ExampleBanner, Verdict, ViolationReport, RULE_WIDTH};
pub use summary::{ItemSummary, RecordSection, ReportSettings};
