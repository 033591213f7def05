#![deny(missing_docs)]

//! # stacl-schema: Schema Validation
//!
//! Runtime JSON Schema validation of STAC items and quality reports,
//! backed by the `jsonschema` crate.
//!
//! ## Runtime Validation (`validate`)
//!
//! [`SchemaValidator`] compiles one schema document, resolving internal
//! `$ref`s against the schema root and serving any other reference from
//! the schema's own directory. No network requests are made.
//!
//! The sibling files are read once per validator and shared by every
//! schema compiled from it.
//!
//! ## First-Error Contract (`outcome`)
//!
//! Validation stops at the first violation. Downstream reporting prints a
//! single error with its path and, for a failed `anyOf`, one context line
//! per branch. [`ValidationOutcome`] never carries a list of violations.
//!
//! ## Disjunction Options (`require_any`)
//!
//! [`require_any_field_options`] reads the `require_any_field` definition
//! so the reporter can tell which "at least one of" options a document
//! satisfies.

mod context;
mod directory;
pub mod outcome;
pub mod require_any;
pub mod validate;

pub use outcome::{PathSegment, SchemaViolation, ValidationOutcome};
pub use require_any::{require_any_field_options, REQUIRE_ANY_FIELD};
pub use validate::{SchemaError, SchemaValidator};
