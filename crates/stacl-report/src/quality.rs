//! # Quality Report Verdict
//!
//! Validation of a standalone ISO 19115 quality report, or an array of
//! reports, against the quality schema. The report is shorter than the
//! item report and joins paths with `/`.

use std::fmt;

use serde_json::Value;

use stacl_schema::{SchemaValidator, ValidationOutcome};

/// Schema name used in the verdict lines.
pub const QUALITY_SCHEMA_NAME: &str = "iso19115-quality";

/// Result of validating a quality document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QualityVerdict {
    /// The instance conforms.
    Valid,
    /// The first violation, with a slash-joined path.
    Invalid {
        /// Engine message.
        message: String,
        /// Path such as `0/report/1/type`.
        path: String,
    },
}

impl QualityVerdict {
    /// Process exit code: 0 when valid, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Valid => 0,
            Self::Invalid { .. } => 1,
        }
    }
}

/// Validate `instance` with a compiled quality schema.
pub fn validate_quality(instance: &Value, validator: &SchemaValidator) -> QualityVerdict {
    match validator.validate(instance) {
        ValidationOutcome::Valid => QualityVerdict::Valid,
        ValidationOutcome::Invalid(violation) => QualityVerdict::Invalid {
            path: violation.path_joined("/"),
            message: violation.message,
        },
    }
}

impl fmt::Display for QualityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => writeln!(
                f,
                "✓ VALID: instance conforms to {QUALITY_SCHEMA_NAME} schema"
            ),
            Self::Invalid { message, path } => {
                writeln!(
                    f,
                    "✗ INVALID: instance does NOT conform to {QUALITY_SCHEMA_NAME} schema"
                )?;
                writeln!(f, "Error: {message}")?;
                writeln!(f, "Path: {path}")
            }
        }
    }
}
