//! # Verdicts and Banners
//!
//! Rendering of a validation outcome: the violation block, the pass/fail
//! banner, and the exit code that goes with it.

use std::fmt;

use stacl_schema::{SchemaViolation, ValidationOutcome};

/// Width of every horizontal rule.
pub const RULE_WIDTH: usize = 60;

/// Closing line of a successful `example` run.
pub const EXAMPLE_PASSED: &str = "✅ VALIDATION PASSED - Example is structurally valid!";

/// A horizontal rule of `ch`.
pub fn rule(ch: char) -> String {
    std::iter::repeat(ch).take(RULE_WIDTH).collect()
}

/// Message, path and branch context of a violation.
#[derive(Debug, Clone, Copy)]
pub struct ViolationReport<'a>(pub &'a SchemaViolation);

impl fmt::Display for ViolationReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let violation = self.0;
        writeln!(f, "Validation Error: {}", violation.message)?;
        writeln!(f, "Path: {}", violation.path_joined(" -> "))?;
        if !violation.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "Context:")?;
            for message in &violation.context {
                writeln!(f, "  - {message}")?;
            }
        }
        Ok(())
    }
}

/// Overall result of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The document conformed.
    Passed,
    /// The document violated the schema.
    Failed,
}

impl Verdict {
    /// Verdict for an outcome.
    pub fn of(outcome: &ValidationOutcome) -> Self {
        if outcome.is_valid() {
            Self::Passed
        } else {
            Self::Failed
        }
    }

    /// Process exit code: 0 when passed, 1 otherwise.
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Passed => 0,
            Self::Failed => 1,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = match self {
            Self::Passed => "✓ VALIDATION PASSED",
            Self::Failed => "✗ VALIDATION FAILED",
        };
        writeln!(f, "{}", rule('='))?;
        writeln!(f, "{line}")?;
        writeln!(f, "{}", rule('='))
    }
}

/// Closing banner of the `example` command.
#[derive(Debug, Clone, Copy)]
pub struct ExampleBanner;

impl fmt::Display for ExampleBanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", rule('='))?;
        writeln!(f, "{EXAMPLE_PASSED}")?;
        writeln!(f, "{}", rule('='))
    }
}
