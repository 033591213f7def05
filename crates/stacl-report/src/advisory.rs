//! # Additional Checks
//!
//! Cross-field conventions that the extension schema does not enforce.
//! They are printed after a passing validation as warnings and never
//! change the exit code.

use std::fmt;

use serde_json::Value;

use stacl_core::{bbox_corners, StacItem};

use crate::render::rule;

/// Namespace of the core liability fields.
pub const LIABILITY_PREFIX: &str = "liability:";

/// A convention the item does not follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    /// No property key starts with `liability:`.
    NoLiabilityFields,
    /// `liability:damages_estimated` without `liability:damages_currency`.
    CurrencyMissing,
    /// `liability:resolution_date` without `liability:resolution_status`.
    ResolutionStatusMissing,
    /// `bbox` is set but does not start with four numbers.
    MalformedBbox,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NoLiabilityFields => "No liability: fields found in properties",
            Self::CurrencyMissing => "damages_estimated found but damages_currency is missing",
            Self::ResolutionStatusMissing => {
                "resolution_date found but resolution_status is missing"
            }
            Self::MalformedBbox => "bbox must hold at least 4 numbers",
        };
        write!(f, "Warning: {text}")
    }
}

/// Field pairs where the first implies the second.
const PAIRED_FIELDS: [(&str, &str, Advisory); 2] = [
    (
        "liability:damages_estimated",
        "liability:damages_currency",
        Advisory::CurrencyMissing,
    ),
    (
        "liability:resolution_date",
        "liability:resolution_status",
        Advisory::ResolutionStatusMissing,
    ),
];

/// The "Additional Checks" block of the `validate` report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdditionalChecks {
    /// `liability:` fields in document order, with display values.
    pub liability_fields: Vec<(String, String)>,
    /// Conventions the item breaks, in check order.
    pub advisories: Vec<Advisory>,
}

impl AdditionalChecks {
    /// Run every check against `item`.
    pub fn run(item: StacItem<'_>) -> Self {
        let liability_fields: Vec<(String, String)> = item
            .properties()
            .into_iter()
            .flatten()
            .filter(|(key, _)| key.starts_with(LIABILITY_PREFIX))
            .map(|(key, value)| (key.clone(), display_value(value)))
            .collect();

        let mut advisories = Vec::new();
        if liability_fields.is_empty() {
            advisories.push(Advisory::NoLiabilityFields);
        }
        for (present, expected, advisory) in PAIRED_FIELDS {
            if item.has_property(present) && !item.has_property(expected) {
                advisories.push(advisory);
            }
        }
        if item.bbox().is_some_and(|bbox| bbox_corners(bbox).is_none()) {
            advisories.push(Advisory::MalformedBbox);
        }

        if !advisories.is_empty() {
            tracing::info!(count = advisories.len(), "item has advisory warnings");
        }

        Self {
            liability_fields,
            advisories,
        }
    }
}

/// Strings print bare; everything else prints as compact JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl fmt::Display for AdditionalChecks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Additional Checks:")?;
        writeln!(f, "{}", rule('-'))?;
        if !self.liability_fields.is_empty() {
            writeln!(f, "Found {} liability fields:", self.liability_fields.len())?;
            for (key, value) in &self.liability_fields {
                writeln!(f, "  - {key}: {value}")?;
            }
        }
        for advisory in &self.advisories {
            writeln!(f, "{advisory}")?;
        }
        Ok(())
    }
}
