//! # Satisfied `require_any_field` Options
//!
//! Which of the schema's "at least one of these fields" options a document
//! actually provides.

use serde_json::{Map, Value};

/// Number of satisfied options listed before the rest are summarised.
pub const SHOWN_OPTIONS: usize = 5;

/// The options whose field exists in `properties`, in option order.
///
/// Presence is what counts: a field set to `null` still satisfies a
/// `required` clause.
pub fn satisfied_options(options: &[String], properties: Option<&Map<String, Value>>) -> Vec<String> {
    let Some(properties) = properties else {
        return Vec::new();
    };
    options
        .iter()
        .filter(|field| properties.contains_key(field.as_str()))
        .cloned()
        .collect()
}
