//! # `require_any_field` Options
//!
//! The extension schema expresses "at least one liability field must be
//! present" as an `anyOf` of single-field `required` clauses stored under
//! `definitions.require_any_field`.

use serde_json::Value;

/// Name of the shared definition.
pub const REQUIRE_ANY_FIELD: &str = "require_any_field";

/// Field names of the single-field `required` clauses, in schema order.
///
/// Returns `None` when the schema has no `require_any_field` definition
/// (under `definitions`, or `$defs` as a fallback). Clauses requiring zero
/// or several fields are skipped.
pub fn require_any_field_options(schema: &Value) -> Option<Vec<String>> {
    let clauses = ["definitions", "$defs"]
        .iter()
        .find_map(|section| schema.get(section)?.get(REQUIRE_ANY_FIELD))?
        .get("anyOf")?
        .as_array()?;

    Some(
        clauses
            .iter()
            .filter_map(|clause| match clause.get("required")?.as_array()?.as_slice() {
                [Value::String(field)] => Some(field.clone()),
                _ => None,
            })
            .collect(),
    )
}
