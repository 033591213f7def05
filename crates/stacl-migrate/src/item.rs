//! # Per-Item Rewrites

use serde_json::{json, Value};

use stacl_core::MigrationConfig;

/// What to rewrite, taken from the tool configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationPlan {
    /// Substring identifying extension URIs to rewrite.
    pub extension_marker: String,
    /// URI every matching entry is rewritten to.
    pub target_uri: String,
}

impl From<&MigrationConfig> for MigrationPlan {
    fn from(config: &MigrationConfig) -> Self {
        Self {
            extension_marker: config.extension_marker.clone(),
            target_uri: config.target_uri.clone(),
        }
    }
}

/// Apply every rewrite to `item`. Returns whether anything changed.
pub fn migrate_item(item: &mut Value, plan: &MigrationPlan) -> bool {
    let uris = rewrite_extension_uris(item, plan);
    let steps = wrap_step_date_times(item);
    if uris + steps > 0 {
        tracing::debug!(uris, steps, "rewrote item");
    }
    uris + steps > 0
}

/// Point extension entries at the target URI. Entries already equal to it
/// are left alone, which keeps the rewrite idempotent.
fn rewrite_extension_uris(item: &mut Value, plan: &MigrationPlan) -> usize {
    let Some(extensions) = item.get_mut("stac_extensions").and_then(Value::as_array_mut) else {
        return 0;
    };

    let mut changed = 0;
    for entry in extensions.iter_mut() {
        let Some(uri) = entry.as_str() else {
            continue;
        };
        if uri.contains(&plan.extension_marker) && uri != plan.target_uri {
            *entry = Value::String(plan.target_uri.clone());
            changed += 1;
        }
    }
    changed
}

/// Wrap string `stepDateTime`s of lineage elements into CI_Date objects.
fn wrap_step_date_times(item: &mut Value) -> usize {
    let Some(elements) = item
        .pointer_mut("/properties/liability:quality/elements")
        .and_then(Value::as_array_mut)
    else {
        return 0;
    };

    let steps = elements
        .iter_mut()
        .filter(|element| element.get("elementType").and_then(Value::as_str) == Some("lineage"))
        .filter_map(|element| element.pointer_mut("/detail/processStep"))
        .filter_map(Value::as_array_mut)
        .flat_map(|steps| steps.iter_mut());

    let mut changed = 0;
    for step in steps {
        let raw = step
            .get("stepDateTime")
            .and_then(Value::as_str)
            .map(str::to_string);
        if let Some(raw) = raw {
            step["stepDateTime"] = json!({ "processing": raw });
            changed += 1;
        }
    }
    changed
}
