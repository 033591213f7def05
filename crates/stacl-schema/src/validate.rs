//! # Runtime Schema Validation
//!
//! Compiles a JSON Schema document with the `jsonschema` crate and
//! validates documents against it. The draft is taken from the schema's
//! `$schema` keyword (the bundled schemas are draft-07).
//!
//! ## Schema Resolution
//!
//! Internal `$ref`s of the form `#/definitions/<name>` are resolved by the
//! engine against the schema root. Every other reference goes through
//! [`LocalSchemaRetriever`], which serves the `*.json` files found next to
//! the schema, matched by `$id` or by filename. References that match
//! nothing resolve to the permissive schema `{}` so that validation never
//! reaches the network.
//!
//! ## First-Error Contract
//!
//! [`SchemaValidator::validate`] stops at the first violation the engine
//! yields. Callers print one error, never a list.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use jsonschema::{Retrieve, Uri, Validator};
use serde_json::Value;
use thiserror::Error;

use stacl_core::{load_json, LoadError};

use crate::context::{disjunction_branches, standalone_branch, SchemaScope};
use crate::directory::SchemaDirectory;
use crate::outcome::{resolve_segments, segments_for, SchemaViolation, ValidationOutcome};

/// Errors that prevent validation from running at all.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema file could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The schema could not be compiled into a validator.
    #[error("failed to compile schema {origin}: {reason}")]
    Compile {
        /// Schema path or label.
        origin: String,
        /// Engine message.
        reason: String,
    },
}

/// Resolves non-local `$ref` URIs from schemas loaded off disk.
struct LocalSchemaRetriever {
    /// Schemas indexed by `$id` and by bare filename, shared with every
    /// validator compiled for the same schema.
    schemas: Arc<SchemaDirectory>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        if let Some(value) = self.schemas.lookup(uri_str) {
            tracing::debug!(uri = uri_str, "resolved $ref from schema directory");
            return Ok(value.clone());
        }

        tracing::warn!(uri = uri_str, "unresolved $ref; treating it as an empty schema");
        Ok(serde_json::json!({}))
    }
}

/// A compiled schema plus the raw document it came from.
pub struct SchemaValidator {
    /// Path or label used in diagnostics.
    origin: String,
    /// The raw schema, needed to locate `anyOf` branches.
    schema: Value,
    /// Sibling schemas available to `$ref`.
    siblings: Arc<SchemaDirectory>,
    /// Engine validator for `schema`.
    compiled: Validator,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("origin", &self.origin)
            .field("sibling_count", &self.siblings.len())
            .finish()
    }
}

impl SchemaValidator {
    /// Load a schema file and compile it. Sibling `*.json` files in the
    /// same directory become available to `$ref`.
    ///
    /// # Errors
    ///
    /// [`SchemaError::Load`] if the file is missing or not JSON,
    /// [`SchemaError::Compile`] if the engine rejects the schema.
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let schema = load_json(path)?;
        let base_dir = path.parent().map(Path::to_path_buf);
        Self::with_origin(schema, base_dir, path.display().to_string())
    }

    /// Compile an in-memory schema. `base_dir`, when given, is scanned for
    /// sibling schemas.
    pub fn new(schema: Value, base_dir: Option<PathBuf>) -> Result<Self, SchemaError> {
        Self::with_origin(schema, base_dir, "<inline schema>".to_string())
    }

    fn with_origin(
        schema: Value,
        base_dir: Option<PathBuf>,
        origin: String,
    ) -> Result<Self, SchemaError> {
        let siblings = Arc::new(match base_dir {
            Some(dir) => SchemaDirectory::load(&dir),
            None => SchemaDirectory::default(),
        });
        let compiled = compile(&schema, &siblings, &origin)?;

        tracing::debug!(origin = %origin, siblings = siblings.len(), "compiled schema");

        Ok(Self {
            origin,
            schema,
            siblings,
            compiled,
        })
    }

    /// Path or label of the schema.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The raw schema document.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Whether `instance` conforms.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.compiled.is_valid(instance)
    }

    /// Validate `instance`, stopping at the first violation.
    ///
    /// When the violation is a failed `anyOf`, each branch is validated on
    /// its own against the failing node and the first message of every
    /// failing branch is recorded as context.
    pub fn validate(&self, instance: &Value) -> ValidationOutcome {
        let Some(error) = self.compiled.iter_errors(instance).next() else {
            return ValidationOutcome::Valid;
        };

        let message = error.to_string();
        let instance_pointer = error.instance_path.to_string();
        let schema_path = error.schema_path.to_string();

        let path = segments_for(instance, &instance_pointer);
        let failing_node = resolve_segments(instance, &path).unwrap_or(instance);
        let context = self.branch_context(&schema_path, failing_node);

        tracing::info!(
            origin = %self.origin,
            instance_path = %instance_pointer,
            schema_path = %schema_path,
            "document failed validation"
        );

        ValidationOutcome::Invalid(SchemaViolation {
            message,
            path,
            schema_path,
            context,
        })
    }

    fn branch_context(&self, schema_path: &str, node: &Value) -> Vec<String> {
        let scope = SchemaScope {
            root: &self.schema,
            directory: &self.siblings,
        };
        let Some(disjunction) = disjunction_branches(scope, schema_path) else {
            return Vec::new();
        };

        disjunction
            .branches
            .iter()
            .enumerate()
            .filter_map(|(index, branch)| {
                let wrapped = standalone_branch(disjunction.document, branch);
                let label = format!("{}{schema_path}/{index}", self.origin);
                let validator = match compile(&wrapped, &self.siblings, &label) {
                    Ok(validator) => validator,
                    Err(e) => {
                        tracing::warn!(branch = index, error = %e, "cannot compile anyOf branch");
                        return None;
                    }
                };
                let message = validator.iter_errors(node).next().map(|e| e.to_string());
                message
            })
            .collect()
    }
}

fn compile(
    schema: &Value,
    siblings: &Arc<SchemaDirectory>,
    origin: &str,
) -> Result<Validator, SchemaError> {
    let retriever = LocalSchemaRetriever {
        schemas: Arc::clone(siblings),
    };
    jsonschema::options()
        .with_retriever(retriever)
        .build(schema)
        .map_err(|e| SchemaError::Compile {
            origin: origin.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PathSegment;
    use serde_json::json;

    fn liability_schema() -> Value {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "required": ["properties"],
            "properties": {
                "properties": {
                    "allOf": [
                        {"$ref": "#/definitions/require_any_field"},
                        {"$ref": "#/definitions/fields"}
                    ]
                }
            },
            "definitions": {
                "require_any_field": {
                    "anyOf": [
                        {"required": ["liability:claim_id"]},
                        {"required": ["liability:status"]}
                    ]
                },
                "fields": {
                    "type": "object",
                    "properties": {
                        "liability:damages_estimated": {"type": "number", "minimum": 0},
                        "liability:status": {"enum": ["open", "closed"]}
                    }
                }
            }
        })
    }

    #[test]
    fn test_valid_document() {
        let validator = SchemaValidator::new(liability_schema(), None).unwrap();
        let doc = json!({"properties": {"liability:claim_id": "CLM-1"}});
        assert!(validator.is_valid(&doc));
        assert_eq!(validator.validate(&doc), ValidationOutcome::Valid);
    }

    #[test]
    fn test_type_violation_reports_path() {
        let validator = SchemaValidator::new(liability_schema(), None).unwrap();
        let doc = json!({
            "properties": {
                "liability:claim_id": "CLM-1",
                "liability:damages_estimated": "a lot"
            }
        });
        let outcome = validator.validate(&doc);
        let violation = outcome.violation().expect("expected a violation");
        assert_eq!(
            violation.path,
            vec![
                PathSegment::Key("properties".into()),
                PathSegment::Key("liability:damages_estimated".into()),
            ]
        );
        assert!(violation.message.contains("number"), "{}", violation.message);
        assert!(violation.context.is_empty());
    }

    #[test]
    fn test_any_of_failure_carries_branch_context() {
        let validator = SchemaValidator::new(liability_schema(), None).unwrap();
        let doc = json!({"properties": {"datetime": "2024-01-01T00:00:00Z"}});
        let outcome = validator.validate(&doc);
        let violation = outcome.violation().expect("expected a violation");
        assert!(violation.schema_path.ends_with("anyOf"), "{}", violation.schema_path);
        assert_eq!(violation.context.len(), 2, "{:?}", violation.context);
        assert!(violation.context[0].contains("liability:claim_id"));
        assert!(violation.context[1].contains("liability:status"));
    }

    #[test]
    fn test_first_error_only() {
        let validator = SchemaValidator::new(liability_schema(), None).unwrap();
        let doc = json!({
            "properties": {
                "liability:status": "pending",
                "liability:damages_estimated": -5
            }
        });
        // Two violations exist; the outcome holds exactly one.
        let outcome = validator.validate(&doc);
        assert!(!outcome.is_valid());
        assert!(outcome.violation().is_some());
    }

    #[test]
    fn test_root_violation_has_empty_path() {
        let validator = SchemaValidator::new(liability_schema(), None).unwrap();
        let outcome = validator.validate(&json!({"type": "Feature"}));
        let violation = outcome.violation().unwrap();
        assert!(violation.path.is_empty());
        assert_eq!(violation.path_joined(" -> "), "");
    }

    #[test]
    fn test_malformed_schema_is_compile_error() {
        let err = SchemaValidator::new(json!({"type": 12}), None).unwrap_err();
        assert!(matches!(err, SchemaError::Compile { .. }), "got {err}");
    }

    #[test]
    fn test_from_file_missing_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SchemaValidator::from_file(&dir.path().join("schema.json")).unwrap_err();
        assert!(
            matches!(err, SchemaError::Load(LoadError::NotFound { .. })),
            "got {err}"
        );
    }

    #[test]
    fn test_sibling_schema_resolves_by_filename() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("currency.json"),
            br#"{"type": "string", "pattern": "^[A-Z]{3}$"}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("schema.json"),
            br#"{
                "$id": "https://example.org/liability/v1/schema.json",
                "type": "object",
                "properties": {"currency": {"$ref": "currency.json"}}
            }"#,
        )
        .unwrap();

        let validator = SchemaValidator::from_file(&dir.path().join("schema.json")).unwrap();
        assert!(validator.is_valid(&json!({"currency": "EUR"})));
        assert!(!validator.is_valid(&json!({"currency": "euro"})));
    }

    fn write_common_schema(dir: &Path) {
        std::fs::write(
            dir.join("common.json"),
            br#"{
                "$id": "https://example.org/liability/v1/common.json",
                "definitions": {
                    "either": {
                        "anyOf": [
                            {"required": ["liability:claim_id"]},
                            {"required": ["liability:status"]}
                        ]
                    }
                }
            }"#,
        )
        .unwrap();
    }

    fn assert_two_branch_context(validator: &SchemaValidator) {
        let outcome = validator.validate(&json!({"properties": {"c": 1}}));
        let violation = outcome.violation().expect("expected a violation");
        assert!(violation.schema_path.ends_with("anyOf"), "{}", violation.schema_path);
        assert_eq!(violation.context.len(), 2, "{:?}", violation.context);
        assert!(violation.context[0].contains("liability:claim_id"));
        assert!(violation.context[1].contains("liability:status"));
    }

    #[test]
    fn test_any_of_in_sibling_schema_carries_branch_context() {
        let dir = tempfile::tempdir().unwrap();
        write_common_schema(dir.path());
        let schema = json!({
            "$id": "https://example.org/liability/v1/schema.json",
            "properties": {"properties": {"$ref": "common.json#/definitions/either"}}
        });
        let validator = SchemaValidator::new(schema, Some(dir.path().to_path_buf())).unwrap();
        assert_two_branch_context(&validator);
    }

    #[test]
    fn test_any_of_behind_absolute_self_ref_carries_branch_context() {
        let schema = json!({
            "$id": "https://example.org/liability/v1/schema.json",
            "properties": {
                "properties": {
                    "$ref": "https://example.org/liability/v1/schema.json#/definitions/either"
                }
            },
            "definitions": {
                "either": {
                    "anyOf": [
                        {"required": ["liability:claim_id"]},
                        {"required": ["liability:status"]}
                    ]
                }
            }
        });
        let validator = SchemaValidator::new(schema, None).unwrap();
        assert_two_branch_context(&validator);
    }

    #[test]
    fn test_context_repeats_across_validations() {
        let dir = tempfile::tempdir().unwrap();
        write_common_schema(dir.path());
        let schema = json!({
            "properties": {
                "properties": {"$ref": "https://example.org/liability/v1/common.json#/definitions/either"}
            }
        });
        let validator = SchemaValidator::new(schema, Some(dir.path().to_path_buf())).unwrap();
        assert_two_branch_context(&validator);
        assert_two_branch_context(&validator);
    }

    #[test]
    fn test_unresolved_remote_ref_is_permissive() {
        let schema = json!({
            "$id": "https://example.org/liability/v1/schema.json",
            "properties": {"geometry": {"$ref": "https://geojson.org/schema/Geometry.json"}}
        });
        let validator = SchemaValidator::new(schema, None).unwrap();
        assert!(validator.is_valid(&json!({"geometry": {"type": "Point"}})));
    }

    #[test]
    fn test_debug_impl_hides_schema() {
        let validator = SchemaValidator::new(json!({}), None).unwrap();
        let debug = format!("{validator:?}");
        assert!(debug.contains("SchemaValidator"));
        assert!(debug.contains("<inline schema>"));
    }
}
