//! # Tool Configuration
//!
//! File locations and extension identifiers shared by every `stacl`
//! subcommand. Defaults match the layout of the liability-claims extension
//! repository. Override via a YAML file (`stacl.yaml` at the root, or an
//! explicit `--config`) and then via environment variables:
//!
//! - `STACL_SCHEMA`: item schema path
//! - `STACL_QUALITY_SCHEMA`: quality report schema path
//!
//! Relative paths are interpreted against the tool root by the CLI.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Name of the config file looked up at the tool root.
pub const DEFAULT_CONFIG_FILE: &str = "stacl.yaml";

/// Environment variable overriding [`ToolConfig::schema`].
pub const ENV_SCHEMA: &str = "STACL_SCHEMA";

/// Environment variable overriding [`ToolConfig::quality_schema`].
pub const ENV_QUALITY_SCHEMA: &str = "STACL_QUALITY_SCHEMA";

/// Configuration for the validation and migration commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Extension schema used by `stacl validate`.
    pub schema: PathBuf,
    /// ISO 19115 quality schema used by `stacl quality`.
    pub quality_schema: PathBuf,
    /// Item checked by `stacl example`.
    pub example_item: PathBuf,
    /// Schema used by `stacl example`.
    pub example_schema: PathBuf,
    /// Directory scanned by `stacl migrate` when no directory is given.
    pub samples_dir: PathBuf,
    /// Substring that marks the extension in `stac_extensions`.
    pub extension_id: String,
    /// Property key prefixes reported as extension fields.
    pub field_prefixes: Vec<String>,
    /// Batch rewrite settings.
    pub migration: MigrationConfig,
}

/// Settings for the `stac_extensions` URI rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MigrationConfig {
    /// Entries containing this substring are rewritten.
    pub extension_marker: String,
    /// Replacement URI.
    pub target_uri: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            schema: PathBuf::from("json-schema/schema.json"),
            quality_schema: PathBuf::from("json-schema/iso19115-quality.json"),
            example_item: PathBuf::from("samples/item-with-eovoc-dq.json"),
            example_schema: PathBuf::from("json-schema/schema.json"),
            samples_dir: PathBuf::from("samples"),
            extension_id: "liability-claims".to_string(),
            field_prefixes: vec!["liability:".into(), "dq:".into(), "ard:".into()],
            migration: MigrationConfig::default(),
        }
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            extension_marker: "stac-extension-liability-claims".to_string(),
            target_uri:
                "https://luciocola.github.io/stac-extension-liability-claims/v1.4.0/schema.json"
                    .to_string(),
        }
    }
}

impl ToolConfig {
    /// Parse a YAML document. `origin` is only used in error messages.
    pub fn from_yaml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        // An empty file deserializes to `null`, which serde_yaml rejects for a struct.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            source: e,
        })
    }

    /// Read and parse a YAML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        Self::from_yaml_str(&content, path)
    }

    /// Assemble the effective configuration.
    ///
    /// An `explicit` file must exist. Without one, `<root>/stacl.yaml` is
    /// used when present, otherwise the defaults. Environment overrides are
    /// applied last, then the result is validated.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let candidate = root.join(DEFAULT_CONFIG_FILE);
                if candidate.is_file() {
                    Self::from_file(&candidate)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        tracing::debug!(?config, "effective configuration");
        Ok(config)
    }

    /// Apply `STACL_*` overrides obtained through `lookup`.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(schema) = lookup(ENV_SCHEMA).filter(|s| !s.is_empty()) {
            self.schema = PathBuf::from(schema);
        }
        if let Some(schema) = lookup(ENV_QUALITY_SCHEMA).filter(|s| !s.is_empty()) {
            self.quality_schema = PathBuf::from(schema);
        }
    }

    /// Reject values that would make every command misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extension_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "extension_id",
                reason: "must not be empty".into(),
            });
        }
        if self.field_prefixes.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "field_prefixes",
                reason: "an empty prefix would match every property".into(),
            });
        }
        if self.migration.extension_marker.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "migration.extension_marker",
                reason: "must not be empty".into(),
            });
        }
        if self.migration.target_uri.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "migration.target_uri",
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_repository_layout() {
        let config = ToolConfig::default();
        assert_eq!(config.schema, PathBuf::from("json-schema/schema.json"));
        assert_eq!(config.extension_id, "liability-claims");
        assert_eq!(config.field_prefixes, ["liability:", "dq:", "ard:"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = "extension_id: insurance-claims\nmigration:\n  target_uri: https://example.com/v2/schema.json\n";
        let config = ToolConfig::from_yaml_str(yaml, Path::new("stacl.yaml")).unwrap();
        assert_eq!(config.extension_id, "insurance-claims");
        assert_eq!(config.migration.target_uri, "https://example.com/v2/schema.json");
        assert_eq!(
            config.migration.extension_marker,
            "stac-extension-liability-claims"
        );
        assert_eq!(config.samples_dir, PathBuf::from("samples"));
    }

    #[test]
    fn empty_yaml_is_default() {
        let config = ToolConfig::from_yaml_str("  \n", Path::new("stacl.yaml")).unwrap();
        assert_eq!(config, ToolConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ToolConfig::from_yaml_str("schemas: x.json\n", Path::new("stacl.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "got {err}");
    }

    #[test]
    fn env_overrides_replace_schema_paths() {
        let mut config = ToolConfig::default();
        config.apply_env_overrides(|name| match name {
            ENV_SCHEMA => Some("/opt/schemas/liability.json".into()),
            ENV_QUALITY_SCHEMA => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.schema, PathBuf::from("/opt/schemas/liability.json"));
        assert_eq!(
            config.quality_schema,
            PathBuf::from("json-schema/iso19115-quality.json")
        );
    }

    #[test]
    fn validate_rejects_empty_prefix() {
        let config = ToolConfig {
            field_prefixes: vec!["liability:".into(), String::new()],
            ..ToolConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("field_prefixes"));
    }

    #[test]
    fn load_prefers_root_config_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "samples_dir: fixtures/items\n",
        )
        .unwrap();
        let config = ToolConfig::load(dir.path(), None).unwrap();
        assert_eq!(config.samples_dir, PathBuf::from("fixtures/items"));
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = ToolConfig::load(dir.path(), Some(&dir.path().join("nope.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }), "got {err}");
    }
}
