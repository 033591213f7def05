//! # Quality Subcommand
//!
//! Validates a standalone quality report, or an array of reports, against
//! the ISO 19115 quality schema.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use stacl_core::{load_json, ToolConfig};
use stacl_report::validate_quality;
use stacl_schema::{SchemaError, SchemaValidator};

use crate::{CommandOutput, Transcript};

/// Arguments for the `stacl quality` subcommand.
#[derive(Args, Debug)]
pub struct QualityArgs {
    /// Quality report JSON (a single report or an array of reports).
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Schema to validate against. Defaults to the configured quality schema.
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,
}

/// Execute the quality subcommand.
pub fn run_quality(args: &QualityArgs, repo_root: &Path, config: &ToolConfig) -> Result<u8> {
    Ok(check_quality(args, repo_root, config).emit())
}

/// Build the quality report without printing it.
pub fn check_quality(args: &QualityArgs, repo_root: &Path, config: &ToolConfig) -> CommandOutput {
    let file_path = crate::resolve_path(&args.path, repo_root);
    let schema_path = crate::resolve_path(
        args.schema.as_deref().unwrap_or(&config.quality_schema),
        repo_root,
    );

    let mut out = Transcript::default();
    out.line(format_args!(
        "Validating {} against {}",
        file_path.display(),
        schema_path.display()
    ));

    let validator = match SchemaValidator::from_file(&schema_path) {
        Ok(validator) => validator,
        Err(SchemaError::Load(e)) => {
            out.line(format_args!("Error: {e}"));
            return out.finish(1);
        }
        Err(e) => {
            out.line(format_args!("Unexpected error: {e}"));
            return out.finish(1);
        }
    };

    let instance = match load_json(&file_path) {
        Ok(instance) => instance,
        Err(e) => {
            out.line(format_args!("Error: {e}"));
            return out.finish(1);
        }
    };

    let verdict = validate_quality(&instance, &validator);
    out.block(&verdict);
    out.finish(verdict.exit_code())
}
