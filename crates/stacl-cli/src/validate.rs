//! # Validate Subcommand
//!
//! Validates one STAC item against the liability-claims extension schema
//! and prints the full report: the first violation with its path and
//! branch context, or the pass banner followed by the item summary and
//! the additional checks.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use stacl_core::{load_json, StacItem, ToolConfig};
use stacl_report::{AdditionalChecks, ItemSummary, ReportSettings, Verdict, ViolationReport};
use stacl_schema::{SchemaError, SchemaValidator};

use crate::{CommandOutput, Transcript};

/// Arguments for the `stacl validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// STAC item (JSON) to validate.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Schema to validate against. Defaults to the configured extension schema.
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when the item conforms, 1 otherwise.
pub fn run_validate(args: &ValidateArgs, repo_root: &Path, config: &ToolConfig) -> Result<u8> {
    Ok(validate_item(args, repo_root, config).emit())
}

/// Build the validate report without printing it.
pub fn validate_item(args: &ValidateArgs, repo_root: &Path, config: &ToolConfig) -> CommandOutput {
    let item_path = crate::resolve_path(&args.path, repo_root);
    let schema_path = crate::resolve_path(args.schema.as_deref().unwrap_or(&config.schema), repo_root);

    let mut out = Transcript::default();
    out.line(format_args!("Validating: {}", item_path.display()));
    out.line(format_args!("Schema: {}", schema_path.display()));
    out.blank();

    let validator = match SchemaValidator::from_file(&schema_path) {
        Ok(validator) => validator,
        Err(SchemaError::Load(e)) => {
            out.line(format_args!("Error: {e}"));
            return out.finish(1);
        }
        Err(e) => {
            out.line(format_args!("Unexpected error during validation: {e}"));
            out.blank();
            out.block(Verdict::Failed);
            return out.finish(1);
        }
    };

    let item = match load_json(&item_path) {
        Ok(item) => item,
        Err(e) => {
            out.line(format_args!("Error: {e}"));
            return out.finish(1);
        }
    };

    let outcome = validator.validate(&item);
    if let Some(violation) = outcome.violation() {
        out.block(ViolationReport(violation));
    }

    let verdict = Verdict::of(&outcome);
    out.blank();
    out.block(verdict);
    if verdict == Verdict::Failed {
        return out.finish(verdict.exit_code());
    }

    let item = StacItem::new(&item);
    out.blank();
    out.block(ItemSummary::from_item(
        item,
        validator.schema(),
        ReportSettings::from_config(config),
    ));
    out.blank();
    out.block(AdditionalChecks::run(item));

    out.finish(verdict.exit_code())
}
