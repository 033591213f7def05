//! # Example Subcommand
//!
//! Checks the bundled reference item against the bundled schema. Takes no
//! path: both locations come from the configuration.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use stacl_core::{load_json, StacItem, ToolConfig};
use stacl_report::{rule, ExampleBanner, ItemSummary, ReportSettings, Verdict, ViolationReport};
use stacl_schema::{SchemaError, SchemaValidator};

use crate::{CommandOutput, Transcript};

/// Arguments for the `stacl example` subcommand.
#[derive(Args, Debug, Default)]
pub struct ExampleArgs {}

/// Execute the example subcommand.
pub fn run_example(args: &ExampleArgs, repo_root: &Path, config: &ToolConfig) -> Result<u8> {
    Ok(check_example(args, repo_root, config).emit())
}

/// Build the example report without printing it.
pub fn check_example(_args: &ExampleArgs, repo_root: &Path, config: &ToolConfig) -> CommandOutput {
    let example_path = crate::resolve_path(&config.example_item, repo_root);
    let schema_path = crate::resolve_path(&config.example_schema, repo_root);

    let mut out = Transcript::default();

    let item = match load_json(&example_path) {
        Ok(item) => item,
        Err(e) => {
            out.line(format_args!("Error: {e}"));
            return out.finish(1);
        }
    };
    let validator = match SchemaValidator::from_file(&schema_path) {
        Ok(validator) => validator,
        Err(SchemaError::Load(e)) => {
            out.line(format_args!("Error: {e}"));
            return out.finish(1);
        }
        Err(e) => {
            out.line(format_args!("Unexpected error during validation: {e}"));
            return out.finish(1);
        }
    };

    let name = example_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| example_path.display().to_string());
    out.line(format_args!("Validating: {name}"));
    out.line(rule('='));

    let outcome = validator.validate(&item);
    if let Some(violation) = outcome.violation() {
        out.block(ViolationReport(violation));
        out.blank();
        out.block(Verdict::Failed);
        return out.finish(1);
    }

    out.block(ItemSummary::from_item(
        StacItem::new(&item),
        validator.schema(),
        ReportSettings::from_config(config),
    ));
    out.blank();
    out.block(ExampleBanner);
    out.finish(0)
}
