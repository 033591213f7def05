//! # Migrate Subcommand
//!
//! Batch rewrite of sample items to the current extension release. With
//! `--check` nothing is written and the exit code reports whether any
//! file is out of date, like a lockfile check.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use stacl_core::ToolConfig;
use stacl_migrate::{migrate_dir, MigrationMode, MigrationPlan};

use crate::CommandOutput;

/// Arguments for the `stacl migrate` subcommand.
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Directory of sample items. Defaults to the configured samples directory.
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Report files that need migrating without rewriting them.
    #[arg(long)]
    pub check: bool,
}

/// Execute the migrate subcommand.
///
/// Returns exit code: 0 on success, 1 if a file failed or `--check` found
/// stale files.
pub fn run_migrate(args: &MigrateArgs, repo_root: &Path, config: &ToolConfig) -> Result<u8> {
    Ok(migrate_samples(args, repo_root, config)?.emit())
}

/// Run the batch and render its summary without printing it.
pub fn migrate_samples(
    args: &MigrateArgs,
    repo_root: &Path,
    config: &ToolConfig,
) -> Result<CommandOutput> {
    let dir = crate::resolve_path(args.dir.as_deref().unwrap_or(&config.samples_dir), repo_root);
    let mode = if args.check {
        MigrationMode::Check
    } else {
        MigrationMode::Write
    };

    let summary = migrate_dir(&dir, &MigrationPlan::from(&config.migration), mode)
        .with_context(|| format!("failed to migrate samples in {}", dir.display()))?;

    Ok(CommandOutput {
        text: summary.to_string(),
        exit_code: summary.exit_code(),
    })
}
