//! # stacl CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros for argument parsing.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stacl_cli::example::{run_example, ExampleArgs};
use stacl_cli::migrate::{run_migrate, MigrateArgs};
use stacl_cli::quality::{run_quality, QualityArgs};
use stacl_cli::validate::{run_validate, ValidateArgs};
use stacl_core::ToolConfig;

/// STAC Liability & Claims extension toolchain
///
/// Validates STAC items and ISO 19115 quality reports against the
/// liability-claims extension schemas, checks the reference example, and
/// migrates sample items to the current extension release.
#[derive(Parser, Debug)]
#[command(name = "stacl", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Repository root holding json-schema/ and samples/.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a STAC item against the liability-claims extension schema.
    Validate(ValidateArgs),

    /// Validate a quality report (object or array) against the quality schema.
    Quality(QualityArgs),

    /// Validate the bundled reference example.
    Example(ExampleArgs),

    /// Rewrite sample items to the current extension release.
    Migrate(MigrateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("stacl CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let repo_root = resolve_repo_root(cli.root.as_deref());
    tracing::debug!(repo_root = %repo_root.display(), "resolved repository root");

    let result = ToolConfig::load(&repo_root, cli.config.as_deref())
        .context("failed to load configuration")
        .and_then(|config| match &cli.command {
            Commands::Validate(args) => run_validate(args, &repo_root, &config),
            Commands::Quality(args) => run_quality(args, &repo_root, &config),
            Commands::Example(args) => run_example(args, &repo_root, &config),
            Commands::Migrate(args) => run_migrate(args, &repo_root, &config),
        });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

/// `--root` if given, else the nearest ancestor of the current directory
/// holding `json-schema/`, else the current directory.
fn resolve_repo_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(root) = explicit {
        return root.to_path_buf();
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    stacl_cli::find_repo_root(&cwd).unwrap_or_else(|| {
        tracing::warn!("Could not locate repository root; using current directory");
        cwd
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::parse_from(["stacl", "migrate", "samples", "--check", "-vv", "--root", "/repo"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.root, Some(PathBuf::from("/repo")));
        let Commands::Migrate(args) = cli.command else {
            panic!("expected migrate");
        };
        assert!(args.check);
        assert_eq!(args.dir, Some(PathBuf::from("samples")));
    }

    #[test]
    fn validate_takes_optional_schema() {
        let cli = Cli::parse_from(["stacl", "validate", "item.json", "--schema", "s.json"]);
        let Commands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.path, PathBuf::from("item.json"));
        assert_eq!(args.schema, Some(PathBuf::from("s.json")));
    }

    #[test]
    fn explicit_root_wins() {
        assert_eq!(
            resolve_repo_root(Some(Path::new("/srv/stac"))),
            PathBuf::from("/srv/stac")
        );
    }
}
