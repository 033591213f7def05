//! # stacl-cli: CLI Tool for the Liability-Claims Extension
//!
//! Provides the `stacl` command-line interface.
//!
//! ## Subcommands
//!
//! - `stacl validate`: Validate a STAC item against the extension schema
//!   and print the full report.
//! - `stacl quality`: Validate an ISO 19115 quality report (object or
//!   array) against the quality schema.
//! - `stacl example`: Check the bundled reference item.
//! - `stacl migrate`: Rewrite sample items to the current release, or
//!   verify that they already are with `--check`.
//!
//! ```bash
//! stacl validate samples/item-with-eovoc-dq.json
//! stacl quality samples/quality-report.json
//! stacl migrate samples --check
//! ```
//!
//! Every handler returns its exit code: 0 on success, 1 on any failure.
//! Report text goes to stdout; tracing diagnostics go to stderr.

pub mod example;
pub mod migrate;
pub mod quality;
pub mod validate;

use std::fmt;
use std::path::{Path, PathBuf};

/// Directory whose presence marks the repository root.
pub const SCHEMA_DIR: &str = "json-schema";

/// Resolve a path that may be relative to the repository root.
///
/// If the path is absolute, returns it as-is. If relative and the file
/// exists relative to `repo_root`, uses that. Otherwise returns the path
/// relative to the current directory.
pub fn resolve_path(path: &Path, repo_root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let repo_relative = repo_root.join(path);
    if repo_relative.exists() {
        repo_relative
    } else {
        path.to_path_buf()
    }
}

/// Walk up from `start` to the first directory containing `json-schema/`.
pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(SCHEMA_DIR).is_dir())
        .map(Path::to_path_buf)
}

/// Text a command prints, plus its exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Everything destined for stdout.
    pub text: String,
    /// Process exit code.
    pub exit_code: u8,
}

impl CommandOutput {
    /// Print the text and hand back the exit code.
    pub fn emit(self) -> u8 {
        print!("{}", self.text);
        self.exit_code
    }
}

/// Line-oriented builder for [`CommandOutput`].
#[derive(Debug, Default)]
pub(crate) struct Transcript {
    text: String,
}

impl Transcript {
    /// Append one line.
    pub(crate) fn line(&mut self, line: impl fmt::Display) {
        self.text.push_str(&line.to_string());
        self.text.push('\n');
    }

    /// Append an empty line.
    pub(crate) fn blank(&mut self) {
        self.text.push('\n');
    }

    /// Append a pre-rendered block whose lines already end in newlines.
    pub(crate) fn block(&mut self, block: impl fmt::Display) {
        self.text.push_str(&block.to_string());
    }

    pub(crate) fn finish(self, exit_code: u8) -> CommandOutput {
        CommandOutput {
            text: self.text,
            exit_code,
        }
    }
}
