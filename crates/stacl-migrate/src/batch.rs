//! # Directory Migration
//!
//! Applies [`migrate_item`] to every `*.json` file directly inside a
//! directory, in filename order. A file that cannot be loaded or written
//! is recorded as failed and the batch moves on to the next one.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use stacl_core::{load_json, write_json_pretty, LoadError};

use crate::item::{migrate_item, MigrationPlan};

/// Errors that stop a batch before any file is processed.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// The directory does not exist.
    #[error("directory not found: {}", path.display())]
    DirNotFound {
        /// Requested directory.
        path: PathBuf,
    },

    /// The directory could not be listed.
    #[error("cannot list {}: {source}", path.display())]
    ReadDir {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Whether changed files are written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationMode {
    /// Rewrite changed files in place.
    Write,
    /// Report what would change; write nothing.
    Check,
}

/// What happened to one file.
#[derive(Debug)]
pub enum FileOutcome {
    /// At least one rewrite applied (written unless checking).
    Updated,
    /// Already migrated.
    Unchanged,
    /// Loading or writing failed.
    Failed(LoadError),
}

/// Outcome of one file in the batch.
#[derive(Debug)]
pub struct FileReport {
    /// File name without directory.
    pub name: String,
    /// Full path.
    pub path: PathBuf,
    /// What happened.
    pub outcome: FileOutcome,
}

/// Outcome of a whole batch.
#[derive(Debug)]
pub struct MigrationSummary {
    /// Mode the batch ran in.
    pub mode: MigrationMode,
    /// One report per file, in filename order.
    pub files: Vec<FileReport>,
}

impl MigrationSummary {
    /// Files that were (or would be) updated.
    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Updated))
    }

    /// Files that failed to load or write.
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }

    /// 1 on any failure, or when checking and a file is out of date.
    pub fn exit_code(&self) -> u8 {
        let stale = self.mode == MigrationMode::Check && self.updated() > 0;
        if self.failed() > 0 || stale {
            1
        } else {
            0
        }
    }
}

impl fmt::Display for MigrationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for file in &self.files {
            match (&file.outcome, self.mode) {
                (FileOutcome::Updated, MigrationMode::Write) => {
                    writeln!(f, "✓ Updated {}", file.name)?
                }
                (FileOutcome::Updated, MigrationMode::Check) => {
                    writeln!(f, "✗ Would update {}", file.name)?
                }
                (FileOutcome::Unchanged, _) => writeln!(f, "  No changes needed for {}", file.name)?,
                (FileOutcome::Failed(e), _) => writeln!(f, "Error: {e}")?,
            }
        }
        writeln!(f)?;
        match self.mode {
            MigrationMode::Write => writeln!(f, "Total files updated: {}", self.updated()),
            MigrationMode::Check => writeln!(f, "Total files needing update: {}", self.updated()),
        }
    }
}

/// Migrate every `*.json` file directly inside `dir`.
///
/// # Errors
///
/// Only directory-level failures are errors; per-file failures are
/// recorded in the summary.
pub fn migrate_dir(
    dir: &Path,
    plan: &MigrationPlan,
    mode: MigrationMode,
) -> Result<MigrationSummary, MigrateError> {
    if !dir.is_dir() {
        return Err(MigrateError::DirNotFound {
            path: dir.to_path_buf(),
        });
    }

    let files = json_files(dir)?
        .into_iter()
        .map(|path| migrate_file(path, plan, mode))
        .collect();

    let summary = MigrationSummary { mode, files };
    tracing::info!(
        dir = %dir.display(),
        updated = summary.updated(),
        failed = summary.failed(),
        ?mode,
        "migration finished"
    );
    Ok(summary)
}

fn json_files(dir: &Path) -> Result<Vec<PathBuf>, MigrateError> {
    let entries = std::fs::read_dir(dir).map_err(|e| MigrateError::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}

fn migrate_file(path: PathBuf, plan: &MigrationPlan, mode: MigrationMode) -> FileReport {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let outcome = match apply(&path, plan, mode) {
        Ok(true) => FileOutcome::Updated,
        Ok(false) => FileOutcome::Unchanged,
        Err(e) => {
            tracing::warn!(error = %e, "skipping file");
            FileOutcome::Failed(e)
        }
    };

    FileReport {
        name,
        path,
        outcome,
    }
}

fn apply(path: &Path, plan: &MigrationPlan, mode: MigrationMode) -> Result<bool, LoadError> {
    let mut item = load_json(path)?;
    let changed = migrate_item(&mut item, plan);
    if changed && mode == MigrationMode::Write {
        write_json_pretty(path, &item)?;
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stacl_core::MigrationConfig;

    fn plan() -> MigrationPlan {
        MigrationPlan::from(&MigrationConfig::default())
    }

    fn write(dir: &Path, name: &str, value: &serde_json::Value) {
        std::fs::write(dir.join(name), serde_json::to_string(value).unwrap()).unwrap();
    }

    fn stale_item() -> serde_json::Value {
        json!({
            "type": "Feature",
            "stac_extensions": [
                "https://luciocola.github.io/stac-extension-liability-claims/v1.3.0/schema.json"
            ],
            "properties": {
                "liability:quality": {
                    "elements": [
                        {"elementType": "lineage", "detail": {"processStep": [{"stepDateTime": "2024-01-01"}]}}
                    ]
                }
            }
        })
    }

    #[test]
    fn rewrites_stale_files_and_skips_current_ones() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b-stale.json", &stale_item());
        write(dir.path(), "a-current.json", &json!({"stac_extensions": []}));
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let summary = migrate_dir(dir.path(), &plan(), MigrationMode::Write).unwrap();
        assert_eq!(summary.files.len(), 2);
        assert_eq!(summary.files[0].name, "a-current.json");
        assert_eq!(summary.updated(), 1);
        assert_eq!(summary.exit_code(), 0);

        let text = summary.to_string();
        assert_eq!(
            text,
            "  No changes needed for a-current.json\n✓ Updated b-stale.json\n\nTotal files updated: 1\n"
        );

        let written = std::fs::read_to_string(dir.path().join("b-stale.json")).unwrap();
        assert!(written.ends_with("}\n"));
        assert!(written.contains("\n  \"type\": \"Feature\""));
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(
            value["properties"]["liability:quality"]["elements"][0]["detail"]["processStep"][0]
                ["stepDateTime"],
            json!({"processing": "2024-01-01"})
        );
    }

    #[test]
    fn second_run_needs_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "item.json", &stale_item());

        migrate_dir(dir.path(), &plan(), MigrationMode::Write).unwrap();
        let before = std::fs::read(dir.path().join("item.json")).unwrap();

        let summary = migrate_dir(dir.path(), &plan(), MigrationMode::Write).unwrap();
        assert_eq!(summary.updated(), 0);
        assert!(summary.to_string().contains("  No changes needed for item.json"));
        assert_eq!(std::fs::read(dir.path().join("item.json")).unwrap(), before);
    }

    #[test]
    fn check_mode_writes_nothing_and_fails_when_stale() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "item.json", &stale_item());
        let before = std::fs::read(dir.path().join("item.json")).unwrap();

        let summary = migrate_dir(dir.path(), &plan(), MigrationMode::Check).unwrap();
        assert_eq!(summary.updated(), 1);
        assert_eq!(summary.exit_code(), 1);
        assert!(summary.to_string().contains("✗ Would update item.json"));
        assert_eq!(std::fs::read(dir.path().join("item.json")).unwrap(), before);
    }

    #[test]
    fn malformed_file_is_reported_and_batch_continues() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a-broken.json"), "{ nope").unwrap();
        write(dir.path(), "b-item.json", &stale_item());

        let summary = migrate_dir(dir.path(), &plan(), MigrationMode::Write).unwrap();
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.updated(), 1);
        assert_eq!(summary.exit_code(), 1);
        assert!(summary.to_string().starts_with("Error: Invalid JSON in "));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = migrate_dir(&dir.path().join("nope"), &plan(), MigrationMode::Write).unwrap_err();
        assert!(matches!(err, MigrateError::DirNotFound { .. }));
    }
}
