//! Directional synchronization engine
//!
//! One run copies the files covered by a tool's sync paths from one side
//! to the other (`to-remote`: local directory to mirror, `from-remote`:
//! mirror to local directory). Every file ends up in exactly one bucket of
//! the [`ComparisonResult`]. Copies are whole-file overwrites; files deleted
//! on the source side are never deleted on the destination.

mod actions;
mod executor;
mod orchestrator;
mod reporting;


use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

pub use actions::{SyncAction, SyncActionResolver};
pub use executor::FileOperationExecutor;
pub use orchestrator::SyncEngine;
pub use reporting::SyncReporter;

use crate::backup::BackupRecord;
use crate::comparison::ResolutionPlan;
use crate::config::SyncDirection;
use crate::security::SecretMatch;

/// Options for a single sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Classify only, write nothing
    pub dry_run: bool,
    /// Skip secret scanning for this run
    pub force: bool,
    /// Snapshot the local directory before a `from-remote` run
    pub backup_before_pull: bool,
    /// Snapshot before a `from-remote` run even if `backup_before_pull` is off
    pub require_backup: bool,
    /// Relative paths a `from-remote` run must leave untouched
    pub keep_local: BTreeSet<PathBuf>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            force: false,
            backup_before_pull: true,
            require_backup: false,
            keep_local: BTreeSet::new(),
        }
    }
}

impl SyncOptions {
    /// Apply a conflict resolution plan
    #[must_use]
    pub fn with_plan(mut self, plan: ResolutionPlan) -> Self {
        self.keep_local.extend(plan.keep_local);
        self.require_backup |= plan.require_backup;
        self
    }
}

/// Why a file was not copied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Matched an ignore pattern
    Ignored,
    /// Sync path missing on the source side
    NotFound,
    /// Source could not be read
    Unreadable,
    /// Kept by a conflict resolution
    KeptLocal,
    /// Copy to the destination failed
    WriteFailed,
}

impl SkipReason {
    /// Stable identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ignored => "ignored",
            Self::NotFound => "not_found",
            Self::Unreadable => "unreadable",
            Self::KeptLocal => "kept_local",
            Self::WriteFailed => "write_failed",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file left out of the copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    /// Path relative to the tool directory
    pub path: PathBuf,
    /// Why it was skipped
    pub reason: SkipReason,
}

/// A file withheld because it appears to contain secrets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensitiveFile {
    /// Path relative to the tool directory
    pub path: PathBuf,
    /// Masked matches
    pub matches: Vec<SecretMatch>,
}

/// Classification of every file a run looked at
///
/// A path appears in at most one list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    /// Copied to a destination where it did not exist
    pub added: Vec<PathBuf>,
    /// Copied over a destination with different content
    pub modified: Vec<PathBuf>,
    /// Already identical on both sides, not copied
    pub unchanged: Vec<PathBuf>,
    /// Left out, with a reason
    pub skipped: Vec<SkippedFile>,
    /// Withheld because of suspected secrets
    pub sensitive: Vec<SensitiveFile>,
}

impl ComparisonResult {
    /// Number of files copied (or that would be copied in a dry run)
    #[must_use]
    pub fn changed_count(&self) -> usize {
        self.added.len() + self.modified.len()
    }

    /// Whether `path` was classified in any list
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.added.iter().any(|p| p == path)
            || self.modified.iter().any(|p| p == path)
            || self.unchanged.iter().any(|p| p == path)
            || self.skipped.iter().any(|s| s.path == path)
            || self.sensitive.iter().any(|s| s.path == path)
    }

    /// Skip reason recorded for `path`
    #[must_use]
    pub fn skip_reason(&self, path: &Path) -> Option<SkipReason> {
        self.skipped
            .iter()
            .find(|s| s.path == path)
            .map(|s| s.reason)
    }

    pub(crate) fn record(&mut self, action: SyncAction) {
        match action {
            SyncAction::Add { path } => self.added.push(path),
            SyncAction::Update { path } => self.modified.push(path),
            SyncAction::Unchanged { path } => self.unchanged.push(path),
            SyncAction::Skip { path, reason } => self.skipped.push(SkippedFile { path, reason }),
            SyncAction::Sensitive { path, matches } => {
                self.sensitive.push(SensitiveFile { path, matches });
            }
        }
    }
}

/// Outcome of a successful sync run
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    /// Tool name
    pub tool: String,
    /// Direction of the run
    pub direction: SyncDirection,
    /// Whether writes were suppressed
    pub dry_run: bool,
    /// Per-file classification
    #[serde(flatten)]
    pub comparison: ComparisonResult,
    /// Snapshot taken before a `from-remote` run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<BackupRecord>,
    /// Recoverable problems encountered along the way
    pub warnings: Vec<String>,
}
