//! Pre-pull conflict detection and resolution choices

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::diff::{ChangeCount, DiffGenerator};
use super::hash::Fingerprint;
use crate::context::SyncContext;
use crate::scanner::TreeScanner;

/// A path present on both sides with differing content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictRecord {
    /// Path relative to the tool directory
    pub path: PathBuf,
    /// Fingerprint of the local copy
    pub local_fingerprint: Fingerprint,
    /// Fingerprint of the mirror copy
    pub remote_fingerprint: Fingerprint,
    /// Local content, empty if it could not be read as text
    pub local_content: String,
    /// Mirror content, empty if it could not be read as text
    pub remote_content: String,
}

impl ConflictRecord {
    /// Unified diff of what pulling would change locally
    #[must_use]
    pub fn diff(&self) -> String {
        let label = self.path.display();
        DiffGenerator::unified(
            &self.local_content,
            &self.remote_content,
            &format!("local/{label}"),
            &format!("remote/{label}"),
        )
    }

    /// Lines pulling would add and remove locally
    #[must_use]
    pub fn change_count(&self) -> ChangeCount {
        DiffGenerator::count_changes(&self.local_content, &self.remote_content)
    }

    /// Color-coded variant of [`diff`](Self::diff)
    #[must_use]
    pub fn colored_diff(&self) -> String {
        let label = self.path.display();
        DiffGenerator::colored(
            &self.local_content,
            &self.remote_content,
            &format!("local/{label}"),
            &format!("remote/{label}"),
        )
    }
}

/// How to handle all conflicts of a tool before pulling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictResolution {
    /// Overwrite local files with the mirror
    UseRemote,
    /// Leave every conflicting local file untouched
    KeepLocal,
    /// Decide file by file
    PerFile,
    /// Skip the tool entirely
    Abort,
}

/// Decision for a single conflicting file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileChoice {
    /// Overwrite the local file
    UseRemote,
    /// Keep the local file
    KeepLocal,
    /// Snapshot the local directory first, then overwrite
    BackupThenRemote,
}

/// What the sync engine should do once conflicts are resolved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionPlan {
    /// Paths that must not be overwritten
    pub keep_local: BTreeSet<PathBuf>,
    /// Whether a pre-pull snapshot is mandatory
    pub require_backup: bool,
}

impl ResolutionPlan {
    /// Plan for a tool-wide decision; `None` means abort
    ///
    /// [`ConflictResolution::PerFile`] without per-file answers behaves like
    /// [`ConflictResolution::UseRemote`].
    #[must_use]
    pub fn uniform(resolution: ConflictResolution, conflicts: &[ConflictRecord]) -> Option<Self> {
        match resolution {
            ConflictResolution::Abort => None,
            ConflictResolution::UseRemote | ConflictResolution::PerFile => Some(Self::default()),
            ConflictResolution::KeepLocal => Some(Self {
                keep_local: conflicts.iter().map(|c| c.path.clone()).collect(),
                require_backup: false,
            }),
        }
    }

    /// Plan from per-file answers
    pub fn from_choices<'a>(choices: impl IntoIterator<Item = (&'a Path, FileChoice)>) -> Self {
        let mut plan = Self::default();
        for (path, choice) in choices {
            match choice {
                FileChoice::UseRemote => {}
                FileChoice::KeepLocal => {
                    plan.keep_local.insert(path.to_path_buf());
                }
                FileChoice::BackupThenRemote => plan.require_backup = true,
            }
        }
        plan
    }
}

/// Finds files that a pull would overwrite with different content
pub struct ConflictDetector<'a> {
    ctx: &'a SyncContext,
}

impl<'a> ConflictDetector<'a> {
    /// Create a detector over `ctx`
    #[must_use]
    pub const fn new(ctx: &'a SyncContext) -> Self {
        Self { ctx }
    }

    /// List conflicts for `tool`
    ///
    /// Advisory only: an unknown tool or a missing directory on either side
    /// yields an empty list, and files that cannot be fingerprinted are
    /// left out.
    #[must_use]
    pub fn detect(&self, tool: &str) -> Vec<ConflictRecord> {
        let Some(layout) = self.ctx.layout(tool) else {
            return Vec::new();
        };
        if !layout.local_dir.is_dir() || !layout.remote_dir.is_dir() {
            return Vec::new();
        }

        let remote = TreeScanner::new(&layout.sync_paths).scan(&layout.remote_dir);
        let mut conflicts = Vec::new();

        for path in remote.files {
            if layout.ignore.is_ignored(&path) {
                continue;
            }
            let local_file = layout.local_dir.join(&path);
            let remote_file = layout.remote_dir.join(&path);
            if !local_file.is_file() {
                continue;
            }

            let (Ok(local_fingerprint), Ok(remote_fingerprint)) = (
                Fingerprint::of_file(&local_file),
                Fingerprint::of_file(&remote_file),
            ) else {
                debug!(tool, path = %path.display(), "cannot fingerprint, skipping");
                continue;
            };

            if local_fingerprint != remote_fingerprint {
                conflicts.push(ConflictRecord {
                    local_content: read_text_or_empty(&local_file),
                    remote_content: read_text_or_empty(&remote_file),
                    path,
                    local_fingerprint,
                    remote_fingerprint,
                });
            }
        }

        conflicts
    }
}

/// Best-effort text capture for display: any read or decoding failure
/// yields an empty string instead of an error.
fn read_text_or_empty(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_default()
}
