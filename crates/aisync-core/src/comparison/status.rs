//! Read-only sync status of a tool

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use super::hash::Fingerprint;
use crate::context::SyncContext;
use crate::scanner::TreeScanner;

/// Overall state of a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    /// Both sides hold the same files with the same content
    Synced,
    /// At least one difference
    OutOfSync,
    /// The local configuration directory is missing
    NoLocal,
    /// The mirror directory is missing
    NoRemote,
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Synced => "synced",
            Self::OutOfSync => "out_of_sync",
            Self::NoLocal => "no_local",
            Self::NoRemote => "no_remote",
        })
    }
}

/// How a single path differs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceKind {
    /// Only in the local directory
    LocalOnly,
    /// Only in the mirror
    RemoteOnly,
    /// On both sides with different content
    Modified,
}

/// One differing path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDifference {
    /// Path relative to the tool directory
    pub path: PathBuf,
    /// Kind of difference
    #[serde(rename = "state")]
    pub kind: DifferenceKind,
}

/// Status report for one tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolStatus {
    /// Tool name
    pub tool: String,
    /// Overall state
    pub state: SyncState,
    /// Differences, local paths first then mirror-only paths
    pub differences: Vec<FileDifference>,
}

impl ToolStatus {
    fn missing(tool: &str, state: SyncState) -> Self {
        Self {
            tool: tool.to_string(),
            state,
            differences: Vec::new(),
        }
    }
}

/// Compares a tool's local and mirror trees
pub struct StatusReporter<'a> {
    ctx: &'a SyncContext,
}

impl<'a> StatusReporter<'a> {
    /// Create a reporter over `ctx`
    #[must_use]
    pub const fn new(ctx: &'a SyncContext) -> Self {
        Self { ctx }
    }

    /// Report the status of `tool`
    ///
    /// Only paths covered by the tool's sync paths and not ignored are
    /// compared. A missing side takes precedence over content comparison.
    #[must_use]
    pub fn status(&self, tool: &str) -> ToolStatus {
        let Some(layout) = self.ctx.layout(tool) else {
            return ToolStatus::missing(tool, SyncState::NoLocal);
        };
        if !layout.local_dir.is_dir() {
            return ToolStatus::missing(tool, SyncState::NoLocal);
        }
        if !layout.remote_dir.is_dir() {
            return ToolStatus::missing(tool, SyncState::NoRemote);
        }

        let scanner = TreeScanner::new(&layout.sync_paths);
        let visible = |files: Vec<PathBuf>| -> Vec<PathBuf> {
            files
                .into_iter()
                .filter(|p| !layout.ignore.is_ignored(p))
                .collect()
        };
        let local = visible(scanner.scan(&layout.local_dir).files);
        let remote = visible(scanner.scan(&layout.remote_dir).files);
        let remote_set: BTreeSet<&PathBuf> = remote.iter().collect();
        let local_set: BTreeSet<&PathBuf> = local.iter().collect();

        let mut differences = Vec::new();

        for path in &local {
            let kind = if remote_set.contains(path) {
                match differs(&layout.local_dir.join(path), &layout.remote_dir.join(path)) {
                    Some(true) => Some(DifferenceKind::Modified),
                    Some(false) => None,
                    None => {
                        debug!(tool, path = %path.display(), "skipping unreadable file");
                        None
                    }
                }
            } else {
                Some(DifferenceKind::LocalOnly)
            };
            if let Some(kind) = kind {
                differences.push(FileDifference {
                    path: path.clone(),
                    kind,
                });
            }
        }

        for path in &remote {
            if !local_set.contains(path) {
                differences.push(FileDifference {
                    path: path.clone(),
                    kind: DifferenceKind::RemoteOnly,
                });
            }
        }

        let state = if differences.is_empty() {
            SyncState::Synced
        } else {
            SyncState::OutOfSync
        };

        ToolStatus {
            tool: tool.to_string(),
            state,
            differences,
        }
    }
}

/// Content comparison; `None` when either side cannot be read
fn differs(local: &Path, remote: &Path) -> Option<bool> {
    let local = Fingerprint::of_file(local).ok()?;
    let remote = Fingerprint::of_file(remote).ok()?;
    Some(local != remote)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display_matches_serde() {
        for state in [
            SyncState::Synced,
            SyncState::OutOfSync,
            SyncState::NoLocal,
            SyncState::NoRemote,
        ] {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{state}\""));
        }
    }

    #[test]
    fn test_differs_none_when_a_side_is_unreadable() {
        let tmp = tempfile::TempDir::new().unwrap();
        let file = tmp.path().join("a.md");
        std::fs::write(&file, "a").unwrap();
        std::fs::create_dir(tmp.path().join("dir.md")).unwrap();

        assert_eq!(differs(&file, &tmp.path().join("absent.md")), None);
        assert_eq!(differs(&tmp.path().join("dir.md"), &file), None);
        assert_eq!(differs(&file, &file), Some(false));
    }

    #[test]
    fn test_difference_serializes_state_field() {
        let diff = FileDifference {
            path: PathBuf::from("a.txt"),
            kind: DifferenceKind::LocalOnly,
        };
        assert_eq!(
            serde_json::to_string(&diff).unwrap(),
            r#"{"path":"a.txt","state":"local_only"}"#
        );
    }
}
