//! Sync action determination logic

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{SkipReason, SyncOptions};
use crate::comparison::Fingerprint;
use crate::config::SyncDirection;
use crate::context::ToolLayout;
use crate::security::{SecretMatch, SecretScanner};

/// What to do with one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// Copy to a destination that does not exist yet
    Add {
        /// Relative path
        path: PathBuf,
    },
    /// Overwrite a destination with different content
    Update {
        /// Relative path
        path: PathBuf,
    },
    /// Both sides already identical
    Unchanged {
        /// Relative path
        path: PathBuf,
    },
    /// Leave out of the copy
    Skip {
        /// Relative path
        path: PathBuf,
        /// Reason for skipping
        reason: SkipReason,
    },
    /// Withhold because of suspected secrets
    Sensitive {
        /// Relative path
        path: PathBuf,
        /// Masked matches
        matches: Vec<SecretMatch>,
    },
}

impl SyncAction {
    /// Relative path the action applies to
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Add { path }
            | Self::Update { path }
            | Self::Unchanged { path }
            | Self::Skip { path, .. }
            | Self::Sensitive { path, .. } => path,
        }
    }

    /// Whether executing the action writes to the destination
    #[must_use]
    pub const fn writes(&self) -> bool {
        matches!(self, Self::Add { .. } | Self::Update { .. })
    }
}

/// Classifies files for one tool and direction
pub struct SyncActionResolver<'a> {
    layout: &'a ToolLayout,
    direction: SyncDirection,
    options: &'a SyncOptions,
    secrets: &'a SecretScanner,
}

impl<'a> SyncActionResolver<'a> {
    /// Create a resolver
    #[must_use]
    pub const fn new(
        layout: &'a ToolLayout,
        direction: SyncDirection,
        options: &'a SyncOptions,
        secrets: &'a SecretScanner,
    ) -> Self {
        Self {
            layout,
            direction,
            options,
            secrets,
        }
    }

    /// Directory files are read from
    #[must_use]
    pub fn source_root(&self) -> &'a Path {
        match self.direction {
            SyncDirection::ToRemote => &self.layout.local_dir,
            SyncDirection::FromRemote => &self.layout.remote_dir,
        }
    }

    /// Directory files are written to
    #[must_use]
    pub fn dest_root(&self) -> &'a Path {
        match self.direction {
            SyncDirection::ToRemote => &self.layout.remote_dir,
            SyncDirection::FromRemote => &self.layout.local_dir,
        }
    }

    /// Decide what to do with `path`
    ///
    /// Checks run in order: ignore rules, kept-local paths (pull only),
    /// source presence, secret scan (push only, unless forced), then
    /// fingerprint comparison against the destination.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> SyncAction {
        let path_buf = path.to_path_buf();

        if self.layout.ignore.is_ignored(path) {
            return SyncAction::Skip {
                path: path_buf,
                reason: SkipReason::Ignored,
            };
        }

        if self.direction == SyncDirection::FromRemote && self.options.keep_local.contains(path) {
            return SyncAction::Skip {
                path: path_buf,
                reason: SkipReason::KeptLocal,
            };
        }

        let source = self.source_root().join(path);
        if !source.is_file() {
            return SyncAction::Skip {
                path: path_buf,
                reason: SkipReason::NotFound,
            };
        }

        if self.direction == SyncDirection::ToRemote && !self.options.force {
            let outcome = self.secrets.scan_file(&source);
            if outcome.has_sensitive() {
                return SyncAction::Sensitive {
                    path: path_buf,
                    matches: outcome.matches,
                };
            }
        }

        let source_fingerprint = match Fingerprint::of_file(&source) {
            Ok(fingerprint) => fingerprint,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "source unreadable");
                return SyncAction::Skip {
                    path: path_buf,
                    reason: SkipReason::Unreadable,
                };
            }
        };

        let dest = self.dest_root().join(path);
        if !dest.exists() {
            return SyncAction::Add { path: path_buf };
        }

        match Fingerprint::of_file(&dest) {
            Ok(dest_fingerprint) if dest_fingerprint == source_fingerprint => {
                SyncAction::Unchanged { path: path_buf }
            }
            _ => SyncAction::Update { path: path_buf },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IgnoreMatcher;
    use std::fs;
    use tempfile::TempDir;

    fn layout(tmp: &TempDir) -> ToolLayout {
        let local_dir = tmp.path().join("local");
        let remote_dir = tmp.path().join("remote");
        fs::create_dir_all(&local_dir).unwrap();
        fs::create_dir_all(&remote_dir).unwrap();
        ToolLayout {
            tool: "demo".into(),
            local_dir,
            remote_dir,
            sync_paths: vec!["a.txt".into()],
            ignore: IgnoreMatcher::new(["*.log"]),
        }
    }

    #[test]
    fn test_resolve_order() {
        let tmp = TempDir::new().unwrap();
        let layout = layout(&tmp);
        let secrets = SecretScanner::new().unwrap();
        let options = SyncOptions::default();
        let resolver =
            SyncActionResolver::new(&layout, SyncDirection::ToRemote, &options, &secrets);

        fs::write(layout.local_dir.join("debug.log"), "password=supersecret1").unwrap();
        fs::write(layout.local_dir.join("new.txt"), "new").unwrap();
        fs::write(layout.local_dir.join("same.txt"), "same").unwrap();
        fs::write(layout.remote_dir.join("same.txt"), "same").unwrap();
        fs::write(layout.local_dir.join("changed.txt"), "v2").unwrap();
        fs::write(layout.remote_dir.join("changed.txt"), "v1").unwrap();

        assert_eq!(
            resolver.resolve(Path::new("debug.log")),
            SyncAction::Skip {
                path: "debug.log".into(),
                reason: SkipReason::Ignored
            }
        );
        assert_eq!(
            resolver.resolve(Path::new("missing.txt")),
            SyncAction::Skip {
                path: "missing.txt".into(),
                reason: SkipReason::NotFound
            }
        );
        assert_eq!(
            resolver.resolve(Path::new("new.txt")),
            SyncAction::Add {
                path: "new.txt".into()
            }
        );
        assert_eq!(
            resolver.resolve(Path::new("same.txt")),
            SyncAction::Unchanged {
                path: "same.txt".into()
            }
        );
        assert!(resolver.resolve(Path::new("changed.txt")).writes());
    }

    #[test]
    fn test_keep_local_only_applies_to_pull() {
        let tmp = TempDir::new().unwrap();
        let layout = layout(&tmp);
        let secrets = SecretScanner::new().unwrap();
        let mut options = SyncOptions::default();
        options.keep_local.insert("a.txt".into());

        fs::write(layout.local_dir.join("a.txt"), "local").unwrap();
        fs::write(layout.remote_dir.join("a.txt"), "remote").unwrap();

        let pull = SyncActionResolver::new(&layout, SyncDirection::FromRemote, &options, &secrets);
        let push = SyncActionResolver::new(&layout, SyncDirection::ToRemote, &options, &secrets);

        assert_eq!(
            pull.resolve(Path::new("a.txt")),
            SyncAction::Skip {
                path: "a.txt".into(),
                reason: SkipReason::KeptLocal
            }
        );
        assert_eq!(
            push.resolve(Path::new("a.txt")),
            SyncAction::Update {
                path: "a.txt".into()
            }
        );
    }

    #[test]
    fn test_pull_does_not_scan_for_secrets() {
        let tmp = TempDir::new().unwrap();
        let layout = layout(&tmp);
        let secrets = SecretScanner::new().unwrap();
        let options = SyncOptions::default();
        fs::write(layout.remote_dir.join("a.txt"), "password=supersecret1").unwrap();

        let pull = SyncActionResolver::new(&layout, SyncDirection::FromRemote, &options, &secrets);
        assert_eq!(pull.source_root(), layout.remote_dir.as_path());
        assert_eq!(
            pull.resolve(Path::new("a.txt")),
            SyncAction::Add {
                path: "a.txt".into()
            }
        );
    }
}
