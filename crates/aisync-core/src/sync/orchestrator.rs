//! Sync orchestration - coordinates the sync workflow

use std::fs;

use tracing::{debug, info, warn};

use super::actions::{SyncAction, SyncActionResolver};
use super::executor::FileOperationExecutor;
use super::{ComparisonResult, SkipReason, SyncOptions, SyncReport};
use crate::backup::{BackupManager, BackupReason};
use crate::config::SyncDirection;
use crate::context::{SyncContext, ToolLayout};
use crate::error::{Error, Result};
use crate::scanner::TreeScanner;

/// Main sync engine
pub struct SyncEngine<'a> {
    ctx: &'a SyncContext,
}

impl<'a> SyncEngine<'a> {
    /// Create an engine over `ctx`
    #[must_use]
    pub const fn new(ctx: &'a SyncContext) -> Self {
        Self { ctx }
    }

    /// Synchronize one tool in one direction
    ///
    /// Per-file problems end up in the report (`skipped` or `warnings`);
    /// only unmet preconditions abort the run.
    ///
    /// # Errors
    ///
    /// - [`Error::ToolNotInstalled`] if the tool has no installed mapping
    /// - [`Error::ConfigDirNotFound`] if pushing and the local directory is missing
    /// - [`Error::RepoNotFound`] if pulling and the mirror directory is missing
    pub fn sync(
        &self,
        tool: &str,
        direction: SyncDirection,
        options: &SyncOptions,
    ) -> Result<SyncReport> {
        let layout = self.preflight(tool, direction)?;
        let mut warnings = Vec::new();

        if direction == SyncDirection::ToRemote && options.force {
            warn!(tool, "secret scanning disabled for this run");
        }

        let backup = if direction == SyncDirection::FromRemote {
            self.backup_before_pull(&layout, options, &mut warnings)
        } else {
            None
        };

        let resolver = SyncActionResolver::new(&layout, direction, options, self.ctx.secrets());
        let executor = FileOperationExecutor::new(options.dry_run);
        let source_root = resolver.source_root();
        let dest_root = resolver.dest_root();

        if !options.dry_run {
            if let Err(e) = fs::create_dir_all(dest_root) {
                warnings.push(format!(
                    "failed to create {}: {e}",
                    dest_root.display()
                ));
            }
        }

        let scan = TreeScanner::new(&layout.sync_paths).scan(source_root);
        warnings.extend(scan.warnings);

        let mut comparison = ComparisonResult::default();
        for path in scan.missing {
            debug!(tool, path = %path.display(), "sync path not found");
            comparison.record(SyncAction::Skip {
                path,
                reason: SkipReason::NotFound,
            });
        }
        for path in scan.unreadable {
            warn!(tool, path = %path.display(), "unreadable entry skipped");
            comparison.record(SyncAction::Skip {
                path,
                reason: SkipReason::Unreadable,
            });
        }

        for path in &scan.files {
            let action = resolver.resolve(path);
            debug!(tool, path = %path.display(), action = ?action, "classified");

            let action = match executor.execute(&action, source_root, dest_root) {
                Ok(()) => action,
                Err(e) => {
                    warn!(tool, error = %e, "copy failed");
                    warnings.push(e.to_string());
                    SyncAction::Skip {
                        path: path.clone(),
                        reason: SkipReason::WriteFailed,
                    }
                }
            };
            comparison.record(action);
        }

        info!(
            tool,
            %direction,
            dry_run = options.dry_run,
            added = comparison.added.len(),
            modified = comparison.modified.len(),
            skipped = comparison.skipped.len(),
            sensitive = comparison.sensitive.len(),
            "sync finished"
        );

        Ok(SyncReport {
            tool: tool.to_string(),
            direction,
            dry_run: options.dry_run,
            comparison,
            backup,
            warnings,
        })
    }

    fn preflight(&self, tool: &str, direction: SyncDirection) -> Result<ToolLayout> {
        let installed = self
            .ctx
            .state()
            .mapping(tool)
            .is_some_and(|m| m.installed);
        let layout = self
            .ctx
            .layout(tool)
            .filter(|_| installed)
            .ok_or_else(|| Error::ToolNotInstalled(tool.to_string()))?;

        match direction {
            SyncDirection::ToRemote if !layout.local_dir.is_dir() => {
                Err(Error::ConfigDirNotFound {
                    tool: tool.to_string(),
                    path: layout.local_dir,
                })
            }
            SyncDirection::FromRemote if !layout.remote_dir.is_dir() => Err(Error::RepoNotFound {
                tool: tool.to_string(),
                path: layout.remote_dir,
            }),
            _ => Ok(layout),
        }
    }

    /// Snapshot the local directory; a failed snapshot is reported, not fatal
    fn backup_before_pull(
        &self,
        layout: &ToolLayout,
        options: &SyncOptions,
        warnings: &mut Vec<String>,
    ) -> Option<crate::backup::BackupRecord> {
        let wanted = options.backup_before_pull || options.require_backup;
        if !wanted || options.dry_run || !layout.local_dir.is_dir() {
            return None;
        }

        match BackupManager::new(self.ctx).create(&layout.tool, BackupReason::PrePull) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(tool = %layout.tool, error = %e, "pre-pull backup failed, continuing");
                warnings.push(format!("pre-pull backup failed: {e}"));
                None
            }
        }
    }
}
