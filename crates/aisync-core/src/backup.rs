//! Snapshot backups of a tool's local configuration directory
//!
//! Each snapshot is a full copy stored under `backups/<tool>/<id>/` with a
//! `.backup-meta.json` record next to the copied files. Snapshot ids start
//! with a UTC timestamp so they sort chronologically.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::context::SyncContext;
use crate::error::{Error, Result};
use crate::sync::FileOperationExecutor;

/// Metadata file stored inside every snapshot
pub const META_FILE: &str = ".backup-meta.json";

/// Why a snapshot was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackupReason {
    /// Requested by the user
    Manual,
    /// Before a `from-remote` sync
    PrePull,
    /// Before restoring another snapshot
    PreRestore,
    /// Before rolling the mirror back to an earlier revision
    PreRollback,
}

impl BackupReason {
    /// Stable identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::PrePull => "pre-pull",
            Self::PreRestore => "pre-restore",
            Self::PreRollback => "pre-rollback",
        }
    }
}

impl fmt::Display for BackupReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRecord {
    /// Tool name
    pub tool: String,
    /// Why it was taken
    pub reason: BackupReason,
    /// Snapshot id (directory name)
    pub id: String,
    /// When it was taken
    pub timestamp: DateTime<Utc>,
    /// Directory that was copied
    pub source_directory: PathBuf,
    /// Where the snapshot lives
    #[serde(skip)]
    pub path: PathBuf,
}

/// Result of restoring a snapshot
#[derive(Debug, Clone)]
pub struct RestoreOutcome {
    /// Snapshot that was restored
    pub restored: BackupRecord,
    /// Snapshot of the directory as it was before the restore
    pub safety: Option<BackupRecord>,
}

/// Creates, lists, restores and prunes snapshots
pub struct BackupManager<'a> {
    ctx: &'a SyncContext,
}

impl<'a> BackupManager<'a> {
    /// Create a manager over `ctx`
    #[must_use]
    pub const fn new(ctx: &'a SyncContext) -> Self {
        Self { ctx }
    }

    /// Snapshot the tool's local directory, then prune to the configured cap
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTool`] or [`Error::ConfigDirNotFound`] when
    /// there is nothing to copy, or an I/O error if the copy fails.
    pub fn create(&self, tool: &str, reason: BackupReason) -> Result<BackupRecord> {
        let record = self.snapshot(tool, reason)?;
        self.prune(tool, self.ctx.state().config().backups.max_backups)?;
        Ok(record)
    }

    /// Snapshots, newest first; all tools when `tool` is `None`
    ///
    /// Directories without readable metadata are left out.
    ///
    /// # Errors
    ///
    /// Returns an error if a backups directory exists but cannot be read.
    pub fn list(&self, tool: Option<&str>) -> Result<Vec<BackupRecord>> {
        let root = self.ctx.paths().backups_dir();
        let tools = match tool {
            Some(tool) => vec![tool.to_string()],
            None => subdirectories(&root)?
                .into_iter()
                .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
                .collect(),
        };

        let mut records = Vec::new();
        for tool in tools {
            for dir in subdirectories(&root.join(&tool))? {
                match read_meta(&dir) {
                    Ok(record) => records.push(record),
                    Err(e) => debug!(dir = %dir.display(), error = %e, "not a snapshot"),
                }
            }
        }

        records.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records)
    }

    /// Replace the tool's local directory with a snapshot
    ///
    /// The current directory is snapshotted first (`pre-restore`), then
    /// deleted and replaced by a copy of the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackupNotFound`] if the snapshot does not exist, or
    /// an I/O error if any step fails.
    pub fn restore(&self, tool: &str, id: &str) -> Result<RestoreOutcome> {
        let restored = self.find(tool, id)?;
        let local_dir = self.local_dir(tool)?;

        let safety = if local_dir.is_dir() {
            Some(self.snapshot(tool, BackupReason::PreRestore)?)
        } else {
            None
        };

        if local_dir.exists() {
            fs::remove_dir_all(&local_dir)
                .map_err(|e| Error::io("failed to remove", &local_dir, e))?;
        }
        FileOperationExecutor::copy_directory(&restored.path, &local_dir)?;

        let meta = local_dir.join(META_FILE);
        if meta.exists() {
            fs::remove_file(&meta).map_err(|e| Error::io("failed to remove", &meta, e))?;
        }

        self.prune(tool, self.ctx.state().config().backups.max_backups)?;
        info!(tool, id, "restored backup");

        Ok(RestoreOutcome { restored, safety })
    }

    /// Delete all but the `keep` newest snapshots of a tool
    ///
    /// # Errors
    ///
    /// Returns an error if a snapshot cannot be removed.
    pub fn prune(&self, tool: &str, keep: usize) -> Result<usize> {
        let records = self.list(Some(tool))?;
        let mut removed = 0;

        for record in records.iter().skip(keep) {
            fs::remove_dir_all(&record.path)
                .map_err(|e| Error::io("failed to remove", &record.path, e))?;
            removed += 1;
        }

        if removed > 0 {
            debug!(tool, removed, keep, "pruned backups");
        }
        Ok(removed)
    }

    /// Delete one snapshot
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackupNotFound`] if it does not exist.
    pub fn delete(&self, tool: &str, id: &str) -> Result<()> {
        let record = self.find(tool, id)?;
        fs::remove_dir_all(&record.path).map_err(|e| Error::io("failed to remove", &record.path, e))
    }

    fn find(&self, tool: &str, id: &str) -> Result<BackupRecord> {
        let not_found = || Error::BackupNotFound {
            tool: tool.to_string(),
            id: id.to_string(),
        };
        if id.is_empty() || id.contains(['/', '\\']) || id == "." || id == ".." {
            return Err(not_found());
        }

        let dir = self.ctx.paths().backups_dir().join(tool).join(id);
        if !dir.is_dir() {
            return Err(not_found());
        }
        read_meta(&dir).map_err(|_| not_found())
    }

    fn local_dir(&self, tool: &str) -> Result<PathBuf> {
        self.ctx
            .layout(tool)
            .map(|layout| layout.local_dir)
            .ok_or_else(|| Error::UnknownTool(tool.to_string()))
    }

    fn snapshot(&self, tool: &str, reason: BackupReason) -> Result<BackupRecord> {
        let source = self.local_dir(tool)?;
        if !source.is_dir() {
            return Err(Error::ConfigDirNotFound {
                tool: tool.to_string(),
                path: source,
            });
        }

        let timestamp = Utc::now();
        let tool_dir = self.ctx.paths().backups_dir().join(tool);
        let base = format!("{}_{}", timestamp.format("%Y%m%dT%H%M%S%3fZ"), reason);
        let mut id = base.clone();
        let mut suffix = 1;
        while tool_dir.join(&id).exists() {
            id = format!("{base}-{suffix}");
            suffix += 1;
        }

        let path = tool_dir.join(&id);
        FileOperationExecutor::copy_directory(&source, &path)?;

        let record = BackupRecord {
            tool: tool.to_string(),
            reason,
            id,
            timestamp,
            source_directory: source,
            path,
        };
        write_meta(&record)?;

        info!(tool, id = %record.id, %reason, "created backup");
        Ok(record)
    }
}

fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::io("failed to read directory", dir, e)),
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

fn read_meta(dir: &Path) -> Result<BackupRecord> {
    let meta = dir.join(META_FILE);
    let content = fs::read_to_string(&meta).map_err(|e| Error::io("failed to read", &meta, e))?;
    let mut record: BackupRecord =
        serde_json::from_str(&content).map_err(|e| Error::parse(&meta, e))?;
    record.path = dir.to_path_buf();
    Ok(record)
}

fn write_meta(record: &BackupRecord) -> Result<()> {
    let meta = record.path.join(META_FILE);
    let json = serde_json::to_string_pretty(record).map_err(|e| Error::parse(&meta, e))?;
    fs::write(&meta, json + "\n").map_err(|e| Error::io("failed to write", &meta, e))
}
