//! File copy operations

use std::fs;
use std::path::Path;

use tracing::debug;

use super::actions::SyncAction;
use crate::error::{Error, Result};

/// Performs the writes an action calls for
pub struct FileOperationExecutor {
    dry_run: bool,
}

impl FileOperationExecutor {
    /// Create a new executor
    #[must_use]
    pub const fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Execute a sync action between two roots
    ///
    /// Only `Add` and `Update` write; everything else is a no-op, as is
    /// every action in dry-run mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the copy fails.
    pub fn execute(&self, action: &SyncAction, source_root: &Path, dest_root: &Path) -> Result<()> {
        if !action.writes() {
            return Ok(());
        }

        let rel = action.path();
        if self.dry_run {
            debug!(path = %rel.display(), "[dry run] would copy");
            return Ok(());
        }

        Self::copy_file(&source_root.join(rel), &dest_root.join(rel))
    }

    /// Copy one file, creating parent directories and overwriting the destination
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the copy fails.
    pub fn copy_file(source: &Path, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::io("failed to create directory", parent, e))?;
        }

        fs::copy(source, dest).map_err(|e| Error::io("failed to copy to", dest, e))?;
        Ok(())
    }

    /// Copy directory recursively
    ///
    /// # Errors
    ///
    /// Returns an error if directory operations fail.
    pub fn copy_directory(source: &Path, dest: &Path) -> Result<()> {
        fs::create_dir_all(dest).map_err(|e| Error::io("failed to create directory", dest, e))?;
        Self::copy_directory_contents(source, dest)
    }

    fn copy_directory_contents(source: &Path, dest: &Path) -> Result<()> {
        let entries =
            fs::read_dir(source).map_err(|e| Error::io("failed to read directory", source, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| Error::io("failed to read entry in", source, e))?;
            let path = entry.path();
            let dest_path = dest.join(entry.file_name());

            if path.is_dir() {
                Self::copy_directory(&path, &dest_path)?;
            } else if path.is_file() {
                Self::copy_file(&path, &dest_path)?;
            }
        }

        Ok(())
    }
}
