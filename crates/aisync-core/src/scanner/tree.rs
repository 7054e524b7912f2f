//! Sync-path resolution and recursive file enumeration

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// One entry found while walking a directory
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FileEntry {
    /// Path relative to the walked root
    pub relative_path: PathBuf,
    /// Whether the entry is a directory
    pub is_directory: bool,
}

/// Files covered by a set of sync paths under one root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeScan {
    /// Files relative to the root, sorted and unique
    pub files: Vec<PathBuf>,
    /// Sync paths that do not exist under the root
    pub missing: Vec<PathBuf>,
    /// Entries below a sync path that could not be read, relative to the root
    pub unreadable: Vec<PathBuf>,
    /// Why each unreadable entry or directory was passed over
    pub warnings: Vec<String>,
}

/// Result of walking one directory
///
/// Entries that fail to read are collected instead of ending the walk.
#[derive(Debug, Default)]
pub struct DirListing {
    /// Readable entries, sorted by path
    pub entries: Vec<FileEntry>,
    /// Entries that could not be read, relative to the walked root
    pub errors: Vec<(PathBuf, Error)>,
}

/// Resolves sync paths against a root directory
#[derive(Debug, Clone)]
pub struct TreeScanner {
    sync_paths: Vec<PathBuf>,
}

impl TreeScanner {
    /// Create a scanner for the given sync paths
    ///
    /// A trailing `/` only documents intent; whether a path is a file or a
    /// directory is decided by what exists on disk.
    #[must_use]
    pub fn new<S: AsRef<str>>(sync_paths: &[S]) -> Self {
        let sync_paths = sync_paths
            .iter()
            .map(|p| PathBuf::from(p.as_ref().trim_end_matches('/')))
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        Self { sync_paths }
    }

    /// Enumerate every file the sync paths cover under `root`
    #[must_use]
    pub fn scan(&self, root: &Path) -> TreeScan {
        let mut files = BTreeSet::new();
        let mut missing = Vec::new();
        let mut unreadable = BTreeSet::new();
        let mut warnings = Vec::new();

        for sync_path in &self.sync_paths {
            let full = root.join(sync_path);
            if full.is_dir() {
                match list_entries(&full) {
                    Ok(listing) => {
                        files.extend(
                            listing
                                .entries
                                .into_iter()
                                .filter(|e| !e.is_directory)
                                .map(|e| sync_path.join(e.relative_path)),
                        );
                        for (path, e) in listing.errors {
                            tracing::debug!(path = %path.display(), error = %e, "unreadable entry");
                            if unreadable.insert(sync_path.join(path)) {
                                warnings.push(e.to_string());
                            }
                        }
                    }
                    Err(e) => warnings.push(e.to_string()),
                }
            } else if full.is_file() {
                files.insert(sync_path.clone());
            } else {
                missing.push(sync_path.clone());
            }
        }

        TreeScan {
            files: files.into_iter().collect(),
            missing,
            unreadable: unreadable.into_iter().collect(),
            warnings,
        }
    }
}

/// Recursively list a directory, following symlinks, sorted by path
///
/// A dangling symlink, a symlink loop or an unreadable subdirectory is
/// recorded in [`DirListing::errors`] and the walk carries on.
///
/// # Errors
///
/// Returns an error if `root` itself cannot be read.
pub fn list_entries(root: &Path) -> Result<DirListing> {
    let mut listing = DirListing::default();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let depth = e.depth();
                let path = e.path().unwrap_or(root).to_path_buf();
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("symlink loop"));
                let err = Error::io("failed to walk", &path, source);
                if depth == 0 {
                    return Err(err);
                }
                let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
                listing.errors.push((relative, err));
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }

        let relative_path = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| Error::parse(entry.path(), e))?
            .to_path_buf();

        listing.entries.push(FileEntry {
            relative_path,
            is_directory: entry.file_type().is_dir(),
        });
    }

    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tool_dir() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("settings.json"), "{}").unwrap();
        fs::create_dir_all(root.join("rules/nested")).unwrap();
        fs::write(root.join("rules/a.md"), "a").unwrap();
        fs::write(root.join("rules/nested/b.md"), "b").unwrap();
        fs::write(root.join("unrelated.txt"), "x").unwrap();
        tmp
    }

    #[test]
    fn test_scan_files_and_directories() {
        let tmp = tool_dir();
        let scan = TreeScanner::new(&["settings.json", "rules/"]).scan(tmp.path());

        assert_eq!(
            scan.files,
            vec![
                PathBuf::from("rules/a.md"),
                PathBuf::from("rules/nested/b.md"),
                PathBuf::from("settings.json"),
            ]
        );
        assert!(scan.missing.is_empty());
        assert!(scan.warnings.is_empty());
    }

    #[test]
    fn test_scan_reports_missing_sync_paths() {
        let tmp = tool_dir();
        let scan = TreeScanner::new(&["keybindings.json", "prompts/"]).scan(tmp.path());

        assert!(scan.files.is_empty());
        assert_eq!(
            scan.missing,
            vec![PathBuf::from("keybindings.json"), PathBuf::from("prompts")]
        );
    }

    #[test]
    fn test_overlapping_sync_paths_deduplicated() {
        let tmp = tool_dir();
        let scan = TreeScanner::new(&["rules/", "rules/a.md"]).scan(tmp.path());

        assert_eq!(scan.files.len(), 2);
    }

    #[test]
    fn test_list_entries_relative_and_sorted() {
        let tmp = tool_dir();
        let listing = list_entries(&tmp.path().join("rules")).unwrap();

        assert!(listing.errors.is_empty());
        assert_eq!(
            listing.entries,
            vec![
                FileEntry {
                    relative_path: PathBuf::from("a.md"),
                    is_directory: false
                },
                FileEntry {
                    relative_path: PathBuf::from("nested"),
                    is_directory: true
                },
                FileEntry {
                    relative_path: PathBuf::from("nested/b.md"),
                    is_directory: false
                },
            ]
        );
    }

    #[test]
    fn test_list_entries_missing_root() {
        let tmp = TempDir::new().unwrap();
        let err = list_entries(&tmp.path().join("absent")).unwrap_err();
        assert_eq!(err.code(), "io_error");
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_does_not_hide_siblings() {
        let tmp = TempDir::new().unwrap();
        let rules = tmp.path().join("rules");
        fs::create_dir_all(&rules).unwrap();
        fs::write(rules.join("a.md"), "a").unwrap();
        fs::write(rules.join("b.md"), "b").unwrap();
        std::os::unix::fs::symlink(tmp.path().join("gone.md"), rules.join("broken.md")).unwrap();

        let scan = TreeScanner::new(&["rules/"]).scan(tmp.path());

        assert_eq!(
            scan.files,
            vec![PathBuf::from("rules/a.md"), PathBuf::from("rules/b.md")]
        );
        assert_eq!(scan.unreadable, vec![PathBuf::from("rules/broken.md")]);
        assert_eq!(scan.warnings.len(), 1);
        assert!(scan.missing.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_recorded_and_walk_continues() {
        let tmp = TempDir::new().unwrap();
        let rules = tmp.path().join("rules");
        fs::create_dir_all(&rules).unwrap();
        fs::write(rules.join("a.md"), "a").unwrap();
        std::os::unix::fs::symlink(&rules, rules.join("loop")).unwrap();

        let listing = list_entries(&rules).unwrap();

        assert_eq!(
            listing.entries,
            vec![FileEntry {
                relative_path: PathBuf::from("a.md"),
                is_directory: false
            }]
        );
        assert_eq!(listing.errors.len(), 1);
        assert_eq!(listing.errors[0].0, PathBuf::from("loop"));
    }
}
