//! Shared fixtures for library tests

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::{AppPaths, ToolMapping};
use crate::context::SyncContext;
use crate::tools::ToolDefinition;

/// Name of the tool every fixture registers
pub const TOOL: &str = "demo";

/// Isolated application root with one installed tool
pub struct Fixture {
    /// Keeps the directory alive
    pub tmp: TempDir,
    /// Loaded context
    pub ctx: SyncContext,
    /// Local configuration directory of [`TOOL`]
    pub local: PathBuf,
    /// Mirror directory of [`TOOL`]
    pub remote: PathBuf,
}

impl Fixture {
    /// Fixture whose tool syncs `sync_paths` and ignores `*.log`
    pub fn new(sync_paths: &[&str]) -> Self {
        let tmp = TempDir::new().unwrap();
        let home = tmp.path().join("home");
        let local = tmp.path().join("local");
        fs::create_dir_all(&local).unwrap();

        let mut ctx = SyncContext::load(AppPaths::new(&home)).unwrap();
        ctx.registry_mut()
            .register(ToolDefinition {
                name: TOOL.into(),
                display_name: "Demo".into(),
                binary_names: vec![],
                config_directory: local.display().to_string(),
                sync_paths: sync_paths.iter().map(|s| (*s).to_string()).collect(),
                ignore_patterns: vec!["*.log".into()],
                env_vars: vec![],
            })
            .unwrap();
        ctx.state_mut()
            .update_mapping(
                TOOL,
                ToolMapping {
                    installed: true,
                    config_directory: local.display().to_string(),
                    config_dir_exists: true,
                    ..ToolMapping::default()
                },
            )
            .unwrap();

        let remote = ctx.paths().tool_mirror_dir(TOOL);
        Self {
            tmp,
            ctx,
            local,
            remote,
        }
    }

    /// Write a file below the local directory
    pub fn write_local(&self, rel: &str, content: &str) {
        write(&self.local.join(rel), content);
    }

    /// Write a file below the mirror directory
    pub fn write_remote(&self, rel: &str, content: &str) {
        write(&self.remote.join(rel), content);
    }

    /// Read a mirror file
    pub fn read_remote(&self, rel: &str) -> Option<String> {
        fs::read_to_string(self.remote.join(rel)).ok()
    }

    /// Read a local file
    pub fn read_local(&self, rel: &str) -> Option<String> {
        fs::read_to_string(self.local.join(rel)).ok()
    }
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Every file below `root` with its content, for before/after comparisons
pub fn snapshot(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    if !root.exists() {
        return Vec::new();
    }
    walkdir::WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| (e.path().to_path_buf(), fs::read(e.path()).unwrap()))
        .collect()
}
