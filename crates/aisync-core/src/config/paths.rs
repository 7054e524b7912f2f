//! Application directory layout

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable overriding the application root directory
pub const HOME_ENV: &str = "AISYNC_HOME";

/// Locations of every file and directory the application owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    root: PathBuf,
}

impl AppPaths {
    /// Use an explicit root directory
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Discover the root directory
    ///
    /// Precedence: explicit override, then `$AISYNC_HOME`, then
    /// `<config dir>/aisync`.
    ///
    /// # Errors
    ///
    /// Returns an error if no config directory can be determined for the
    /// current user.
    pub fn discover(override_root: Option<&Path>) -> Result<Self> {
        if let Some(root) = override_root {
            return Ok(Self::new(expand_home(&root.to_string_lossy())));
        }

        if let Some(root) = env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::new(PathBuf::from(root)));
        }

        let config_dir = dirs::config_dir().ok_or_else(|| {
            Error::InvalidConfig("cannot determine the user configuration directory".into())
        })?;
        Ok(Self::new(config_dir.join("aisync")))
    }

    /// Root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Application config file
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Per-tool scan results
    #[must_use]
    pub fn mappings_file(&self) -> PathBuf {
        self.root.join("mappings.json")
    }

    /// Global and per-tool ignore lists
    #[must_use]
    pub fn ignore_file(&self) -> PathBuf {
        self.root.join("ignore.toml")
    }

    /// Custom tool definitions
    #[must_use]
    pub fn plugins_dir(&self) -> PathBuf {
        self.root.join("plugins")
    }

    /// Snapshot backups, one sub-directory per tool
    #[must_use]
    pub fn backups_dir(&self) -> PathBuf {
        self.root.join("backups")
    }

    /// Mirror directory that is versioned and transported externally
    #[must_use]
    pub fn mirror_dir(&self) -> PathBuf {
        self.root.join("repo")
    }

    /// Mirror directory of a single tool
    #[must_use]
    pub fn tool_mirror_dir(&self, tool: &str) -> PathBuf {
        self.mirror_dir().join(tool)
    }
}

/// Expand a leading `~` to the user's home directory
#[must_use]
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
