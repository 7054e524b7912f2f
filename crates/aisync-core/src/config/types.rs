//! Configuration types and structures

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::paths::expand_home;

/// Sync direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncDirection {
    /// Local configuration directory to mirror
    ToRemote,
    /// Mirror to local configuration directory
    FromRemote,
}

impl fmt::Display for SyncDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ToRemote => f.write_str("to-remote"),
            Self::FromRemote => f.write_str("from-remote"),
        }
    }
}

/// Remote repository settings handed to the version-control collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Account owning the repository
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Repository name
    pub repository: String,
    /// Branch to push and pull
    pub branch: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            owner: None,
            repository: "aisync-config".to_string(),
            branch: "main".to_string(),
        }
    }
}

/// Identity of this machine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Stable device id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-readable device name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Snapshot retention
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupSettings {
    /// Snapshots kept per tool
    pub max_backups: usize,
}

impl Default for BackupSettings {
    fn default() -> Self {
        Self { max_backups: 10 }
    }
}

/// Watch-mode timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchSettings {
    /// Quiet interval before a burst of changes triggers a sync
    pub interval_secs: u64,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self { interval_secs: 5 }
    }
}

/// Application configuration (`config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote repository
    pub remote: RemoteConfig,
    /// This machine
    pub device: DeviceConfig,
    /// Backup retention
    pub backups: BackupSettings,
    /// Watch mode
    pub watch: WatchSettings,
    /// Whether initial setup has completed
    pub initialized: bool,
}

/// How a tool's binary was installed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallMethod {
    /// npm global install
    Npm,
    /// `go install`
    Go,
    /// Homebrew
    Brew,
    /// `cargo install`
    Cargo,
    /// pip / pipx
    Pip,
    /// Anything else found on `PATH`
    Binary,
}

impl InstallMethod {
    /// Guess the install method from a resolved binary path
    #[must_use]
    pub fn from_binary_path(path: &Path) -> Self {
        let path = path.to_string_lossy();
        if path.contains("node_modules") || path.contains("npm") {
            Self::Npm
        } else if path.contains("go/bin") || path.contains("gopath") {
            Self::Go
        } else if path.contains("homebrew") || path.contains("Cellar") {
            Self::Brew
        } else if path.contains(".cargo") {
            Self::Cargo
        } else if path.contains("pip") || path.contains("python") {
            Self::Pip
        } else {
            Self::Binary
        }
    }
}

/// Per-machine scan result for one tool (`mappings.json`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolMapping {
    /// A binary for the tool was found or the user marked it installed
    pub installed: bool,
    /// How the binary was installed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_method: Option<InstallMethod>,
    /// Resolved binary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary_path: Option<PathBuf>,
    /// Default configuration directory (may start with `~`)
    pub config_directory: String,
    /// User override of the configuration directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_config_directory: Option<String>,
    /// Whether the default directory existed when scanned
    pub config_dir_exists: bool,
    /// Sync paths overriding the tool definition's list when non-empty
    pub sync_paths: Vec<String>,
    /// Time of the last scan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_scanned: Option<DateTime<Utc>>,
}

impl ToolMapping {
    /// Directory actually used for the tool, with `~` expanded
    #[must_use]
    pub fn effective_config_directory(&self) -> PathBuf {
        let dir = self
            .custom_config_directory
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(&self.config_directory);
        expand_home(dir)
    }
}

/// All tool mappings keyed by tool name
pub type ToolMappings = BTreeMap<String, ToolMapping>;

/// Global and per-tool ignore lists (`ignore.toml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreConfig {
    /// Patterns applied to every tool
    #[serde(default)]
    pub global: Vec<String>,
    /// Patterns keyed by tool name
    #[serde(default, flatten)]
    pub tools: BTreeMap<String, Vec<String>>,
}

impl IgnoreConfig {
    /// Patterns configured for one tool (global first)
    #[must_use]
    pub fn patterns_for(&self, tool: &str) -> Vec<String> {
        let mut patterns = self.global.clone();
        if let Some(own) = self.tools.get(tool) {
            patterns.extend(own.iter().cloned());
        }
        patterns
    }
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        let global = [
            "**/*.token",
            "**/*secret*",
            "**/*credential*",
            "**/oauth_creds.json",
            "**/.env",
            "**/*.key",
            "**/*.pem",
        ]
        .map(String::from)
        .to_vec();

        let mut tools = BTreeMap::new();
        tools.insert("kiro".to_string(), vec!["kiro-auth-token.json".to_string()]);
        tools.insert("gemini".to_string(), vec!["oauth_creds.json".to_string()]);
        tools.insert("opencode".to_string(), Vec::new());
        tools.insert("claude".to_string(), Vec::new());

        Self { global, tools }
    }
}
