//! Tool definition record

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{IgnoreConfig, ToolMapping, expand_home};

/// Static description of a supported tool
///
/// Serialized as a TOML table when stored in the plugins directory:
///
/// ```toml
/// name = "aider"
/// display_name = "Aider"
/// binary_names = ["aider"]
/// config_directory = "~/.aider"
/// sync_paths = ["conf.yml", "prompts/"]
/// ignore_patterns = ["*.log"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Machine identifier (e.g. "claude")
    pub name: String,
    /// Human-readable name
    #[serde(default)]
    pub display_name: String,
    /// Executables that indicate the tool is installed
    #[serde(default)]
    pub binary_names: Vec<String>,
    /// Default configuration directory, may start with `~`
    pub config_directory: String,
    /// Files and directories (trailing `/`) inside the config directory to sync
    #[serde(default)]
    pub sync_paths: Vec<String>,
    /// Glob patterns always excluded for this tool
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    /// Environment variables whose presence indicates the tool is running
    #[serde(default)]
    pub env_vars: Vec<String>,
}

impl ToolDefinition {
    /// Display name, falling back to the machine name
    #[must_use]
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }

    /// Default configuration directory with `~` expanded
    #[must_use]
    pub fn default_config_directory(&self) -> PathBuf {
        expand_home(&self.config_directory)
    }

    /// Sync paths in effect: the mapping's list when non-empty, else ours
    #[must_use]
    pub fn effective_sync_paths<'a>(&'a self, mapping: Option<&'a ToolMapping>) -> &'a [String] {
        match mapping {
            Some(m) if !m.sync_paths.is_empty() => &m.sync_paths,
            _ => &self.sync_paths,
        }
    }

    /// Union of global, per-tool and definition-supplied ignore patterns
    #[must_use]
    pub fn ignore_patterns_with(&self, ignore: &IgnoreConfig) -> Vec<String> {
        let mut patterns = ignore.patterns_for(&self.name);
        patterns.extend(self.ignore_patterns.iter().cloned());
        patterns
    }
}
