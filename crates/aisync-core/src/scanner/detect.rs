//! Installed-tool detection
//!
//! A tool counts as installed when one of its binaries resolves on `PATH`.
//! Scanning refreshes the persisted mappings but keeps what the user set by
//! hand (a custom config directory, a sync-path override).

use std::path::PathBuf;

use chrono::Utc;
use tracing::debug;

use crate::config::{InstallMethod, ToolMapping, ToolMappings};
use crate::tools::{ToolDefinition, ToolRegistry};

/// Detection result for one tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedTool {
    /// Tool name
    pub name: String,
    /// First binary found on `PATH`
    pub binary_path: Option<PathBuf>,
    /// Install method guessed from the binary location
    pub install_method: Option<InstallMethod>,
    /// Whether the default config directory exists
    pub config_dir_exists: bool,
}

impl DetectedTool {
    /// Whether a binary was found
    #[must_use]
    pub const fn installed(&self) -> bool {
        self.binary_path.is_some()
    }
}

/// Tool that appears to be running the current process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvDetection {
    /// Tool name
    pub tool: String,
    /// Environment variable that gave it away
    pub env_var: String,
}

/// Scans the registry's tools against the local machine
pub struct ToolScanner<'a> {
    registry: &'a ToolRegistry,
    resolve: Box<dyn Fn(&str) -> Option<PathBuf> + 'a>,
}

impl<'a> ToolScanner<'a> {
    /// Scanner resolving binaries on `PATH`
    #[must_use]
    pub fn new(registry: &'a ToolRegistry) -> Self {
        Self::with_resolver(registry, |bin| which::which(bin).ok())
    }

    /// Scanner with a custom binary resolver
    pub fn with_resolver(
        registry: &'a ToolRegistry,
        resolve: impl Fn(&str) -> Option<PathBuf> + 'a,
    ) -> Self {
        Self {
            registry,
            resolve: Box::new(resolve),
        }
    }

    /// Detect a single tool
    #[must_use]
    pub fn detect(&self, def: &ToolDefinition) -> DetectedTool {
        let binary_path = def
            .binary_names
            .iter()
            .find_map(|bin| (self.resolve)(bin.as_str()));
        let install_method = binary_path.as_deref().map(InstallMethod::from_binary_path);
        let config_dir_exists = def.default_config_directory().is_dir();

        debug!(
            tool = %def.name,
            binary = ?binary_path,
            config_dir_exists,
            "scanned tool"
        );

        DetectedTool {
            name: def.name.clone(),
            binary_path,
            install_method,
            config_dir_exists,
        }
    }

    /// Detect every registered tool
    #[must_use]
    pub fn scan_all(&self) -> Vec<DetectedTool> {
        self.registry.iter().map(|def| self.detect(def)).collect()
    }

    /// Merge fresh detection results into existing mappings
    ///
    /// Mappings of tools no longer in the registry are kept unchanged.
    #[must_use]
    pub fn refresh(&self, existing: &ToolMappings) -> ToolMappings {
        let now = Utc::now();
        let mut mappings = existing.clone();

        for def in self.registry.iter() {
            let detected = self.detect(def);
            let previous = existing.get(&def.name).cloned().unwrap_or_default();

            mappings.insert(
                def.name.clone(),
                ToolMapping {
                    installed: detected.installed(),
                    install_method: detected.install_method,
                    binary_path: detected.binary_path,
                    config_directory: def.config_directory.clone(),
                    custom_config_directory: previous.custom_config_directory,
                    config_dir_exists: detected.config_dir_exists,
                    sync_paths: previous.sync_paths,
                    last_scanned: Some(now),
                },
            );
        }

        mappings
    }
}

/// Find the tool whose environment variables are set, in registry order
pub fn detect_current_tool(
    registry: &ToolRegistry,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<EnvDetection> {
    registry.iter().find_map(|def| {
        def.env_vars
            .iter()
            .find(|var| lookup(var.as_str()).is_some_and(|value| !value.is_empty()))
            .map(|var| EnvDetection {
                tool: def.name.clone(),
                env_var: var.clone(),
            })
    })
}
