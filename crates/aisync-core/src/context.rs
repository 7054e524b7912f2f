//! Process-scoped context shared by every operation

use std::path::PathBuf;

use crate::config::{AppPaths, IgnoreMatcher, StateCache};
use crate::error::Result;
use crate::security::SecretScanner;
use crate::tools::{PluginLoadReport, ToolRegistry};

/// Everything an operation needs, built once at startup
///
/// Holds the tool registry, the cached persisted state and the compiled
/// secret scanner. Operations borrow it; nothing here is global.
#[derive(Debug, Clone)]
pub struct SyncContext {
    registry: ToolRegistry,
    state: StateCache,
    secrets: SecretScanner,
}

/// Resolved locations and rules for one tool
#[derive(Debug, Clone)]
pub struct ToolLayout {
    /// Tool name
    pub tool: String,
    /// Effective local configuration directory
    pub local_dir: PathBuf,
    /// Mirror directory for the tool
    pub remote_dir: PathBuf,
    /// Effective sync paths
    pub sync_paths: Vec<String>,
    /// Union of global, per-tool and definition ignore patterns
    pub ignore: IgnoreMatcher,
}

impl SyncContext {
    /// Load persisted state and custom tool definitions from `paths`
    ///
    /// Invalid plugin files are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if persisted state cannot be parsed or a built-in
    /// secret pattern fails to compile.
    pub fn load(paths: AppPaths) -> Result<Self> {
        let mut registry = ToolRegistry::with_builtins();
        let report = registry.load_plugins(&paths.plugins_dir());
        if !report.loaded.is_empty() {
            tracing::debug!(plugins = ?report.loaded, "loaded custom tools");
        }
        let state = StateCache::load(paths)?;
        Self::from_parts(registry, state)
    }

    /// Assemble a context from already-loaded parts
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in secret pattern fails to compile.
    pub fn from_parts(registry: ToolRegistry, state: StateCache) -> Result<Self> {
        Ok(Self {
            registry,
            state,
            secrets: SecretScanner::new()?,
        })
    }

    /// Application paths
    #[must_use]
    pub const fn paths(&self) -> &AppPaths {
        self.state.paths()
    }

    /// Tool registry
    #[must_use]
    pub const fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Mutable tool registry
    pub fn registry_mut(&mut self) -> &mut ToolRegistry {
        &mut self.registry
    }

    /// Cached persisted state
    #[must_use]
    pub const fn state(&self) -> &StateCache {
        &self.state
    }

    /// Mutable cached persisted state
    pub fn state_mut(&mut self) -> &mut StateCache {
        &mut self.state
    }

    /// Compiled secret scanner
    #[must_use]
    pub const fn secrets(&self) -> &SecretScanner {
        &self.secrets
    }

    /// Re-read persisted state and plugins from disk
    ///
    /// # Errors
    ///
    /// Returns an error if persisted state cannot be parsed.
    pub fn reload(&mut self) -> Result<PluginLoadReport> {
        self.state.invalidate()?;
        let mut registry = ToolRegistry::with_builtins();
        let report = registry.load_plugins(&self.paths().plugins_dir());
        self.registry = registry;
        Ok(report)
    }

    /// Resolve directories, sync paths and ignore rules for `tool`
    ///
    /// Returns `None` when the tool is neither registered nor mapped.
    #[must_use]
    pub fn layout(&self, tool: &str) -> Option<ToolLayout> {
        let definition = self.registry.get(tool);
        let mapping = self.state.mapping(tool);

        let (local_dir, sync_paths, patterns) = match (definition, mapping) {
            (Some(def), mapping) => (
                mapping.map_or_else(
                    || def.default_config_directory(),
                    |m| {
                        if m.config_directory.is_empty() && m.custom_config_directory.is_none() {
                            def.default_config_directory()
                        } else {
                            m.effective_config_directory()
                        }
                    },
                ),
                def.effective_sync_paths(mapping).to_vec(),
                def.ignore_patterns_with(self.state.ignore()),
            ),
            (None, Some(m)) => (
                m.effective_config_directory(),
                m.sync_paths.clone(),
                self.state.ignore().patterns_for(tool),
            ),
            (None, None) => return None,
        };

        Some(ToolLayout {
            tool: tool.to_string(),
            local_dir,
            remote_dir: self.paths().tool_mirror_dir(tool),
            sync_paths,
            ignore: IgnoreMatcher::new(&patterns),
        })
    }
}
