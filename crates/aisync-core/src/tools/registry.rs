//! Tool registry storage

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{ToolDefinition, builtin_definitions};
use crate::config::ConfigValidator;
use crate::error::{Error, Result};

/// Outcome of loading custom definitions from a plugins directory
#[derive(Debug, Default)]
pub struct PluginLoadReport {
    /// Names of definitions that were registered
    pub loaded: Vec<String>,
    /// Files that were skipped, with the reason
    pub skipped: Vec<(PathBuf, String)>,
}

/// Lookup table of every known tool.
///
/// Built-in definitions are fixed; custom definitions may be added and removed.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    builtins: BTreeMap<String, ToolDefinition>,
    custom: BTreeMap<String, ToolDefinition>,
}

impl ToolRegistry {
    /// Create a registry holding only the built-in tools.
    #[must_use]
    pub fn with_builtins() -> Self {
        let builtins = builtin_definitions()
            .into_iter()
            .map(|def| (def.name.clone(), def))
            .collect();
        Self {
            builtins,
            custom: BTreeMap::new(),
        }
    }

    /// Register a custom definition, replacing an earlier custom one of the same name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservedToolName`] for a built-in name and
    /// [`Error::InvalidDefinition`] when validation fails.
    pub fn register(&mut self, def: ToolDefinition) -> Result<()> {
        if self.is_builtin(&def.name) {
            return Err(Error::ReservedToolName(def.name));
        }
        ConfigValidator::validate_definition(&def)?;
        debug!(tool = %def.name, "registered custom tool");
        self.custom.insert(def.name.clone(), def);
        Ok(())
    }

    /// Remove a custom definition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservedToolName`] for a built-in and
    /// [`Error::UnknownTool`] when nothing is registered under `name`.
    pub fn unregister(&mut self, name: &str) -> Result<ToolDefinition> {
        if self.is_builtin(name) {
            return Err(Error::ReservedToolName(name.to_string()));
        }
        self.custom
            .remove(name)
            .ok_or_else(|| Error::UnknownTool(name.to_string()))
    }

    /// Get a definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.builtins.get(name).or_else(|| self.custom.get(name))
    }

    /// Get a definition by name or fail with [`Error::UnknownTool`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTool`] when `name` is not registered.
    pub fn require(&self, name: &str) -> Result<&ToolDefinition> {
        self.get(name)
            .ok_or_else(|| Error::UnknownTool(name.to_string()))
    }

    /// Check if a tool is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Check if `name` belongs to a built-in tool.
    #[must_use]
    pub fn is_builtin(&self, name: &str) -> bool {
        self.builtins.contains_key(name)
    }

    /// All registered names (sorted).
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self
            .builtins
            .keys()
            .chain(self.custom.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }

    /// Iterate over all definitions, built-ins first.
    pub fn iter(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.builtins.values().chain(self.custom.values())
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.builtins.len() + self.custom.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register every `*.toml` definition found directly in `dir`.
    ///
    /// A missing directory loads nothing. Unreadable, invalid or
    /// colliding files are skipped and reported.
    pub fn load_plugins(&mut self, dir: &Path) -> PluginLoadReport {
        let mut report = PluginLoadReport::default();

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "no plugins directory");
                return report;
            }
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        files.sort();

        for path in files {
            match Self::read_plugin(&path).and_then(|def| {
                let name = def.name.clone();
                self.register(def).map(|()| name)
            }) {
                Ok(name) => report.loaded.push(name),
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "skipping plugin");
                    report.skipped.push((path, e.to_string()));
                }
            }
        }

        report
    }

    fn read_plugin(path: &Path) -> Result<ToolDefinition> {
        let content = fs::read_to_string(path).map_err(|e| Error::io("failed to read", path, e))?;
        toml::from_str(&content).map_err(|e| Error::parse(path, e))
    }

    /// Register a custom definition and persist it as `<dir>/<name>.toml`.
    ///
    /// # Errors
    ///
    /// Fails like [`register`](Self::register), or when the file cannot be written.
    pub fn install_plugin(&mut self, dir: &Path, def: ToolDefinition) -> Result<PathBuf> {
        if self.is_builtin(&def.name) {
            return Err(Error::ReservedToolName(def.name));
        }
        ConfigValidator::validate_definition(&def)?;

        let content = toml::to_string_pretty(&def)
            .map_err(|e| Error::InvalidDefinition(e.to_string()))?;
        fs::create_dir_all(dir).map_err(|e| Error::io("failed to create directory", dir, e))?;
        let path = dir.join(format!("{}.toml", def.name));
        fs::write(&path, content).map_err(|e| Error::io("failed to write", &path, e))?;

        self.register(def)?;
        Ok(path)
    }

    /// Unregister a custom definition and delete its plugin file.
    ///
    /// # Errors
    ///
    /// Fails like [`unregister`](Self::unregister), or when the file cannot be removed.
    pub fn remove_plugin(&mut self, dir: &Path, name: &str) -> Result<ToolDefinition> {
        let def = self.unregister(name)?;
        let path = dir.join(format!("{name}.toml"));
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::io("failed to remove", &path, e)),
        }
        Ok(def)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
