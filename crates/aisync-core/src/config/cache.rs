//! In-memory cache of persisted state
//!
//! The config, tool mappings and ignore lists are read once when the cache
//! is loaded and served from memory afterwards. `invalidate` re-reads all
//! three from disk; the `save_*` operations write through.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::paths::AppPaths;
use super::types::{AppConfig, IgnoreConfig, ToolMapping, ToolMappings};
use super::validation::ConfigValidator;
use crate::error::{Error, Result};

/// Cached application state
#[derive(Debug, Clone)]
pub struct StateCache {
    paths: AppPaths,
    config: AppConfig,
    mappings: ToolMappings,
    ignore: IgnoreConfig,
}

impl StateCache {
    /// Load all persisted state, falling back to defaults for missing files
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be read or parsed, or
    /// if the configuration is invalid.
    pub fn load(paths: AppPaths) -> Result<Self> {
        let config: AppConfig = read_toml(&paths.config_file())?.unwrap_or_default();
        ConfigValidator::validate(&config)?;

        let mappings: ToolMappings = read_json(&paths.mappings_file())?.unwrap_or_default();
        validate_mappings(&mappings)?;
        let ignore: IgnoreConfig = read_toml(&paths.ignore_file())?.unwrap_or_default();

        tracing::debug!(
            root = %paths.root().display(),
            tools = mappings.len(),
            "loaded persisted state"
        );

        Ok(Self {
            paths,
            config,
            mappings,
            ignore,
        })
    }

    /// Drop everything cached and re-read it from disk
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`StateCache::load`];
    /// the cache is left untouched in that case.
    pub fn invalidate(&mut self) -> Result<()> {
        *self = Self::load(self.paths.clone())?;
        Ok(())
    }

    /// Application paths the cache was loaded from
    #[must_use]
    pub const fn paths(&self) -> &AppPaths {
        &self.paths
    }

    /// Application configuration
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// All tool mappings
    #[must_use]
    pub const fn mappings(&self) -> &ToolMappings {
        &self.mappings
    }

    /// Mapping of a single tool
    #[must_use]
    pub fn mapping(&self, tool: &str) -> Option<&ToolMapping> {
        self.mappings.get(tool)
    }

    /// Ignore lists
    #[must_use]
    pub const fn ignore(&self) -> &IgnoreConfig {
        &self.ignore
    }

    /// Names of tools marked installed, sorted
    #[must_use]
    pub fn installed_tools(&self) -> Vec<String> {
        self.mappings
            .iter()
            .filter(|(_, m)| m.installed)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Replace and persist the application configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or cannot be written.
    pub fn save_config(&mut self, config: AppConfig) -> Result<()> {
        ConfigValidator::validate(&config)?;
        write_file(&self.paths.config_file(), &to_toml(&self.paths.config_file(), &config)?)?;
        self.config = config;
        Ok(())
    }

    /// Replace and persist all tool mappings
    ///
    /// # Errors
    ///
    /// Returns an error if a mapping is invalid or the mappings cannot be
    /// written.
    pub fn save_mappings(&mut self, mappings: ToolMappings) -> Result<()> {
        validate_mappings(&mappings)?;
        let path = self.paths.mappings_file();
        let json =
            serde_json::to_string_pretty(&mappings).map_err(|e| Error::parse(&path, e))?;
        write_file(&path, &(json + "\n"))?;
        self.mappings = mappings;
        Ok(())
    }

    /// Insert or replace one tool's mapping and persist
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping is invalid or cannot be written.
    pub fn update_mapping(&mut self, tool: &str, mapping: ToolMapping) -> Result<()> {
        let mut mappings = self.mappings.clone();
        mappings.insert(tool.to_string(), mapping);
        self.save_mappings(mappings)
    }

    /// Replace and persist the ignore lists
    ///
    /// # Errors
    ///
    /// Returns an error if the ignore file cannot be written.
    pub fn save_ignore(&mut self, ignore: IgnoreConfig) -> Result<()> {
        let path = self.paths.ignore_file();
        write_file(&path, &to_toml(&path, &ignore)?)?;
        self.ignore = ignore;
        Ok(())
    }
}

fn validate_mappings(mappings: &ToolMappings) -> Result<()> {
    mappings
        .iter()
        .try_for_each(|(tool, mapping)| ConfigValidator::validate_mapping(tool, mapping))
}

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let Some(content) = read_optional(path)? else {
        return Ok(None);
    };
    toml::from_str(&content)
        .map(Some)
        .map_err(|e| Error::parse(path, e))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let Some(content) = read_optional(path)? else {
        return Ok(None);
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| Error::parse(path, e))
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io("failed to read", path, e)),
    }
}

fn to_toml<T: Serialize>(path: &Path, value: &T) -> Result<String> {
    toml::to_string_pretty(value).map_err(|e| Error::parse(path, e))
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| Error::io("failed to create directory", parent, e))?;
    }
    fs::write(path, content).map_err(|e| Error::io("failed to write", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_when_missing() {
        let tmp = TempDir::new().unwrap();
        let cache = StateCache::load(AppPaths::new(tmp.path())).unwrap();

        assert_eq!(cache.config(), &AppConfig::default());
        assert!(cache.mappings().is_empty());
        assert_eq!(cache.ignore(), &IgnoreConfig::default());
    }

    #[test]
    fn test_save_and_reload_mappings() {
        let tmp = TempDir::new().unwrap();
        let mut cache = StateCache::load(AppPaths::new(tmp.path())).unwrap();

        let mapping = ToolMapping {
            installed: true,
            config_directory: "~/.claude".to_string(),
            ..ToolMapping::default()
        };
        cache.update_mapping("claude", mapping.clone()).unwrap();

        let reloaded = StateCache::load(AppPaths::new(tmp.path())).unwrap();
        assert_eq!(reloaded.mapping("claude"), Some(&mapping));
        assert_eq!(reloaded.installed_tools(), vec!["claude".to_string()]);
    }

    #[test]
    fn test_invalidate_picks_up_external_changes() {
        let tmp = TempDir::new().unwrap();
        let paths = AppPaths::new(tmp.path());
        let mut cache = StateCache::load(paths.clone()).unwrap();
        assert!(cache.mappings().is_empty());

        fs::write(
            paths.mappings_file(),
            r#"{"cursor": {"installed": true, "config_directory": "/x"}}"#,
        )
        .unwrap();

        // Still served from memory
        assert!(cache.mapping("cursor").is_none());

        cache.invalidate().unwrap();
        assert!(cache.mapping("cursor").is_some_and(|m| m.installed));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let paths = AppPaths::new(tmp.path());
        fs::write(paths.config_file(), "[backups]\nmax_backups = 0\n").unwrap();

        let err = StateCache::load(paths).unwrap_err();
        assert_eq!(err.code(), "invalid_config");
    }

    #[test]
    fn test_unparsable_mappings_report_parse_error() {
        let tmp = TempDir::new().unwrap();
        let paths = AppPaths::new(tmp.path());
        fs::write(paths.mappings_file(), "{ not json").unwrap();

        let err = StateCache::load(paths).unwrap_err();
        assert_eq!(err.code(), "parse_error");
    }

    #[test]
    fn test_escaping_sync_path_override_rejected_on_load() {
        let tmp = TempDir::new().unwrap();
        let paths = AppPaths::new(tmp.path());
        fs::write(
            paths.mappings_file(),
            r#"{"claude": {"installed": true, "config_directory": "/x", "sync_paths": ["../.ssh/"]}}"#,
        )
        .unwrap();

        let err = StateCache::load(paths).unwrap_err();
        assert_eq!(err.code(), "invalid_config");
    }

    #[test]
    fn test_escaping_sync_path_override_not_persisted() {
        let tmp = TempDir::new().unwrap();
        let paths = AppPaths::new(tmp.path());
        let mut cache = StateCache::load(paths.clone()).unwrap();

        let mapping = ToolMapping {
            installed: true,
            config_directory: "/x".to_string(),
            sync_paths: vec!["../.ssh/".to_string()],
            ..ToolMapping::default()
        };
        assert!(cache.update_mapping("claude", mapping).is_err());
        assert!(cache.mapping("claude").is_none());
        assert!(!paths.mappings_file().exists());
    }

    #[test]
    fn test_save_config_persists_toml() {
        let tmp = TempDir::new().unwrap();
        let paths = AppPaths::new(tmp.path());
        let mut cache = StateCache::load(paths.clone()).unwrap();

        let mut config = cache.config().clone();
        config.backups.max_backups = 3;
        config.remote.owner = Some("octocat".to_string());
        cache.save_config(config).unwrap();

        let text = fs::read_to_string(paths.config_file()).unwrap();
        assert!(text.contains("max_backups = 3"));
        assert!(text.contains("octocat"));
    }
}
