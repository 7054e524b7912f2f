//! Configuration validation and error reporting

use std::path::{Component, Path};

use super::types::{AppConfig, ToolMapping};
use crate::error::{Error, Result};
use crate::tools::ToolDefinition;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the application configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(config: &AppConfig) -> Result<()> {
        if config.backups.max_backups == 0 {
            return Err(Error::InvalidConfig(
                "backups.max_backups must be at least 1".into(),
            ));
        }

        if config.remote.repository.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "remote.repository cannot be empty".into(),
            ));
        }

        if config.remote.branch.trim().is_empty() {
            return Err(Error::InvalidConfig("remote.branch cannot be empty".into()));
        }

        if config.watch.interval_secs == 0 {
            return Err(Error::InvalidConfig(
                "watch.interval_secs must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Validate a tool definition before it is accepted into a registry
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or malformed.
    pub fn validate_definition(def: &ToolDefinition) -> Result<()> {
        if def.name.trim().is_empty() {
            return Err(Error::InvalidDefinition("name cannot be empty".into()));
        }

        if !def
            .name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            return Err(Error::InvalidDefinition(format!(
                "name '{}' may only contain a-z, 0-9, '-' and '_'",
                def.name
            )));
        }

        if def.config_directory.trim().is_empty() {
            return Err(Error::InvalidDefinition(format!(
                "'{}' has no config_directory",
                def.name
            )));
        }

        for sync_path in &def.sync_paths {
            check_sync_path(&def.name, sync_path).map_err(Error::InvalidDefinition)?;
        }

        for pattern in &def.ignore_patterns {
            if pattern.trim().is_empty() {
                return Err(Error::InvalidDefinition(format!(
                    "'{}' has an empty ignore pattern",
                    def.name
                )));
            }
        }

        Ok(())
    }

    /// Validate a persisted tool mapping
    ///
    /// # Errors
    ///
    /// Returns an error if a sync path override leaves the tool's directory.
    pub fn validate_mapping(tool: &str, mapping: &ToolMapping) -> Result<()> {
        for sync_path in &mapping.sync_paths {
            check_sync_path(tool, sync_path).map_err(Error::InvalidConfig)?;
        }
        Ok(())
    }
}

/// Sync paths must stay inside the tool's directory
fn check_sync_path(tool: &str, sync_path: &str) -> std::result::Result<(), String> {
    if sync_path.trim().is_empty() {
        return Err(format!("'{tool}' has an empty sync path"));
    }

    let path = Path::new(sync_path);
    let escapes = path.components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(format!(
            "'{tool}' sync path '{sync_path}' must be relative and inside the config directory"
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(name: &str) -> ToolDefinition {
        ToolDefinition {
            name: name.to_string(),
            display_name: "Test".to_string(),
            binary_names: vec![],
            config_directory: "~/.test".to_string(),
            sync_paths: vec!["settings.json".to_string(), "rules/".to_string()],
            ignore_patterns: vec!["*.log".to_string()],
            env_vars: vec![],
        }
    }

    #[test]
    fn test_validate_default_config() {
        assert!(ConfigValidator::validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_zero_retention() {
        let mut config = AppConfig::default();
        config.backups.max_backups = 0;

        let result = ConfigValidator::validate(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("max_backups"));
    }

    #[test]
    fn test_validate_empty_repository() {
        let mut config = AppConfig::default();
        config.remote.repository = "  ".to_string();

        let err = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(err.code(), "invalid_config");
    }

    #[test]
    fn test_validate_definition_ok() {
        assert!(ConfigValidator::validate_definition(&definition("my-tool")).is_ok());
    }

    #[test]
    fn test_validate_definition_empty_name() {
        let err = ConfigValidator::validate_definition(&definition("")).unwrap_err();
        assert_eq!(err.code(), "invalid_definition");
        assert!(err.to_string().contains("name cannot be empty"));
    }

    #[test]
    fn test_validate_definition_bad_name() {
        assert!(ConfigValidator::validate_definition(&definition("My Tool")).is_err());
        assert!(ConfigValidator::validate_definition(&definition("../x")).is_err());
    }

    #[test]
    fn test_validate_definition_escaping_sync_path() {
        let mut def = definition("tool");
        def.sync_paths.push("../outside".to_string());
        assert!(ConfigValidator::validate_definition(&def).is_err());

        let mut def = definition("tool");
        def.sync_paths.push("/etc/passwd".to_string());
        assert!(ConfigValidator::validate_definition(&def).is_err());
    }

    #[test]
    fn test_validate_definition_missing_directory() {
        let mut def = definition("tool");
        def.config_directory = String::new();
        assert!(ConfigValidator::validate_definition(&def).is_err());
    }

    #[test]
    fn test_validate_mapping_sync_path_overrides() {
        let mut mapping = ToolMapping {
            sync_paths: vec!["rules/".to_string(), "settings.json".to_string()],
            ..ToolMapping::default()
        };
        assert!(ConfigValidator::validate_mapping("tool", &mapping).is_ok());

        mapping.sync_paths.push("../.ssh/".to_string());
        let err = ConfigValidator::validate_mapping("tool", &mapping).unwrap_err();
        assert_eq!(err.code(), "invalid_config");
        assert!(err.to_string().contains("../.ssh/"));

        mapping.sync_paths = vec!["/etc/".to_string()];
        assert!(ConfigValidator::validate_mapping("tool", &mapping).is_err());
    }
}
