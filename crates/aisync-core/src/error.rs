//! Error types for the aisync library
//!
//! Every variant maps to a stable, machine-readable code so callers can
//! react to a failure kind without matching on message text.

use std::path::{Path, PathBuf};

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Failures reported by the public operations of this crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The tool is unknown to the mappings or not marked installed
    #[error("tool '{0}' is not installed (run a scan first)")]
    ToolNotInstalled(String),

    /// The tool's local configuration directory does not exist
    #[error("configuration directory for '{tool}' not found: {}", path.display())]
    ConfigDirNotFound {
        /// Tool name
        tool: String,
        /// Directory that was expected
        path: PathBuf,
    },

    /// The tool's mirror directory does not exist
    #[error("mirror directory for '{tool}' not found: {}", path.display())]
    RepoNotFound {
        /// Tool name
        tool: String,
        /// Directory that was expected
        path: PathBuf,
    },

    /// No snapshot with the given id exists for the tool
    #[error("backup '{id}' not found for '{tool}'")]
    BackupNotFound {
        /// Tool name
        tool: String,
        /// Snapshot id
        id: String,
    },

    /// The tool is not present in the registry
    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    /// A tool definition failed validation
    #[error("invalid tool definition: {0}")]
    InvalidDefinition(String),

    /// A custom definition tried to take a built-in name
    #[error("'{0}' is a built-in tool and cannot be replaced or removed")]
    ReservedToolName(String),

    /// Application configuration failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A migration between two tools cannot be planned
    #[error("invalid migration: {0}")]
    InvalidMigration(String),

    /// A built-in detection pattern failed to compile
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        /// Pattern source
        pattern: String,
        /// Compiler message
        message: String,
    },

    /// Filesystem operation failed
    #[error("{action} {}: {source}", path.display())]
    Io {
        /// What was being attempted
        action: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A persisted file could not be parsed or serialized
    #[error("failed to parse {}: {message}", path.display())]
    Parse {
        /// File involved
        path: PathBuf,
        /// Parser message
        message: String,
    },
}

impl Error {
    /// Stable error code for this failure kind
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ToolNotInstalled(_) => "tool_not_installed",
            Self::ConfigDirNotFound { .. } => "config_dir_not_found",
            Self::RepoNotFound { .. } => "repo_not_found",
            Self::BackupNotFound { .. } => "backup_not_found",
            Self::UnknownTool(_) => "unknown_tool",
            Self::InvalidDefinition(_) => "invalid_definition",
            Self::ReservedToolName(_) => "reserved_tool_name",
            Self::InvalidConfig(_) => "invalid_config",
            Self::InvalidMigration(_) => "invalid_migration",
            Self::InvalidPattern { .. } => "invalid_pattern",
            Self::Io { .. } => "io_error",
            Self::Parse { .. } => "parse_error",
        }
    }

    pub(crate) fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(path: &Path, message: impl ToString) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }
}
