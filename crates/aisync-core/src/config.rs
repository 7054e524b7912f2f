//! Configuration, persisted state and ignore-pattern matching
//!
//! This module handles:
//! - Application directory discovery (`$AISYNC_HOME` or the XDG config dir)
//! - TOML/JSON parsing of the config, tool mappings and ignore lists
//! - An explicit in-memory cache of that state with invalidation
//! - Gitignore-style ignore matching
//! - Validation and error reporting

mod cache;
mod patterns;
mod paths;
mod types;
mod validation;


pub use cache::StateCache;
pub use patterns::{IgnoreMatcher, should_ignore};
pub use paths::{AppPaths, HOME_ENV, expand_home};
pub use types::{
    AppConfig, BackupSettings, DeviceConfig, IgnoreConfig, InstallMethod, RemoteConfig,
    SyncDirection, ToolMapping, ToolMappings, WatchSettings,
};
pub use validation::ConfigValidator;
