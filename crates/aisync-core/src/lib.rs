//! # aisync-core
//!
//! Core library for synchronizing AI coding-assistant configuration.
//!
//! This library decides, for one tool at a time, which files of the tool's
//! local configuration directory are new, modified, identical, ignored or
//! secret-bearing relative to a mirror directory, and performs the
//! directional copy between the two. Version control and transport of the
//! mirror are left to the caller.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;

/// Ignore rules, persisted state and application paths
pub mod config;

/// Tool definitions, built-in catalog and runtime registry
pub mod tools;

/// Secret detection in file content
pub mod security;

/// Fingerprinting, conflict detection, status and diffs
pub mod comparison;

/// Directory traversal and tool installation detection
pub mod scanner;

/// Directional synchronization engine
pub mod sync;

/// Snapshot backups of tool configuration directories
pub mod backup;

/// Instruction and settings migration between tools
pub mod migrate;

/// Change-notification debouncing for watch mode
pub mod watch;

mod context;

#[cfg(test)]
mod testing;

pub use context::{SyncContext, ToolLayout};
pub use error::{Error, Result};
