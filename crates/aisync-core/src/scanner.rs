//! Directory traversal and tool detection
//!
//! - `tree`: resolves a tool's sync paths against a root directory and
//!   enumerates the files they cover
//! - `detect`: finds installed tools on `PATH` and in the environment

mod detect;
mod tree;

pub use detect::{DetectedTool, EnvDetection, ToolScanner, detect_current_tool};
pub use tree::{DirListing, FileEntry, TreeScan, TreeScanner, list_entries};
