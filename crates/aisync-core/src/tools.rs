//! Tool definitions and the registry that owns them
//!
//! The registry is an explicit object built at process start from the
//! built-in catalog plus any custom definitions found in the plugins
//! directory. It is read-mostly: custom definitions can be registered and
//! unregistered at runtime, built-ins cannot be replaced or removed.

mod builtins;
mod definition;
mod registry;

pub use builtins::{BUILTIN_COUNT, builtin_definitions};
pub use definition::ToolDefinition;
pub use registry::{PluginLoadReport, ToolRegistry};
