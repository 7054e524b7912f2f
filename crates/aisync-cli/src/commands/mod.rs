mod backup;
mod common;
mod config;
mod diff;
mod migrate;
mod pull;
mod push;
mod scan;
mod status;
mod tools;
mod watch;

pub use backup::Backup;
pub use common::{CommandOptions, load_context};
pub use config::Config;
pub use diff::Diff;
pub use migrate::Migrate;
pub use pull::Pull;
pub use push::Push;
pub use scan::Scan;
pub use status::Status;
pub use tools::Tools;
pub use watch::Watch;
