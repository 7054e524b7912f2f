use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// AI Coding-Assistant Configuration Sync
///
/// Mirror the configuration of Claude Code, Cursor, Gemini CLI and other
/// assistants into a repository directory and bring it back on other machines
#[derive(Parser, Debug)]
#[command(name = "aisync")]
#[command(about, long_about = None, version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Preview changes without executing (dry-run)
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Override the application directory (default: $AISYNC_HOME or ~/.config/aisync)
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which tools a command applies to
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Every installed tool
    #[arg(long, conflicts_with = "only")]
    pub all: bool,

    /// Comma-separated list of tools
    #[arg(long, value_delimiter = ',', value_name = "TOOLS")]
    pub only: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy local configuration into the repository mirror
    Push {
        #[command(flatten)]
        targets: TargetArgs,

        /// Copy files even if they appear to contain secrets
        #[arg(long)]
        force: bool,
    },

    /// Copy the repository mirror into the local configuration
    Pull {
        #[command(flatten)]
        targets: TargetArgs,

        /// Overwrite conflicting files without prompting
        #[arg(short, long, alias = "no-interactive")]
        yes: bool,

        /// Do not snapshot the local directory first
        #[arg(long)]
        no_backup: bool,
    },

    /// Show which files differ between local and mirror
    Status {
        #[command(flatten)]
        targets: TargetArgs,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Display line diffs of files that differ
    Diff {
        #[command(flatten)]
        targets: TargetArgs,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Detect installed tools and refresh the tool mappings
    Scan,

    /// Manage tool definitions
    #[command(subcommand)]
    Tools(ToolsCommand),

    /// Manage configuration snapshots
    #[command(subcommand)]
    Backup(BackupCommand),

    /// Push automatically whenever local configuration changes
    Watch {
        #[command(flatten)]
        targets: TargetArgs,
    },

    /// Carry instructions and settings from one tool to another
    Migrate {
        /// Source tool
        from: String,
        /// Target tool
        to: String,

        /// Which files to migrate
        #[arg(long, value_enum, default_value_t = MigrateKind::All)]
        kind: MigrateKind,

        /// Overwrite existing target files without prompting
        #[arg(short, long)]
        yes: bool,
    },

    /// Show active configuration and paths
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MigrateKind {
    /// Instructions or rules file (CLAUDE.md, GEMINI.md, AGENTS.md, ...)
    Instructions,
    /// Settings file (settings.json, config.json)
    Settings,
    /// Both
    All,
}

#[derive(Subcommand, Debug)]
pub enum ToolsCommand {
    /// List built-in and custom tools
    List,

    /// Show a tool definition
    Show {
        /// Tool name
        name: String,
    },

    /// Register a custom tool from a TOML definition file
    Add {
        /// Definition file
        file: PathBuf,
    },

    /// Remove a custom tool
    Remove {
        /// Tool name
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum BackupCommand {
    /// List snapshots, newest first
    List {
        /// Only this tool
        #[arg(long)]
        tool: Option<String>,
    },

    /// Snapshot a tool's local configuration
    Create {
        /// Tool name
        tool: String,
    },

    /// Replace a tool's local configuration with a snapshot
    Restore {
        /// Tool name
        tool: String,
        /// Snapshot id
        id: String,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete a snapshot
    Delete {
        /// Tool name
        tool: String,
        /// Snapshot id
        id: String,
    },

    /// Delete all but the newest snapshots of a tool
    Prune {
        /// Tool name
        tool: String,

        /// Snapshots to keep (default: configured maximum)
        #[arg(long)]
        keep: Option<usize>,
    },
}
