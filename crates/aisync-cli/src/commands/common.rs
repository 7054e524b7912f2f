//! Common types and utilities for command execution

use std::path::Path;

use aisync_core::SyncContext;
use aisync_core::config::AppPaths;
use aisync_core::scanner::detect_current_tool;
use anyhow::{Context, bail};

use crate::cli::TargetArgs;

/// Execution options shared by every command
pub struct CommandOptions {
    /// Enable verbose output
    pub verbose: bool,
    /// Preview changes without applying (dry-run)
    pub dry_run: bool,
}

impl CommandOptions {
    /// Create new command options
    #[must_use]
    pub const fn new(verbose: bool, dry_run: bool) -> Self {
        Self { verbose, dry_run }
    }
}

/// Discover the application directory and load the context from it
pub fn load_context(home: Option<&Path>) -> anyhow::Result<SyncContext> {
    let paths = AppPaths::discover(home).context("Failed to locate the application directory")?;
    let root = paths.root().to_path_buf();
    SyncContext::load(paths)
        .with_context(|| format!("Failed to load state from {}", root.display()))
}

/// Resolve `--all`, `--only` or the currently running tool to tool names
pub fn select_targets(ctx: &SyncContext, targets: &TargetArgs) -> anyhow::Result<Vec<String>> {
    if targets.all {
        let installed = ctx.state().installed_tools();
        if installed.is_empty() {
            bail!("No installed tools found. Run `aisync scan` first.");
        }
        return Ok(installed);
    }

    if !targets.only.is_empty() {
        let mut tools: Vec<String> = Vec::new();
        for name in &targets.only {
            let name = name.trim();
            if !name.is_empty() && !tools.iter().any(|t| t == name) {
                tools.push(name.to_string());
            }
        }
        if tools.is_empty() {
            bail!("--only needs at least one tool name");
        }
        return Ok(tools);
    }

    match detect_current_tool(ctx.registry(), |var| std::env::var(var).ok()) {
        Some(detected) => {
            tracing::debug!(tool = %detected.tool, env = %detected.env_var, "detected current tool");
            Ok(vec![detected.tool])
        }
        None => bail!("Could not detect the current tool. Use --all or --only <TOOLS>."),
    }
}

/// Run `f` for every tool, reporting failures and continuing
///
/// Fails at the end if any tool failed.
pub fn for_each_tool<F>(tools: &[String], action: &str, mut f: F) -> anyhow::Result<()>
where
    F: FnMut(&str) -> anyhow::Result<()>,
{
    let mut failed = Vec::new();

    for tool in tools {
        if let Err(e) = f(tool) {
            eprintln!("Error: {tool}: {e:#}");
            failed.push(tool.as_str());
        }
    }

    if !failed.is_empty() {
        bail!("{action} failed for {}", failed.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_each_tool_continues_after_failure() {
        let tools = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let mut seen = Vec::new();

        let result = for_each_tool(&tools, "push", |tool| {
            seen.push(tool.to_string());
            if tool == "b" {
                bail!("boom");
            }
            Ok(())
        });

        assert_eq!(seen, tools);
        assert!(result.unwrap_err().to_string().contains("push failed for b"));
    }

    #[test]
    fn test_only_targets_deduplicated() {
        let tmp = tempfile::TempDir::new().unwrap();
        let ctx = SyncContext::load(AppPaths::new(tmp.path())).unwrap();
        let targets = TargetArgs {
            all: false,
            only: vec!["cursor".into(), " claude".into(), "cursor".into()],
        };

        assert_eq!(
            select_targets(&ctx, &targets).unwrap(),
            vec!["cursor".to_string(), "claude".to_string()]
        );
    }

    #[test]
    fn test_all_requires_installed_tools() {
        let tmp = tempfile::TempDir::new().unwrap();
        let ctx = SyncContext::load(AppPaths::new(tmp.path())).unwrap();
        let targets = TargetArgs {
            all: true,
            only: vec![],
        };

        assert!(select_targets(&ctx, &targets).is_err());
    }
}
