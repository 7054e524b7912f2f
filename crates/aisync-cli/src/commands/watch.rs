use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use aisync_core::SyncContext;
use aisync_core::config::SyncDirection;
use aisync_core::sync::{SyncEngine, SyncOptions, SyncReporter};
use aisync_core::watch::{Debouncer, is_relevant_change};
use anyhow::{Context, bail};
use notify::{RecursiveMode, Watcher};

use super::common::{CommandOptions, select_targets};
use crate::cli::TargetArgs;

/// Longest wait between checks when nothing is pending
const IDLE_POLL: Duration = Duration::from_secs(1);

pub struct Watch;

impl Watch {
    pub fn execute(
        ctx: &SyncContext,
        targets: &TargetArgs,
        options: &CommandOptions,
    ) -> anyhow::Result<()> {
        let tools = select_targets(ctx, targets)?;
        let roots = Self::watched_roots(ctx, &tools);
        if roots.is_empty() {
            bail!("None of the selected tools has a local configuration directory");
        }

        let (tx, rx) = mpsc::channel::<notify::Result<notify::Event>>();
        let mut watcher =
            notify::recommended_watcher(tx).context("Failed to create file watcher")?;
        for (tool, root) in &roots {
            watcher
                .watch(root, RecursiveMode::Recursive)
                .with_context(|| format!("Failed to watch {}", root.display()))?;
            println!("Watching {tool} ({})", root.display());
        }

        let quiet = Duration::from_secs(ctx.state().config().watch.interval_secs);
        let mut debouncer = Debouncer::new(quiet);
        let engine = SyncEngine::new(ctx);
        let sync_options = SyncOptions {
            dry_run: options.dry_run,
            ..SyncOptions::default()
        };
        println!("Press Ctrl+C to stop.");

        loop {
            let timeout = debouncer
                .time_until_ready(Instant::now())
                .map_or(IDLE_POLL, |left| left.min(IDLE_POLL));

            match rx.recv_timeout(timeout) {
                Ok(Ok(event)) => {
                    for path in &event.paths {
                        if let Some(tool) = Self::owner(&roots, path) {
                            tracing::debug!(tool, path = %path.display(), "change");
                            debouncer.notify(tool, Instant::now());
                        }
                    }
                }
                Ok(Err(e)) => tracing::warn!(error = %e, "watch error"),
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => bail!("File watcher stopped"),
            }

            let Some(ready) = debouncer.take_ready(Instant::now()) else {
                continue;
            };
            for tool in ready {
                match engine.sync(&tool, SyncDirection::ToRemote, &sync_options) {
                    Ok(report) if report.comparison.changed_count() > 0 => {
                        println!("{}", SyncReporter::generate_summary(&report));
                    }
                    Ok(_) => tracing::debug!(tool, "nothing to push"),
                    Err(e) => eprintln!("Error: {tool}: {e}"),
                }
            }
        }
    }

    fn watched_roots(ctx: &SyncContext, tools: &[String]) -> Vec<(String, PathBuf)> {
        tools
            .iter()
            .filter_map(|tool| {
                let layout = ctx.layout(tool)?;
                if layout.local_dir.is_dir() {
                    Some((tool.clone(), layout.local_dir))
                } else {
                    eprintln!("Skipping {tool}: {} not found", layout.local_dir.display());
                    None
                }
            })
            .collect()
    }

    /// Tool whose directory contains `path`, if the change matters
    fn owner<'a>(roots: &'a [(String, PathBuf)], path: &Path) -> Option<&'a str> {
        roots
            .iter()
            .filter(|(_, root)| path.starts_with(root))
            .max_by_key(|(_, root)| root.components().count())
            .filter(|(_, root)| path.strip_prefix(root).is_ok_and(is_relevant_change))
            .map(|(tool, _)| tool.as_str())
    }
}
