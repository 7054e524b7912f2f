use aisync_core::SyncContext;
use aisync_core::config::SyncDirection;
use aisync_core::sync::{SyncEngine, SyncOptions, SyncReporter};
use anyhow::Context;

use super::common::{CommandOptions, for_each_tool, select_targets};
use crate::cli::TargetArgs;

pub struct Push;

impl Push {
    pub fn execute(
        ctx: &SyncContext,
        targets: &TargetArgs,
        force: bool,
        options: &CommandOptions,
    ) -> anyhow::Result<()> {
        let tools = select_targets(ctx, targets)?;
        let engine = SyncEngine::new(ctx);
        let sync_options = SyncOptions {
            dry_run: options.dry_run,
            force,
            ..SyncOptions::default()
        };

        if force {
            eprintln!("Warning: secret scanning is disabled for this push.");
        }

        for_each_tool(&tools, "push", |tool| {
            let report = engine
                .sync(tool, SyncDirection::ToRemote, &sync_options)
                .with_context(|| format!("Failed to push {tool}"))?;

            println!("{}", SyncReporter::generate_summary(&report));
            if !report.comparison.sensitive.is_empty() {
                eprintln!(
                    "{} file(s) withheld from {tool}. Remove the secrets or rerun with --force.",
                    report.comparison.sensitive.len()
                );
            }
            Ok(())
        })
    }
}
