use aisync_core::SyncContext;
use aisync_core::comparison::{ConflictDetector, ResolutionPlan};
use aisync_core::config::SyncDirection;
use aisync_core::sync::{SyncEngine, SyncOptions, SyncReporter};
use anyhow::Context;

use super::common::{CommandOptions, for_each_tool, select_targets};
use crate::cli::TargetArgs;
use crate::interactive::ConflictPrompter;

pub struct Pull;

impl Pull {
    pub fn execute(
        ctx: &SyncContext,
        targets: &TargetArgs,
        yes: bool,
        no_backup: bool,
        options: &CommandOptions,
    ) -> anyhow::Result<()> {
        let tools = select_targets(ctx, targets)?;
        let engine = SyncEngine::new(ctx);
        let detector = ConflictDetector::new(ctx);
        let prompter = ConflictPrompter::new();

        for_each_tool(&tools, "pull", |tool| {
            let conflicts = detector.detect(tool);

            let plan = if conflicts.is_empty() || yes || options.dry_run {
                if !conflicts.is_empty() {
                    println!(
                        "{tool}: {} local file(s) differ from the mirror and will be overwritten",
                        conflicts.len()
                    );
                }
                ResolutionPlan::default()
            } else {
                match prompter.resolve(tool, &conflicts)? {
                    Some(plan) => plan,
                    None => {
                        println!("{tool}: skipped");
                        return Ok(());
                    }
                }
            };

            let sync_options = SyncOptions {
                dry_run: options.dry_run,
                backup_before_pull: !no_backup,
                ..SyncOptions::default()
            }
            .with_plan(plan);

            let report = engine
                .sync(tool, SyncDirection::FromRemote, &sync_options)
                .with_context(|| format!("Failed to pull {tool}"))?;
            println!("{}", SyncReporter::generate_summary(&report));
            Ok(())
        })
    }
}
