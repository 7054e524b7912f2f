use aisync_core::SyncContext;
use aisync_core::migrate::{MigrationKind, Migrator};
use dialoguer::Confirm;

use super::common::CommandOptions;
use crate::cli::MigrateKind;

pub struct Migrate;

impl Migrate {
    pub fn execute(
        ctx: &SyncContext,
        from: &str,
        to: &str,
        kind: MigrateKind,
        yes: bool,
        options: &CommandOptions,
    ) -> anyhow::Result<()> {
        let kinds: &[MigrationKind] = match kind {
            MigrateKind::Instructions => &[MigrationKind::Instructions],
            MigrateKind::Settings => &[MigrationKind::Settings],
            MigrateKind::All => &MigrationKind::ALL,
        };

        let migrator = Migrator::new(ctx);
        let plan = migrator.plan(from, to, kinds)?;
        println!("Migrating {from} -> {to}");

        for (kind, reason) in &plan.skipped {
            println!("  [{kind}] skipped: {reason}");
        }

        let mut migrated = 0;
        for step in &plan.steps {
            println!(
                "  [{}] {} -> {}",
                step.kind,
                step.source.display(),
                step.target.display()
            );
            if options.dry_run {
                println!("  [dry run] would migrate");
                migrated += 1;
                continue;
            }
            if step.target_exists && !yes && !Self::confirm("Target exists. Overwrite?")? {
                println!("  kept existing target");
                continue;
            }
            migrator.apply(&plan, step)?;
            migrated += 1;
        }

        let verb = if options.dry_run { "Would migrate" } else { "Migrated" };
        println!("{verb} {migrated} file(s)");
        Ok(())
    }

    fn confirm(prompt: &str) -> anyhow::Result<bool> {
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }
}
