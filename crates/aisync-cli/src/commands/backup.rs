use aisync_core::SyncContext;
use aisync_core::backup::{BackupManager, BackupReason};
use anyhow::bail;
use dialoguer::Confirm;

use super::common::CommandOptions;
use crate::cli::BackupCommand;

pub struct Backup;

impl Backup {
    pub fn execute(
        ctx: &SyncContext,
        command: BackupCommand,
        options: &CommandOptions,
    ) -> anyhow::Result<()> {
        let manager = BackupManager::new(ctx);

        match command {
            BackupCommand::List { tool } => {
                let records = manager.list(tool.as_deref())?;
                if records.is_empty() {
                    println!("No backups");
                }
                for record in records {
                    println!(
                        "{:<12} {:<40} {}",
                        record.tool,
                        record.id,
                        record.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
                    );
                }
            }
            BackupCommand::Create { tool } => {
                if options.dry_run {
                    println!("[dry run] would back up {tool}");
                    return Ok(());
                }
                let record = manager.create(&tool, BackupReason::Manual)?;
                println!("Created backup {} ({})", record.id, record.path.display());
            }
            BackupCommand::Restore { tool, id, yes } => {
                if options.dry_run {
                    println!("[dry run] would restore {tool} from {id}");
                    return Ok(());
                }
                let prompt = format!("Replace the local {tool} configuration with {id}?");
                if !yes && !Self::confirm(&prompt)? {
                    bail!("Restore cancelled");
                }
                let outcome = manager.restore(&tool, &id)?;
                println!("Restored {tool} from {}", outcome.restored.id);
                if let Some(safety) = outcome.safety {
                    println!("Previous state saved as {}", safety.id);
                }
            }
            BackupCommand::Delete { tool, id } => {
                if options.dry_run {
                    println!("[dry run] would delete {id}");
                    return Ok(());
                }
                manager.delete(&tool, &id)?;
                println!("Deleted {id}");
            }
            BackupCommand::Prune { tool, keep } => {
                let keep = keep.unwrap_or(ctx.state().config().backups.max_backups);
                if options.dry_run {
                    let excess = manager.list(Some(&tool))?.len().saturating_sub(keep);
                    println!("[dry run] would delete {excess} backup(s)");
                    return Ok(());
                }
                let removed = manager.prune(&tool, keep)?;
                println!("Deleted {removed} backup(s)");
            }
        }
        Ok(())
    }

    fn confirm(prompt: &str) -> anyhow::Result<bool> {
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }
}
