use aisync_core::SyncContext;
use aisync_core::scanner::{ToolScanner, detect_current_tool};

use super::common::CommandOptions;

pub struct Scan;

impl Scan {
    pub fn execute(ctx: &mut SyncContext, options: &CommandOptions) -> anyhow::Result<()> {
        let mappings = ToolScanner::new(ctx.registry()).refresh(ctx.state().mappings());

        for (name, mapping) in &mappings {
            let Some(def) = ctx.registry().get(name) else {
                continue;
            };
            let state = if mapping.installed { "installed" } else { "-" };
            let dir = if mapping.config_dir_exists {
                "config found"
            } else {
                "no config"
            };
            println!("{:<20} {state:<10} {dir}", def.label());

            if options.verbose {
                if let Some(binary) = &mapping.binary_path {
                    println!("    binary: {}", binary.display());
                }
                println!("    config: {}", mapping.effective_config_directory().display());
            }
        }

        if let Some(current) = detect_current_tool(ctx.registry(), |var| std::env::var(var).ok()) {
            println!("\nRunning inside {} (via ${})", current.tool, current.env_var);
        }

        if options.dry_run {
            println!("\n[dry run] mappings not saved");
            return Ok(());
        }

        ctx.state_mut().save_mappings(mappings)?;
        Ok(())
    }
}
