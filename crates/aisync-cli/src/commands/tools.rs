use std::fs;

use aisync_core::SyncContext;
use aisync_core::tools::ToolDefinition;
use anyhow::Context;

use crate::cli::ToolsCommand;

pub struct Tools;

impl Tools {
    pub fn execute(ctx: &mut SyncContext, command: ToolsCommand) -> anyhow::Result<()> {
        match command {
            ToolsCommand::List => {
                for def in ctx.registry().iter() {
                    let kind = if ctx.registry().is_builtin(&def.name) {
                        "built-in"
                    } else {
                        "custom"
                    };
                    let installed = ctx.state().mapping(&def.name).is_some_and(|m| m.installed);
                    println!(
                        "{:<12} {:<20} {kind:<9} {}",
                        def.name,
                        def.label(),
                        if installed { "installed" } else { "" }
                    );
                }
            }
            ToolsCommand::Show { name } => {
                let def = ctx.registry().require(&name)?;
                print!("{}", toml::to_string_pretty(def)?);
            }
            ToolsCommand::Add { file } => {
                let content = fs::read_to_string(&file)
                    .with_context(|| format!("Failed to read {}", file.display()))?;
                let def: ToolDefinition = toml::from_str(&content)
                    .with_context(|| format!("Failed to parse {}", file.display()))?;
                let name = def.name.clone();

                let dir = ctx.paths().plugins_dir();
                let path = ctx.registry_mut().install_plugin(&dir, def)?;
                println!("Registered {name} ({})", path.display());
            }
            ToolsCommand::Remove { name } => {
                let dir = ctx.paths().plugins_dir();
                ctx.registry_mut().remove_plugin(&dir, &name)?;
                println!("Removed {name}");
            }
        }
        Ok(())
    }
}
