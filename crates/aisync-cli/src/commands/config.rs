use aisync_core::SyncContext;

pub struct Config;

impl Config {
    pub fn execute(ctx: &SyncContext) -> anyhow::Result<()> {
        let paths = ctx.paths();
        println!("Home:      {}", paths.root().display());
        println!("Config:    {}", paths.config_file().display());
        println!("Mappings:  {}", paths.mappings_file().display());
        println!("Ignore:    {}", paths.ignore_file().display());
        println!("Plugins:   {}", paths.plugins_dir().display());
        println!("Backups:   {}", paths.backups_dir().display());
        println!("Mirror:    {}", paths.mirror_dir().display());
        println!();

        print!("{}", toml::to_string_pretty(ctx.state().config())?);

        let installed = ctx.state().installed_tools();
        println!(
            "\nInstalled tools: {}",
            if installed.is_empty() {
                "none (run `aisync scan`)".to_string()
            } else {
                installed.join(", ")
            }
        );
        Ok(())
    }
}
