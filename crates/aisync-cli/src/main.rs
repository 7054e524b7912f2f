mod cli;
mod commands;
mod interactive;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use commands::CommandOptions;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    // Set up Ctrl+C handler for graceful interruption
    ctrlc::set_handler(|| {
        eprintln!("\n\nInterrupted by user (Ctrl+C)");
        std::process::exit(130); // Standard exit code for SIGINT
    })
    .context("Failed to set Ctrl+C handler")?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = CommandOptions::new(cli.verbose, cli.dry_run);
    let mut ctx = commands::load_context(cli.home.as_deref())?;

    match cli.command {
        Commands::Push { targets, force } => {
            commands::Push::execute(&ctx, &targets, force, &options)
                .context("Failed to execute push command")?;
        }
        Commands::Pull {
            targets,
            yes,
            no_backup,
        } => {
            commands::Pull::execute(&ctx, &targets, yes, no_backup, &options)
                .context("Failed to execute pull command")?;
        }
        Commands::Status { targets, json } => {
            commands::Status::execute(&ctx, &targets, json)
                .context("Failed to execute status command")?;
        }
        Commands::Diff { targets, no_color } => {
            commands::Diff::execute(&ctx, &targets, no_color)
                .context("Failed to execute diff command")?;
        }
        Commands::Scan => {
            commands::Scan::execute(&mut ctx, &options).context("Failed to execute scan command")?;
        }
        Commands::Tools(command) => {
            commands::Tools::execute(&mut ctx, command)
                .context("Failed to execute tools command")?;
        }
        Commands::Backup(command) => {
            commands::Backup::execute(&ctx, command, &options)
                .context("Failed to execute backup command")?;
        }
        Commands::Watch { targets } => {
            commands::Watch::execute(&ctx, &targets, &options)
                .context("Failed to execute watch command")?;
        }
        Commands::Migrate {
            from,
            to,
            kind,
            yes,
        } => {
            commands::Migrate::execute(&ctx, &from, &to, kind, yes, &options)
                .context("Failed to execute migrate command")?;
        }
        Commands::Config => {
            commands::Config::execute(&ctx).context("Failed to execute config command")?;
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the verbosity flag
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}
