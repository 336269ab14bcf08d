mod cli;
mod commands;
mod config;
mod frontmatter;
mod goodreads;
mod safety;
mod sync;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::ParseTitle { title, json } => {
            commands::parse_title::run(&title, json, cli.quiet)?;
        }
        Commands::Status {
            export,
            vault,
            shelf,
        } => {
            commands::status::run(export.as_ref(), vault.as_ref(), shelf.as_deref(), cli.quiet)?;
        }
        Commands::Sync {
            export,
            vault,
            shelf,
            create_missing,
            no_dry_run,
            yes,
            no_backup,
        } => {
            commands::sync::run(
                export.as_ref(),
                vault.as_ref(),
                shelf.as_deref(),
                create_missing,
                no_dry_run,
                yes,
                no_backup,
            )?;
        }
        Commands::Init { force } => {
            commands::init::run(force)?;
        }
    }

    Ok(())
}
