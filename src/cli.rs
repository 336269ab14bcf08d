use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "goodreads-sync")]
#[command(about = "CLI tool for syncing a Goodreads library export into markdown book notes")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a Goodreads title into title, subtitle and series
    ParseTitle {
        /// The full title, e.g. "Dawnshard (The Stormlight Archive, #3.5)"
        title: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which exported books have a note in the vault
    Status {
        /// Goodreads library export CSV (uses config default if not specified)
        #[arg(long)]
        export: Option<PathBuf>,

        /// Directory of book notes (uses config default if not specified)
        #[arg(long)]
        vault: Option<PathBuf>,

        /// Only show books on this exclusive shelf
        #[arg(long)]
        shelf: Option<String>,
    },

    /// Merge Goodreads metadata into the frontmatter of book notes
    Sync {
        /// Goodreads library export CSV (uses config default if not specified)
        #[arg(long)]
        export: Option<PathBuf>,

        /// Directory of book notes (uses config default if not specified)
        #[arg(long)]
        vault: Option<PathBuf>,

        /// Only sync books on this exclusive shelf
        #[arg(long)]
        shelf: Option<String>,

        /// Create notes for books that have none
        #[arg(long)]
        create_missing: bool,

        /// Actually write notes (default: dry-run)
        #[arg(long)]
        no_dry_run: bool,

        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,

        /// Skip creating backup files
        #[arg(long = "no-backup-i-void-my-warranty")]
        no_backup: bool,
    },

    /// Create a config file interactively
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}
