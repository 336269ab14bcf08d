use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::Config;
use crate::goodreads::{parse_title, read_export};
use crate::sync::{locate_note, scan_vault, NoteMatch};

/// Run the status command - report which books have a note in the vault
pub fn run(
    export_override: Option<&PathBuf>,
    vault_override: Option<&PathBuf>,
    shelf: Option<&str>,
    quiet: bool,
) -> Result<()> {
    let config = Config::load().context("Failed to load config")?;
    let (export, vault) = super::resolve_sources(&config, export_override, vault_override)?;

    let books = read_export(&export)?;
    let notes = scan_vault(&vault).context("Failed to scan vault")?;

    let mut found = 0;
    let mut missing = 0;

    for book in books.iter().filter(|b| b.is_on_shelf(shelf)) {
        let parsed = parse_title(&book.title);
        let note = locate_note(&notes, &vault, &parsed.title);

        match note.path() {
            Some(_) => found += 1,
            None => missing += 1,
        }

        if quiet && note.path().is_some() {
            continue;
        }

        println!("{} {}", "BOOK:".bold(), book.title);
        println!(" -> Shelf: {}", book.exclusive_shelf);
        match &note {
            NoteMatch::Found(path) => {
                println!(" -> {} {}", "FOUND".green(), path.display());
            }
            NoteMatch::Ambiguous { chosen, others } => {
                println!(" -> {} {}", "FOUND".green(), chosen.display());
                for other in others {
                    println!("    {} also matches {}", "⚠".yellow(), other.display());
                }
            }
            NoteMatch::Missing => println!(" -> {}", "NOT FOUND".red()),
        }
    }

    println!();
    println!(
        "{} book(s): {} with a note, {} without",
        found + missing,
        found.to_string().green(),
        missing.to_string().yellow()
    );

    Ok(())
}
