use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;
use crate::frontmatter::{format_diff, write_note};
use crate::goodreads::read_export;
use crate::safety::create_backup;
use crate::sync::{scan_vault, Conflict, SyncOptions, SyncPlan};

/// Run the sync command - merge export metadata into note frontmatter
pub fn run(
    export_override: Option<&PathBuf>,
    vault_override: Option<&PathBuf>,
    shelf: Option<&str>,
    create_missing: bool,
    no_dry_run: bool,
    yes: bool,
    no_backup: bool,
) -> Result<()> {
    let config = Config::load().context("Failed to load config")?;
    let (export, vault) = super::resolve_sources(&config, export_override, vault_override)?;

    let books = read_export(&export)?;
    if books.is_empty() {
        println!("No books found in {:?}", export);
        return Ok(());
    }

    let notes = scan_vault(&vault).context("Failed to scan vault")?;
    println!(
        "Found {} book(s) in export and {} note(s) in vault",
        books.len(),
        notes.len()
    );
    println!();

    let options = SyncOptions {
        shelf: shelf.map(String::from),
        create_missing: create_missing || config.sync.create_missing,
    };
    let plan = SyncPlan::build(&books, &notes, &vault, &options);

    if !plan.conflicts.is_empty() {
        print_conflicts(&plan.conflicts);
        bail!("Cannot proceed with conflicting matches.");
    }

    print_plan(&plan);

    if plan.updates.is_empty() {
        println!("{} All notes are up to date.", "✓".green());
        return Ok(());
    }

    if no_dry_run {
        let backups = !no_backup && config.backups.enabled;
        apply_plan(&plan, yes, backups)?;
    } else {
        println!();
        println!("{}", "Dry run - no notes written.".yellow());
        println!("Run with {} to write notes.", "--no-dry-run".cyan());
    }

    Ok(())
}

fn print_conflicts(conflicts: &[Conflict]) {
    eprintln!(
        "{}: {} note(s) match more than one book",
        "Error".red().bold(),
        conflicts.len()
    );
    eprintln!();

    for conflict in conflicts {
        eprintln!("  {} → {}", "Conflict".red(), conflict.path.display());
        for title in &conflict.book_titles {
            eprintln!("    from: {}", title);
        }
        eprintln!();
    }

    eprintln!("Resolve by renaming notes or filtering with --shelf.");
}

fn print_plan(plan: &SyncPlan) {
    for update in &plan.updates {
        let label = if update.created {
            format!("{} (new note)", update.path.display())
        } else {
            update.path.display().to_string()
        };
        println!("{} {}", "BOOK:".bold(), update.book_title);
        println!("{}", format_diff(&label, &update.changes));
    }

    if !plan.failed.is_empty() {
        println!(
            "{}: {} note(s) could not be read and will be skipped",
            "Warning".yellow().bold(),
            plan.failed.len()
        );
        for failed in &plan.failed {
            println!(
                "  {} ({}) - {}",
                failed.path.display(),
                failed.book_title,
                failed.reason
            );
        }
        println!();
    }

    if !plan.missing.is_empty() {
        println!(
            "{}: {} book(s) have no note (use {} to create them)",
            "Info".cyan().bold(),
            plan.missing.len(),
            "--create-missing".cyan()
        );
        for missing in &plan.missing {
            println!("  {} [{}]", missing.book_title, missing.shelf);
        }
        println!();
    }

    println!(
        "{} note(s) to update ({} new), {} unchanged",
        plan.updates.len().to_string().yellow(),
        plan.new_notes(),
        plan.unchanged.len().to_string().green()
    );
}

fn apply_plan(plan: &SyncPlan, yes: bool, backups: bool) -> Result<()> {
    if !yes {
        print!("Write {} note(s)? [y/N] ", plan.updates.len());
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") && !input.trim().eq_ignore_ascii_case("yes") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!();
    println!("{}", "Writing notes...".green());

    for update in &plan.updates {
        if backups && !update.created {
            let backup_path = create_backup(&update.path)?;
            info!(backup = %backup_path.display(), "created backup");
        }

        write_note(&update.path, &update.document)?;
        info!(note = %update.path.display(), changes = update.changes.len(), "wrote note");

        let marker = if update.created { "+".cyan() } else { "✓".green() };
        println!("  {} {}", marker, update.path.display());
    }

    if !backups {
        println!("Warning: No backups created. Changes cannot be undone.");
    }

    println!();
    println!(
        "{} {} note(s) written.",
        "Done!".green().bold(),
        plan.updates.len()
    );

    Ok(())
}
