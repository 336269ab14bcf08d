use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::config::Config;

/// Run the init command - interactively create a config file
pub fn run(force: bool) -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() && !force {
        eprintln!(
            "{}: Config already exists at {}",
            "Error".red().bold(),
            config_path.display()
        );
        eprintln!();
        eprintln!("Use {} to overwrite.", "--force".cyan());
        bail!("Config file already exists");
    }

    println!("{}", "goodreads-sync configuration".bold());
    println!();
    println!(
        "This will create a config file at: {}",
        config_path.display().to_string().cyan()
    );
    println!();

    let vault = prompt_path(
        "Step 1: Choose your book notes directory",
        "This is the folder of markdown notes that frontmatter is synced into.",
        dirs::document_dir()
            .or_else(dirs::home_dir)
            .map(|p| p.join("notes").join("Books"))
            .unwrap_or_else(|| PathBuf::from("notes/Books")),
    )?;

    let export = prompt_path(
        "Step 2: Choose your Goodreads export",
        "Export it from Goodreads under My Books > Import and export.",
        dirs::download_dir()
            .or_else(dirs::home_dir)
            .map(|p| p.join("goodreads_library_export.csv"))
            .unwrap_or_else(|| PathBuf::from("goodreads_library_export.csv")),
    )?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    let config_content = format!(
        r#"# goodreads-sync configuration

[sync]
vault = "{}"
export = "{}"
create_missing = false

[backups]
enabled = true
"#,
        escape_toml(&vault.display().to_string()),
        escape_toml(&export.display().to_string())
    );

    std::fs::write(&config_path, &config_content)
        .with_context(|| format!("Failed to write {:?}", config_path))?;

    println!();
    println!(
        "{} Config written to {}",
        "✓".green(),
        config_path.display()
    );
    println!();
    println!("You can now use:");
    println!(
        "  {} - see which books have notes",
        "goodreads-sync status".cyan()
    );
    println!(
        "  {} - preview and apply frontmatter updates",
        "goodreads-sync sync".cyan()
    );

    Ok(())
}

fn prompt_path(heading: &str, explanation: &str, default: PathBuf) -> Result<PathBuf> {
    println!("{}", heading.bold());
    println!();
    println!("{}", explanation);
    println!();

    print!("Enter path [{}]: ", default.display().to_string().green());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    let path = if input.is_empty() {
        default
    } else if let Some(stripped) = input.strip_prefix("~/") {
        match dirs::home_dir() {
            Some(home) => home.join(stripped),
            None => PathBuf::from(input),
        }
    } else {
        PathBuf::from(input)
    };

    if !path.exists() {
        println!();
        println!(
            "{}: {} does not exist yet.",
            "Note".yellow(),
            path.display()
        );
    }

    println!();
    Ok(path)
}

fn escape_toml(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
