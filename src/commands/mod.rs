pub mod init;
pub mod parse_title;
pub mod status;
pub mod sync;

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use crate::config::Config;

/// Resolve the export CSV and vault directory from CLI flags and config
fn resolve_sources(
    config: &Config,
    export_override: Option<&PathBuf>,
    vault_override: Option<&PathBuf>,
) -> Result<(PathBuf, PathBuf)> {
    let export = config
        .export(export_override)
        .context("No export specified. Set [sync] export in config or use --export")?;

    let vault = config
        .vault(vault_override)
        .context("No vault specified. Set [sync] vault in config or use --vault")?;

    if !vault.exists() {
        bail!("Vault directory does not exist: {:?}", vault);
    }
    if !vault.is_dir() {
        bail!("Vault path is not a directory: {:?}", vault);
    }

    Ok((export, vault))
}
