use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that points at an alternative config file
pub const CONFIG_ENV: &str = "GOODREADS_SYNC_CONFIG";

/// Application configuration loaded from ~/.config/goodreads-sync/config.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub backups: BackupsConfig,
}

/// Configuration for the sync and status commands
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SyncConfig {
    /// Directory holding the markdown book notes
    pub vault: Option<PathBuf>,

    /// Path to goodreads_library_export.csv
    pub export: Option<PathBuf>,

    /// Create notes for books that have none
    #[serde(default)]
    pub create_missing: bool,
}

/// Configuration for note backups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupsConfig {
    /// Copy each note to `<note>.bak` before rewriting it (default: true)
    #[serde(default = "default_backups_enabled")]
    pub enabled: bool,
}

fn default_backups_enabled() -> bool {
    true
}

impl Default for BackupsConfig {
    fn default() -> Self {
        Self {
            enabled: default_backups_enabled(),
        }
    }
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))
    }

    /// Get the config file path, honouring $GOODREADS_SYNC_CONFIG
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }

        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("goodreads-sync").join("config.toml"))
    }

    /// Get the vault path, with CLI override taking precedence
    pub fn vault(&self, cli_override: Option<&PathBuf>) -> Option<PathBuf> {
        cli_override.cloned().or_else(|| self.sync.vault.clone())
    }

    /// Get the export path, with CLI override taking precedence
    pub fn export(&self, cli_override: Option<&PathBuf>) -> Option<PathBuf> {
        cli_override.cloned().or_else(|| self.sync.export.clone())
    }
}
