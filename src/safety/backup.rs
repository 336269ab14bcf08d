use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Copy a note to `<note>.bak` before it is rewritten
pub fn create_backup(note_path: &Path) -> Result<PathBuf> {
    let backup_path = backup_path_for(note_path);

    fs::copy(note_path, &backup_path).with_context(|| {
        format!(
            "Failed to create backup: {} -> {}",
            note_path.display(),
            backup_path.display()
        )
    })?;

    Ok(backup_path)
}

/// Get the backup path for a note
pub fn backup_path_for(note_path: &Path) -> PathBuf {
    let mut backup = note_path.to_path_buf();
    let mut name = backup.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    backup.set_file_name(name);
    backup
}
