use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Result of looking for a book's note in the vault
#[derive(Debug, Clone, PartialEq)]
pub enum NoteMatch {
    Found(PathBuf),
    /// Several notes matched; `chosen` is used and the rest are reported
    Ambiguous {
        chosen: PathBuf,
        others: Vec<PathBuf>,
    },
    Missing,
}

impl NoteMatch {
    pub fn path(&self) -> Option<&Path> {
        match self {
            NoteMatch::Found(path) | NoteMatch::Ambiguous { chosen: path, .. } => Some(path),
            NoteMatch::Missing => None,
        }
    }
}

/// Recursively collect every markdown note under the vault, sorted by path
pub fn scan_vault(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("Vault directory does not exist: {:?}", dir);
    }

    let mut notes: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|path| path.is_file() && is_markdown_file(path))
        .collect();

    notes.sort();
    Ok(notes)
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase() == "md")
        .unwrap_or(false)
}

/// Find the note for a parsed title. A note matches when its file name
/// contains the title; an exact file stem match is preferred.
pub fn find_note(notes: &[PathBuf], title: &str) -> NoteMatch {
    if title.is_empty() {
        return NoteMatch::Missing;
    }

    let mut matches: Vec<&PathBuf> = notes
        .iter()
        .filter(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().contains(title))
                .unwrap_or(false)
        })
        .collect();

    if let Some(exact) = matches
        .iter()
        .position(|path| path.file_stem().is_some_and(|stem| stem.to_string_lossy() == title))
    {
        let chosen = matches.remove(exact);
        matches.insert(0, chosen);
    }

    let mut matches = matches.into_iter().cloned();
    match matches.next() {
        None => NoteMatch::Missing,
        Some(chosen) => {
            let others: Vec<PathBuf> = matches.collect();
            if others.is_empty() {
                NoteMatch::Found(chosen)
            } else {
                warn!(
                    title,
                    chosen = %chosen.display(),
                    others = others.len(),
                    "several notes match this title"
                );
                NoteMatch::Ambiguous { chosen, others }
            }
        }
    }
}

/// Find the note for a parsed title, falling back to the sanitized file
/// name a note created by an earlier sync would have
pub fn locate_note(notes: &[PathBuf], vault: &Path, title: &str) -> NoteMatch {
    match find_note(notes, title) {
        NoteMatch::Missing if !title.is_empty() => {
            let path = note_path_for(vault, title);
            if path.is_file() {
                NoteMatch::Found(path)
            } else {
                NoteMatch::Missing
            }
        }
        found => found,
    }
}

/// Path for a new note named after the book
pub fn note_path_for(vault: &Path, title: &str) -> PathBuf {
    vault.join(format!("{}.md", sanitize_file_name(title)))
}

/// Replace characters that are problematic in file names
fn sanitize_file_name(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}
