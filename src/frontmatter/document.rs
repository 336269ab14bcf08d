use anyhow::{Context, Result};
use serde_yaml::Value;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use super::value::MetadataRecord;

const FENCE: &str = "---";
const BOM: char = '\u{feff}';

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("frontmatter starts with '---' but is never closed")]
    UnterminatedFrontmatter,
    #[error("failed to serialize frontmatter: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// A markdown note split into its frontmatter and body
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NoteDocument {
    pub frontmatter: MetadataRecord,
    /// Everything after the closing fence, untouched
    pub body: String,
    pub had_frontmatter: bool,
    /// The note started with a byte order mark, written back on render
    pub bom: bool,
}

impl NoteDocument {
    /// Split note content into frontmatter and body.
    ///
    /// Frontmatter that is not valid YAML, or not a mapping, is read as an
    /// empty record so the note can still be synced.
    pub fn parse(content: &str) -> Result<Self, DocumentError> {
        let (bom, content) = match content.strip_prefix(BOM) {
            Some(stripped) => (true, stripped),
            None => (false, content),
        };

        let Some(rest) = strip_opening_fence(content) else {
            return Ok(Self {
                frontmatter: MetadataRecord::new(),
                body: content.to_string(),
                had_frontmatter: false,
                bom,
            });
        };

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == FENCE {
                return Ok(Self {
                    frontmatter: parse_frontmatter(&rest[..offset]),
                    body: rest[offset + line.len()..].to_string(),
                    had_frontmatter: true,
                    bom,
                });
            }
            offset += line.len();
        }

        Err(DocumentError::UnterminatedFrontmatter)
    }

    /// Render the note back to text
    pub fn render(&self) -> Result<String, DocumentError> {
        let mut out = String::new();
        if self.bom {
            out.push(BOM);
        }

        if self.frontmatter.is_empty() {
            if self.had_frontmatter {
                out.push_str(&format!("{FENCE}\n{FENCE}\n"));
            }
        } else {
            let yaml = serde_yaml::to_string(&self.frontmatter.to_mapping())?;
            out.push_str(&format!("{FENCE}\n{yaml}{FENCE}\n"));
        }

        out.push_str(&self.body);
        Ok(out)
    }
}

fn strip_opening_fence(content: &str) -> Option<&str> {
    let (first, rest) = content.split_once('\n')?;
    (first.trim_end() == FENCE).then_some(rest)
}

fn parse_frontmatter(yaml: &str) -> MetadataRecord {
    if yaml.trim().is_empty() {
        return MetadataRecord::new();
    }

    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Mapping(mapping)) => MetadataRecord::from_mapping(mapping),
        Ok(Value::Null) => MetadataRecord::new(),
        Ok(_) => {
            warn!("frontmatter is not a mapping, treating it as empty");
            MetadataRecord::new()
        }
        Err(e) => {
            warn!(error = %e, "frontmatter is not valid YAML, treating it as empty");
            MetadataRecord::new()
        }
    }
}

/// Read and split a note from disk
pub fn read_note(path: &Path) -> Result<NoteDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read note: {}", path.display()))?;

    NoteDocument::parse(&content)
        .with_context(|| format!("Failed to parse note: {}", path.display()))
}

/// Write a note to disk, creating parent directories as needed
pub fn write_note(path: &Path, document: &NoteDocument) -> Result<()> {
    let content = document
        .render()
        .with_context(|| format!("Failed to render note: {}", path.display()))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write note: {}", path.display()))
}
