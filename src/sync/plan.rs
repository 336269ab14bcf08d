use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::fresh::fresh_record;
use super::vault::{locate_note, note_path_for, NoteMatch};
use crate::frontmatter::{compute_changes, merge_metadata, read_note, FieldChange, NoteDocument};
use crate::goodreads::{parse_title, GoodreadsBook};

/// Options that shape a sync plan
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Only sync books on this exclusive shelf
    pub shelf: Option<String>,
    /// Create notes for books that have none
    pub create_missing: bool,
}

/// A note whose frontmatter will change
#[derive(Debug, Clone)]
pub struct NoteUpdate {
    pub path: PathBuf,
    pub book_title: String,
    /// The note as it will be written
    pub document: NoteDocument,
    pub changes: Vec<FieldChange>,
    /// True if the note does not exist yet
    pub created: bool,
}

/// A book with no note in the vault
#[derive(Debug, Clone)]
pub struct MissingNote {
    pub book_title: String,
    pub shelf: String,
}

/// A note that could not be read or parsed
#[derive(Debug, Clone)]
pub struct FailedNote {
    pub path: PathBuf,
    pub book_title: String,
    pub reason: String,
}

/// A note matched by more than one book
#[derive(Debug, Clone)]
pub struct Conflict {
    pub path: PathBuf,
    pub book_titles: Vec<String>,
}

/// Result of planning a sync
#[derive(Debug, Default)]
pub struct SyncPlan {
    pub updates: Vec<NoteUpdate>,
    /// Notes already up to date
    pub unchanged: Vec<PathBuf>,
    pub missing: Vec<MissingNote>,
    pub failed: Vec<FailedNote>,
    pub conflicts: Vec<Conflict>,
}

impl SyncPlan {
    /// Match books to notes and compute the merged frontmatter for each
    pub fn build(
        books: &[GoodreadsBook],
        notes: &[PathBuf],
        vault: &Path,
        options: &SyncOptions,
    ) -> Self {
        let mut plan = SyncPlan::default();
        let mut note_to_books: BTreeMap<PathBuf, Vec<&GoodreadsBook>> = BTreeMap::new();

        for book in books.iter().filter(|b| b.is_on_shelf(options.shelf.as_deref())) {
            let parsed = parse_title(&book.title);

            match locate_note(notes, vault, &parsed.title) {
                NoteMatch::Missing if options.create_missing => {
                    let path = note_path_for(vault, &parsed.title);
                    debug!(title = %parsed.title, path = %path.display(), "planning new note");
                    note_to_books.entry(path).or_default().push(book);
                }
                NoteMatch::Missing => {
                    plan.missing.push(MissingNote {
                        book_title: book.title.clone(),
                        shelf: book.exclusive_shelf.clone(),
                    });
                }
                found => {
                    if let Some(path) = found.path() {
                        debug!(title = %parsed.title, path = %path.display(), "matched note");
                        note_to_books.entry(path.to_path_buf()).or_default().push(book);
                    }
                }
            }
        }

        for (path, matched) in note_to_books {
            if matched.len() > 1 {
                plan.conflicts.push(Conflict {
                    path,
                    book_titles: matched.iter().map(|b| b.title.clone()).collect(),
                });
                continue;
            }

            let book = matched[0];
            let created = !path.exists();
            let existing = if created {
                NoteDocument::default()
            } else {
                match read_note(&path) {
                    Ok(document) => document,
                    Err(e) => {
                        plan.failed.push(FailedNote {
                            path,
                            book_title: book.title.clone(),
                            reason: format!("{:#}", e),
                        });
                        continue;
                    }
                }
            };

            let merged = merge_metadata(&fresh_record(book), &existing.frontmatter);
            debug!(path = %path.display(), fields = merged.len(), "merged frontmatter");
            let changes = compute_changes(&existing.frontmatter, &merged);

            if changes.is_empty() && !created {
                plan.unchanged.push(path);
                continue;
            }

            plan.updates.push(NoteUpdate {
                path,
                book_title: book.title.clone(),
                document: NoteDocument {
                    frontmatter: merged,
                    ..existing
                },
                changes,
                created,
            });
        }

        plan
    }

    pub fn new_notes(&self) -> usize {
        self.updates.iter().filter(|u| u.created).count()
    }
}
