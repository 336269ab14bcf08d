pub mod diff;
pub mod document;
pub mod merge;
mod value;

pub use diff::{compute_changes, format_diff, FieldChange};
pub use document::{read_note, write_note, NoteDocument};
pub use merge::merge_metadata;
pub use value::{MetadataRecord, MetadataValue};
