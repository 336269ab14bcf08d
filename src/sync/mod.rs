pub mod fresh;
pub mod plan;
pub mod vault;

pub use plan::{Conflict, SyncOptions, SyncPlan};
pub use vault::{locate_note, scan_vault, NoteMatch};
