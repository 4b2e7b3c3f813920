//! Sticky note domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by board logic.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Deletion removes the note from the list; there are no tombstones.

pub mod note;
