//! Repository layer over the local key-value store.
//!
//! # Responsibility
//! - Define how the note list is encoded into and decoded from storage.
//! - Keep serialization details out of board orchestration.

pub mod note_repo;
