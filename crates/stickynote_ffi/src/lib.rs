//! Flutter bridge crate for StickyNote.

pub mod api;
