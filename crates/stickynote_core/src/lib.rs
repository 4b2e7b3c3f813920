//! Core domain logic for StickyNote.
//! This crate is the single source of truth for note board invariants.

pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;

pub use config::StickyConfig;
pub use export::{export_file_name, export_note, write_export, NoteExport, EXPORT_MIME_TYPE};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{
    generate_note_id, resolve_color, Note, NoteId, NoteValidationError, DEFAULT_NOTE_COLOR,
    NOTE_PALETTE,
};
pub use repo::note_repo::{
    load_notes, save_notes, LoadMode, RepoError, RepoResult, NOTES_STORAGE_KEY,
};
pub use service::board_service::{
    BoardError, BoardResult, DeleteConfirmation, DeleteOutcome, NoteBoard, NoteCreated,
};
pub use service::events::{dispatch, is_new_note_shortcut, UiEffect, UiEvent};
pub use store::{KvStore, MemoryKvStore, SqliteKvStore, StoreError, StoreResult};
pub use view::render::{content_rows, render_notes, NoteCard, NotesView, DELETE_PROMPT};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
