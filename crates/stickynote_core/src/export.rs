//! Plain-text note export.
//!
//! # Invariants
//! - Exported bytes equal the note content exactly; no header or metadata.
//! - File names follow `note-<id>.txt`.

use crate::model::note::Note;
use log::info;
use std::path::{Path, PathBuf};

/// Mime type offered with exported files.
pub const EXPORT_MIME_TYPE: &str = "text/plain;charset=utf-8";

/// Downloadable export artifact for one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteExport {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Builds the export artifact for `note`.
pub fn export_note(note: &Note) -> NoteExport {
    NoteExport {
        file_name: export_file_name(&note.id),
        mime_type: EXPORT_MIME_TYPE,
        bytes: note.content.as_bytes().to_vec(),
    }
}

/// Returns `note-<id>.txt`.
pub fn export_file_name(id: &str) -> String {
    format!("note-{id}.txt")
}

/// Writes `export` into `dir`, creating the directory when missing.
///
/// Returns the written file path. An existing file with the same name is
/// overwritten.
pub fn write_export(dir: impl AsRef<Path>, export: &NoteExport) -> std::io::Result<PathBuf> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&export.file_name);
    std::fs::write(&path, &export.bytes)?;
    info!(
        "event=note_export_write module=export status=ok bytes={}",
        export.bytes.len()
    );
    Ok(path)
}
