//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the note board actions to Dart via FRB as sync calls.
//! - Translate board views into flat, UI-ready envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Board calls are serialized: each one loads, mutates, persists and
//!   renders before the next starts.
//! - Every board response carries the view rendered under the caller's
//!   current search text.

use log::error;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use stickynote_core::{
    core_version as core_version_inner, dispatch, init_logging as init_logging_inner,
    ping as ping_inner, BoardResult, DeleteOutcome, NoteBoard, NoteCard, NotesView,
    SqliteKvStore, StickyConfig, UiEffect, UiEvent, NOTE_PALETTE,
};

static BOARD_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static BOARD_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes the core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and an error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Creation palette, default color first.
#[flutter_rust_bridge::frb(sync)]
pub fn note_palette() -> Vec<String> {
    NOTE_PALETTE.iter().map(|color| color.to_string()).collect()
}

/// One rendered note card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCardItem {
    pub note_id: String,
    pub content: String,
    pub color: String,
    pub pinned: bool,
    /// Pin button tooltip (`Pin` / `Unpin`).
    pub pin_title: String,
    pub pin_icon: String,
    /// Export button tooltip.
    pub export_title: String,
    /// Delete button tooltip.
    pub delete_title: String,
    /// Auto-fit body height in text rows.
    pub rows: u32,
}

/// Board view envelope returned by every board action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardViewResponse {
    pub ok: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
    /// Pinned region, list order.
    pub pinned: Vec<NoteCardItem>,
    /// Main region, list order.
    pub unpinned: Vec<NoteCardItem>,
    /// Note whose body should receive focus after the view is attached.
    pub focus_note_id: Option<String>,
}

impl BoardViewResponse {
    fn success(message: impl Into<String>, view: &NotesView) -> Self {
        Self {
            ok: true,
            message: message.into(),
            pinned: view.pinned.iter().map(to_card_item).collect(),
            unpinned: view.unpinned.iter().map(to_card_item).collect(),
            focus_note_id: None,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            pinned: Vec::new(),
            unpinned: Vec::new(),
            focus_note_id: None,
        }
    }
}

/// Result of one content keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEditResponse {
    pub ok: bool,
    /// Whether the note existed.
    pub found: bool,
    /// Auto-fit body height after the edit.
    pub rows: u32,
    pub message: String,
}

/// Downloadable export payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteExportResponse {
    pub ok: bool,
    /// `note-<id>.txt` when found.
    pub file_name: Option<String>,
    pub mime_type: String,
    /// Exact note content bytes.
    pub bytes: Vec<u8>,
    pub message: String,
}

/// Renders the board under `filter` (live search input).
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn board_render(filter: String) -> BoardViewResponse {
    match with_board(|board| Ok(board.search(filter))) {
        Ok(view) => BoardViewResponse::success(count_message(&view), &view),
        Err(err) => BoardViewResponse::failure(format!("board_render failed: {err}")),
    }
}

/// Creates an empty note with `color` (default when empty) and re-renders
/// under `filter`. `focus_note_id` names the new note only when its card is
/// part of the returned view.
#[flutter_rust_bridge::frb(sync)]
pub fn note_create(color: Option<String>, filter: String) -> BoardViewResponse {
    let result = with_board(|board| {
        board.search(filter);
        board.create(color.as_deref())
    });
    match result {
        Ok(created) => {
            let mut response = BoardViewResponse::success("Note created.", &created.view);
            if created.view.card(&created.note.id).is_some() {
                response.focus_note_id = Some(created.note.id);
            }
            response
        }
        Err(err) => BoardViewResponse::failure(format!("note_create failed: {err}")),
    }
}

/// Replaces note content on every keystroke. No re-render.
#[flutter_rust_bridge::frb(sync)]
pub fn note_edit(note_id: String, content: String) -> NoteEditResponse {
    match with_board(|board| board.edit(&note_id, content)) {
        Ok(Some(rows)) => NoteEditResponse {
            ok: true,
            found: true,
            rows: rows_u32(rows),
            message: "Note updated.".to_string(),
        },
        Ok(None) => NoteEditResponse {
            ok: true,
            found: false,
            rows: 0,
            message: "Note not found.".to_string(),
        },
        Err(err) => NoteEditResponse {
            ok: false,
            found: false,
            rows: 0,
            message: format!("note_edit failed: {err}"),
        },
    }
}

/// Toggles the pinned flag and re-renders under `filter`.
#[flutter_rust_bridge::frb(sync)]
pub fn note_toggle_pin(note_id: String, filter: String) -> BoardViewResponse {
    let result = with_board(|board| {
        board.search(filter);
        let toggled = board.toggle_pin(&note_id)?;
        Ok((toggled.is_some(), board.render()))
    });
    match result {
        Ok((true, view)) => BoardViewResponse::success("Pin toggled.", &view),
        Ok((false, view)) => BoardViewResponse::success("Note not found.", &view),
        Err(err) => BoardViewResponse::failure(format!("note_toggle_pin failed: {err}")),
    }
}

/// Deletes a note. The Dart side shows the blocking confirmation dialog and
/// passes its answer as `confirmed`.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(note_id: String, confirmed: bool, filter: String) -> BoardViewResponse {
    let result = with_board(|board| {
        board.search(filter);
        let outcome = board.delete(&note_id, &mut |_: &str| confirmed)?;
        Ok((outcome, board.render()))
    });
    match result {
        Ok((DeleteOutcome::Deleted(_), view)) => BoardViewResponse::success("Note deleted.", &view),
        Ok((DeleteOutcome::Cancelled, view)) => BoardViewResponse::success("Delete cancelled.", &view),
        Ok((DeleteOutcome::NotFound, view)) => BoardViewResponse::success("Note not found.", &view),
        Err(err) => BoardViewResponse::failure(format!("note_delete failed: {err}")),
    }
}

/// Builds the plain-text download for a note. Pure read.
#[flutter_rust_bridge::frb(sync)]
pub fn note_export(note_id: String) -> NoteExportResponse {
    match with_board(|board| Ok(board.export(&note_id))) {
        Ok(Some(export)) => NoteExportResponse {
            ok: true,
            file_name: Some(export.file_name),
            mime_type: export.mime_type.to_string(),
            bytes: export.bytes,
            message: "Export ready.".to_string(),
        },
        Ok(None) => NoteExportResponse {
            ok: false,
            file_name: None,
            mime_type: String::new(),
            bytes: Vec::new(),
            message: "Note not found.".to_string(),
        },
        Err(err) => NoteExportResponse {
            ok: false,
            file_name: None,
            mime_type: String::new(),
            bytes: Vec::new(),
            message: format!("note_export failed: {err}"),
        },
    }
}

/// Global key handler. Ctrl+N / Cmd+N creates a note with `color`; any other
/// key leaves the board untouched and returns the current view.
#[flutter_rust_bridge::frb(sync)]
pub fn board_key_down(
    key: String,
    ctrl: bool,
    meta: bool,
    color: Option<String>,
    filter: String,
) -> BoardViewResponse {
    let result = with_board(|board| {
        board.search(filter);
        let event = UiEvent::KeyDown {
            key,
            ctrl,
            meta,
            color,
        };
        let before = board.notes().len();
        let effects = dispatch(board, event, &mut |_: &str| false)?;
        Ok((board.notes().len() != before, effects, board.render()))
    });

    match result {
        Ok((board_changed, effects, view)) => {
            let focus = effects.into_iter().find_map(|effect| match effect {
                UiEffect::Focus { id } => Some(id),
                _ => None,
            });
            let message = if board_changed {
                "Note created."
            } else {
                "Key ignored."
            };
            let mut response = BoardViewResponse::success(message, &view);
            response.focus_note_id = focus;
            response
        }
        Err(err) => BoardViewResponse::failure(format!("board_key_down failed: {err}")),
    }
}

fn resolve_board_db_path() -> PathBuf {
    BOARD_DB_PATH
        .get_or_init(|| StickyConfig::from_env().db_path)
        .clone()
}

fn with_board<T>(
    f: impl FnOnce(&mut NoteBoard<SqliteKvStore>) -> BoardResult<T>,
) -> Result<T, String> {
    // Saves rewrite the whole blob, so a poisoned lock leaves no partial state.
    let _guard = BOARD_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let db_path = resolve_board_db_path();
    let store = SqliteKvStore::open(&db_path).map_err(|err| {
        error!("event=ffi_board_open module=ffi status=error error={err}");
        format!("board DB open failed: {err}")
    })?;
    let mut board = NoteBoard::open(store).map_err(|err| format!("board load failed: {err}"))?;
    f(&mut board).map_err(|err| err.to_string())
}

fn count_message(view: &NotesView) -> String {
    if view.is_empty() {
        "No notes.".to_string()
    } else {
        format!("Showing {} note(s).", view.len())
    }
}

fn to_card_item(card: &NoteCard) -> NoteCardItem {
    NoteCardItem {
        note_id: card.id.clone(),
        content: card.content.clone(),
        color: card.color.clone(),
        pinned: card.pinned,
        pin_title: card.pin_title.to_string(),
        pin_icon: card.pin_icon.to_string(),
        export_title: card.export_title.to_string(),
        delete_title: card.delete_title.to_string(),
        rows: rows_u32(card.rows),
    }
}

fn rows_u32(rows: usize) -> u32 {
    u32::try_from(rows).unwrap_or(u32::MAX)
}
