//! UI event dispatch for the note board.
//!
//! # Responsibility
//! - Map front-end events (clicks, keystrokes, search input) onto board
//!   use-cases.
//! - Describe the resulting screen work as an ordered list of effects.
//!
//! # Invariants
//! - Each event runs to completion before the next one is accepted.
//! - Deferred effects (`Focus`, `FitHeight`) always follow the `Render` they
//!   depend on, because they need the rendered cards to exist.
//! - `Focus` and `FitHeight` only name cards present in the preceding
//!   `Render`; a note created under a search that hides it gets no focus.
//! - Ctrl+N / Cmd+N behaves exactly like a create click.

use crate::export::NoteExport;
use crate::model::note::NoteId;
use crate::service::board_service::{
    BoardResult, DeleteConfirmation, DeleteOutcome, NoteBoard,
};
use crate::store::KvStore;
use crate::view::render::NotesView;

/// Input event produced by a front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Create button pressed with the selector's current color.
    CreateClicked { color: Option<String> },
    /// One keystroke landed in a note body; `content` is the full new text.
    ContentInput { id: NoteId, content: String },
    PinClicked { id: NoteId },
    DeleteClicked { id: NoteId },
    ExportClicked { id: NoteId },
    /// Live search input; fires on every keystroke.
    SearchInput { text: String },
    /// Global key press. `color` is the selector's current value.
    KeyDown {
        key: String,
        ctrl: bool,
        meta: bool,
        color: Option<String>,
    },
}

/// Screen work requested by a handled event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Replace both regions with this view.
    Render(NotesView),
    /// Offer this file for download.
    Download(NoteExport),
    /// Deferred: move input focus into the body of note `id`.
    Focus { id: NoteId },
    /// Deferred: size the body of note `id` to `rows` text rows.
    FitHeight { id: NoteId, rows: usize },
}

/// Returns whether a key press is the platform "new note" shortcut.
pub fn is_new_note_shortcut(key: &str, ctrl: bool, meta: bool) -> bool {
    (ctrl || meta) && key.eq_ignore_ascii_case("n")
}

/// Runs `event` against `board` and returns the effects to apply, in order.
///
/// `confirmation` is consulted only for `DeleteClicked`.
pub fn dispatch<S: KvStore>(
    board: &mut NoteBoard<S>,
    event: UiEvent,
    confirmation: &mut impl DeleteConfirmation,
) -> BoardResult<Vec<UiEffect>> {
    match event {
        UiEvent::CreateClicked { color } => create(board, color.as_deref()),
        UiEvent::KeyDown {
            key,
            ctrl,
            meta,
            color,
        } => {
            if is_new_note_shortcut(&key, ctrl, meta) {
                create(board, color.as_deref())
            } else {
                Ok(Vec::new())
            }
        }
        UiEvent::ContentInput { id, content } => Ok(board
            .edit(&id, content)?
            .map(|rows| vec![UiEffect::FitHeight { id, rows }])
            .unwrap_or_default()),
        UiEvent::PinClicked { id } => Ok(board
            .toggle_pin(&id)?
            .map(render_effects)
            .unwrap_or_default()),
        UiEvent::DeleteClicked { id } => match board.delete(&id, confirmation)? {
            DeleteOutcome::Deleted(view) => Ok(render_effects(view)),
            DeleteOutcome::Cancelled | DeleteOutcome::NotFound => Ok(Vec::new()),
        },
        UiEvent::ExportClicked { id } => Ok(board
            .export(&id)
            .map(|export| vec![UiEffect::Download(export)])
            .unwrap_or_default()),
        UiEvent::SearchInput { text } => Ok(render_effects(board.search(text))),
    }
}

fn create<S: KvStore>(board: &mut NoteBoard<S>, color: Option<&str>) -> BoardResult<Vec<UiEffect>> {
    let created = board.create(color)?;
    let rendered = created.view.card(&created.note.id).is_some();
    let mut effects = render_effects(created.view);
    if rendered {
        effects.push(UiEffect::Focus {
            id: created.note.id,
        });
    }
    Ok(effects)
}

/// A render followed by the deferred height fit of every rendered card.
fn render_effects(view: NotesView) -> Vec<UiEffect> {
    let fits = view
        .cards()
        .map(|card| UiEffect::FitHeight {
            id: card.id.clone(),
            rows: card.rows,
        })
        .collect::<Vec<_>>();
    let mut effects = Vec::with_capacity(fits.len() + 1);
    effects.push(UiEffect::Render(view));
    effects.extend(fits);
    effects
}
