//! Note board use-case service.
//!
//! # Responsibility
//! - Own the in-memory note list, its backing store and the active filter.
//! - Run every user action as mutate -> persist -> re-render.
//!
//! # Invariants
//! - New notes are prepended; otherwise list order never changes.
//! - Note ids stay unique for the lifetime of the board.
//! - Every successful mutation rewrites the full blob before returning.
//! - Unknown ids are no-ops, not errors.
//! - Delete only happens after an affirmative confirmation.

use crate::export::{export_note, NoteExport};
use crate::model::note::{generate_note_id, Note, NoteValidationError};
use crate::repo::note_repo::{load_notes, save_notes, LoadMode, RepoError};
use crate::store::KvStore;
use crate::view::render::{content_rows, render_notes, NotesView, DELETE_PROMPT};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BoardResult<T> = Result<T, BoardError>;

/// Service error for board use-cases.
#[derive(Debug)]
pub enum BoardError {
    /// Create input rejected.
    Validation(NoteValidationError),
    /// Load or save failure.
    Repo(RepoError),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<NoteValidationError> for BoardError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for BoardError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Blocking yes/no prompt guarding delete.
pub trait DeleteConfirmation {
    /// Returns `true` when the user accepts `prompt`.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> DeleteConfirmation for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Result of a create action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCreated {
    /// The stored note.
    pub note: Note,
    /// Re-render under the preserved filter.
    pub view: NotesView,
}

/// Result of a delete action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Note removed; carries the re-render.
    Deleted(NotesView),
    /// User declined; nothing changed.
    Cancelled,
    /// No note with that id; nothing was asked.
    NotFound,
}

/// Note board: explicit store object replacing page-level globals.
pub struct NoteBoard<S: KvStore> {
    store: S,
    notes: Vec<Note>,
    filter: String,
}

impl<S: KvStore> NoteBoard<S> {
    /// Loads the board from `store`, treating a malformed blob as empty.
    pub fn open(store: S) -> BoardResult<Self> {
        Self::open_with_mode(store, LoadMode::Lenient)
    }

    /// Loads the board from `store` with an explicit malformed-blob policy.
    pub fn open_with_mode(store: S, mode: LoadMode) -> BoardResult<Self> {
        let notes = load_notes(&store, mode)?;
        info!(
            "event=board_open module=board status=ok count={}",
            notes.len()
        );
        Ok(Self {
            store,
            notes,
            filter: String::new(),
        })
    }

    /// Current list, most recently created first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Search text as last typed.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Renders the list under the active filter.
    pub fn render(&self) -> NotesView {
        render_notes(&self.notes, &self.filter)
    }

    /// Replaces the active filter and re-renders. Nothing is persisted.
    pub fn search(&mut self, text: impl Into<String>) -> NotesView {
        self.filter = text.into();
        self.render()
    }

    /// Prepends a new empty note with `color` (default when absent).
    ///
    /// The caller is expected to focus the new note once the returned view
    /// is attached.
    pub fn create(&mut self, color: Option<&str>) -> BoardResult<NoteCreated> {
        let mut note = Note::new(color)?;
        while self.position(&note.id).is_some() {
            note.id = generate_note_id();
        }

        self.notes.insert(0, note.clone());
        self.persist()?;
        info!(
            "event=note_create module=board status=ok note_id={} count={}",
            note.id,
            self.notes.len()
        );
        Ok(NoteCreated {
            note,
            view: self.render(),
        })
    }

    /// Replaces the content of note `id`.
    ///
    /// Returns the auto-fit row count for the edited body, or `None` when no
    /// note has that id. No re-render happens, so the editing surface keeps
    /// its focus.
    pub fn edit(&mut self, id: &str, content: impl Into<String>) -> BoardResult<Option<usize>> {
        let Some(index) = self.position(id) else {
            debug!("event=note_edit module=board status=skipped reason=not_found");
            return Ok(None);
        };

        let note = &mut self.notes[index];
        note.content = content.into();
        let rows = content_rows(&note.content);
        self.persist()?;
        debug!("event=note_edit module=board status=ok note_id={id} rows={rows}");
        Ok(Some(rows))
    }

    /// Flips the pinned flag of note `id` and re-renders.
    pub fn toggle_pin(&mut self, id: &str) -> BoardResult<Option<NotesView>> {
        let Some(index) = self.position(id) else {
            debug!("event=note_pin module=board status=skipped reason=not_found");
            return Ok(None);
        };

        let pinned = !self.notes[index].pinned;
        self.notes[index].pinned = pinned;
        self.persist()?;
        info!("event=note_pin module=board status=ok note_id={id} pinned={pinned}");
        Ok(Some(self.render()))
    }

    /// Removes note `id` after `confirmation` accepts the delete prompt.
    pub fn delete(
        &mut self,
        id: &str,
        confirmation: &mut impl DeleteConfirmation,
    ) -> BoardResult<DeleteOutcome> {
        let Some(index) = self.position(id) else {
            return Ok(DeleteOutcome::NotFound);
        };
        if !confirmation.confirm(DELETE_PROMPT) {
            info!("event=note_delete module=board status=cancelled note_id={id}");
            return Ok(DeleteOutcome::Cancelled);
        }

        self.notes.remove(index);
        self.persist()?;
        info!(
            "event=note_delete module=board status=ok note_id={id} count={}",
            self.notes.len()
        );
        Ok(DeleteOutcome::Deleted(self.render()))
    }

    /// Builds the plain-text export for note `id`. Pure read.
    pub fn export(&self, id: &str) -> Option<NoteExport> {
        self.note(id).map(export_note)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    fn persist(&mut self) -> BoardResult<()> {
        save_notes(&mut self.store, &self.notes)?;
        Ok(())
    }
}
