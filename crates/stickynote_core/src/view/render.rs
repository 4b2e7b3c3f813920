//! Pure note list rendering.
//!
//! # Responsibility
//! - Split a note list into pinned and unpinned regions under a search filter.
//! - Project each visible note into a card with its presentation state.
//!
//! # Invariants
//! - Both regions keep the relative order of the source list.
//! - A note appears in at most one region, chosen by `pinned`.
//! - Every call builds fresh cards; nothing is carried over between renders.

use crate::model::note::{Note, NoteId};

/// Pin button icon for pinned notes.
pub const PIN_ICON_ACTIVE: &str = "📌";
/// Pin button icon for unpinned notes.
pub const PIN_ICON_IDLE: &str = "📍";
/// Export button tooltip.
pub const EXPORT_TITLE: &str = "Download (.txt)";
/// Delete button tooltip.
pub const DELETE_TITLE: &str = "Delete note";
/// Blocking confirmation prompt shown before delete.
pub const DELETE_PROMPT: &str = "Delete this note?";

/// Render-time projection of one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
    pub id: NoteId,
    pub content: String,
    /// Card background.
    pub color: String,
    pub pinned: bool,
    /// `Unpin` for pinned notes, `Pin` otherwise.
    pub pin_title: &'static str,
    pub pin_icon: &'static str,
    pub export_title: &'static str,
    pub delete_title: &'static str,
    /// Auto-fit body height in text rows.
    pub rows: usize,
}

impl NoteCard {
    fn from_note(note: &Note) -> Self {
        Self {
            id: note.id.clone(),
            content: note.content.clone(),
            color: note.color.clone(),
            pinned: note.pinned,
            pin_title: if note.pinned { "Unpin" } else { "Pin" },
            pin_icon: if note.pinned {
                PIN_ICON_ACTIVE
            } else {
                PIN_ICON_IDLE
            },
            export_title: EXPORT_TITLE,
            delete_title: DELETE_TITLE,
            rows: content_rows(&note.content),
        }
    }
}

/// Both display regions for one render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesView {
    /// Normalized filter the view was built with.
    pub filter: String,
    pub pinned: Vec<NoteCard>,
    pub unpinned: Vec<NoteCard>,
}

impl NotesView {
    /// Number of cards across both regions.
    pub fn len(&self) -> usize {
        self.pinned.len() + self.unpinned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pinned.is_empty() && self.unpinned.is_empty()
    }

    /// Iterates pinned cards first, then unpinned.
    pub fn cards(&self) -> impl Iterator<Item = &NoteCard> {
        self.pinned.iter().chain(self.unpinned.iter())
    }

    /// Finds a rendered card by note id.
    pub fn card(&self, id: &str) -> Option<&NoteCard> {
        self.cards().find(|card| card.id == id)
    }
}

/// Trims and case-folds raw search input.
pub fn normalize_filter(filter: &str) -> String {
    filter.trim().to_lowercase()
}

/// Builds the pinned/unpinned regions for `notes` under `filter`.
///
/// Matching is literal, case-insensitive substring containment; an empty
/// (or whitespace-only) filter matches every note.
pub fn render_notes(notes: &[Note], filter: &str) -> NotesView {
    let needle = normalize_filter(filter);
    let (pinned, unpinned): (Vec<&Note>, Vec<&Note>) = notes
        .iter()
        .filter(|note| note.matches(&needle))
        .partition(|note| note.pinned);

    NotesView {
        filter: needle,
        pinned: pinned.into_iter().map(NoteCard::from_note).collect(),
        unpinned: unpinned.into_iter().map(NoteCard::from_note).collect(),
    }
}

/// Rows needed to show `content` without scrolling; never below one.
pub fn content_rows(content: &str) -> usize {
    content.lines().count().max(1) + usize::from(content.ends_with('\n'))
}

#[cfg(test)]
mod tests {
    use super::{content_rows, normalize_filter};

    #[test]
    fn content_rows_grow_with_lines() {
        assert_eq!(content_rows(""), 1);
        assert_eq!(content_rows("one"), 1);
        assert_eq!(content_rows("one\ntwo"), 2);
        assert_eq!(content_rows("one\ntwo\n"), 3);
    }

    #[test]
    fn normalize_filter_trims_and_lowercases() {
        assert_eq!(normalize_filter("  ELL "), "ell");
    }
}
