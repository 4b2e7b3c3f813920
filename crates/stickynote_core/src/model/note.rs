//! Sticky note domain model.
//!
//! # Responsibility
//! - Define the persisted note record and its wire field names.
//! - Generate note identities and resolve note colors.
//!
//! # Invariants
//! - `id` is unique within one note list and never changes after creation.
//! - `color` is fixed at creation time.
//! - `created_at` is recorded for compatibility only; nothing orders by it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid hex color regex"));

/// Opaque note identity, kept as a plain string so previously stored ids load
/// unchanged.
pub type NoteId = String;

/// Color applied when the selector yields no value.
pub const DEFAULT_NOTE_COLOR: &str = "#FFFB7D";

/// Colors offered by the note color selector.
pub const NOTE_PALETTE: &[&str] = &["#FFFB7D", "#FFB3BA", "#BAFFC9", "#BAE1FF", "#E0BBE4"];

/// Validation error for note inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Color is not a `#RRGGBB` value.
    InvalidColor(String),
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidColor(value) => {
                write!(f, "invalid note color `{value}`; expected #RRGGBB")
            }
        }
    }
}

impl Error for NoteValidationError {}

/// One sticky note as stored in the persisted blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable identity used for lookups and export file names.
    pub id: NoteId,
    /// Free-form text body.
    pub content: String,
    /// Background color chosen at creation.
    pub color: String,
    /// Whether the note is shown in the pinned region.
    pub pinned: bool,
    /// Creation time in Unix epoch milliseconds.
    pub created_at: i64,
}

impl Note {
    /// Creates an empty, unpinned note with a generated id and the current
    /// timestamp.
    ///
    /// # Errors
    /// - Returns `InvalidColor` when `color` is present but not `#RRGGBB`.
    pub fn new(color: Option<&str>) -> Result<Self, NoteValidationError> {
        Ok(Self::with_id(
            generate_note_id(),
            resolve_color(color)?,
            chrono::Utc::now().timestamp_millis(),
        ))
    }

    /// Creates an empty, unpinned note from caller-provided parts.
    ///
    /// `color` is taken as-is; `Note::new` resolves it first.
    pub fn with_id(id: impl Into<NoteId>, color: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: id.into(),
            content: String::new(),
            color: color.into(),
            pinned: false,
            created_at,
        }
    }

    /// Case-insensitive literal substring match against `content`.
    ///
    /// `needle` must already be lowercased; an empty needle matches all.
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty() || self.content.to_lowercase().contains(needle)
    }
}

/// Generates a fresh opaque note id.
pub fn generate_note_id() -> NoteId {
    Uuid::new_v4().simple().to_string()
}

/// Resolves selector input into a note color.
///
/// Blank or absent input maps to [`DEFAULT_NOTE_COLOR`].
pub fn resolve_color(color: Option<&str>) -> Result<String, NoteValidationError> {
    let trimmed = color.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Ok(DEFAULT_NOTE_COLOR.to_string());
    }
    if !HEX_COLOR_RE.is_match(trimmed) {
        return Err(NoteValidationError::InvalidColor(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{resolve_color, Note, NoteValidationError, DEFAULT_NOTE_COLOR, NOTE_PALETTE};

    #[test]
    fn resolve_color_falls_back_to_default() {
        assert_eq!(resolve_color(None).unwrap(), DEFAULT_NOTE_COLOR);
        assert_eq!(resolve_color(Some("  ")).unwrap(), DEFAULT_NOTE_COLOR);
    }

    #[test]
    fn resolve_color_rejects_non_hex_values() {
        let err = resolve_color(Some("yellow")).unwrap_err();
        assert_eq!(err, NoteValidationError::InvalidColor("yellow".to_string()));
    }

    #[test]
    fn palette_colors_are_accepted() {
        for color in NOTE_PALETTE {
            assert_eq!(resolve_color(Some(color)).unwrap(), *color);
        }
    }

    #[test]
    fn matches_expects_lowercased_needle() {
        let mut note = Note::with_id("a", DEFAULT_NOTE_COLOR, 0);
        note.content = "Hello World".to_string();
        assert!(note.matches(""));
        assert!(note.matches("lo wo"));
        assert!(!note.matches("xyz"));
    }
}
