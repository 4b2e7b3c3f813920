//! Note list persistence over a key-value store.
//!
//! # Responsibility
//! - Mirror the whole note list into one JSON blob under a fixed key.
//! - Decide how a malformed blob is surfaced on load.
//!
//! # Invariants
//! - `save_notes` always rewrites the full list; there is no incremental write.
//! - Loaded lists keep the stored order and contain unique ids.
//! - A blob with duplicate ids is malformed in strict mode; lenient loads
//!   keep every note and re-key the later duplicates.

use crate::model::note::{generate_note_id, Note};
use crate::store::{KvStore, StoreError};
use log::{debug, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key holding the serialized note list.
pub const NOTES_STORAGE_KEY: &str = "sticky_notes_v2";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for note list load/save.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying key-value store failure.
    Store(StoreError),
    /// Stored blob could not be decoded as a note list.
    MalformedBlob(String),
    /// Note list could not be encoded.
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::MalformedBlob(details) => {
                write!(f, "malformed note blob at `{NOTES_STORAGE_KEY}`: {details}")
            }
            Self::Encode(err) => write!(f, "failed to encode notes: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::MalformedBlob(_) => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// How `load_notes` treats a blob that fails to decode or repeats ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadMode {
    /// Log a warning; undecodable blobs load as an empty list and repeated
    /// ids are re-keyed.
    #[default]
    Lenient,
    /// Return `RepoError::MalformedBlob`.
    Strict,
}

/// Reads the note list from `store`.
///
/// Absent blob yields an empty list in both modes. In `LoadMode::Lenient`
/// a note repeating an earlier id keeps its content under a fresh id.
///
/// # Errors
/// - `Store` when the store itself fails.
/// - `MalformedBlob` in `LoadMode::Strict` when decoding fails or ids repeat.
pub fn load_notes(store: &impl KvStore, mode: LoadMode) -> RepoResult<Vec<Note>> {
    let Some(raw) = store.get(NOTES_STORAGE_KEY)? else {
        debug!("event=notes_load module=repo status=ok source=absent count=0");
        return Ok(Vec::new());
    };

    let mut notes = match decode_notes(&raw) {
        Ok(notes) => notes,
        Err(details) if mode == LoadMode::Strict => {
            return Err(RepoError::MalformedBlob(details));
        }
        Err(_) => {
            warn!(
                "event=notes_load module=repo status=degraded error_code=malformed_blob bytes={}",
                raw.len()
            );
            return Ok(Vec::new());
        }
    };

    let duplicate = first_duplicate_id(&notes).map(str::to_string);
    if let Some(duplicate) = duplicate {
        if mode == LoadMode::Strict {
            return Err(RepoError::MalformedBlob(format!(
                "duplicate note id `{duplicate}`"
            )));
        }
        let reassigned = reassign_duplicate_ids(&mut notes);
        warn!(
            "event=notes_load module=repo status=degraded error_code=duplicate_ids reassigned={reassigned}"
        );
    }

    debug!(
        "event=notes_load module=repo status=ok source=blob count={}",
        notes.len()
    );
    Ok(notes)
}

/// Overwrites the stored blob with the full `notes` list.
pub fn save_notes(store: &mut impl KvStore, notes: &[Note]) -> RepoResult<()> {
    let encoded = serde_json::to_string(notes).map_err(RepoError::Encode)?;
    store.set(NOTES_STORAGE_KEY, &encoded)?;
    debug!(
        "event=notes_save module=repo status=ok count={} bytes={}",
        notes.len(),
        encoded.len()
    );
    Ok(())
}

fn decode_notes(raw: &str) -> Result<Vec<Note>, String> {
    serde_json::from_str(raw).map_err(|err| err.to_string())
}

fn first_duplicate_id(notes: &[Note]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(notes.len());
    notes
        .iter()
        .map(|note| note.id.as_str())
        .find(|id| !seen.insert(*id))
}

/// Gives every note after the first holder of an id a fresh id; returns how
/// many were changed.
fn reassign_duplicate_ids(notes: &mut [Note]) -> usize {
    let mut taken: HashSet<String> = notes.iter().map(|note| note.id.clone()).collect();
    let mut seen = HashSet::with_capacity(notes.len());
    let mut reassigned = 0;
    for note in notes.iter_mut() {
        if seen.insert(note.id.clone()) {
            continue;
        }
        let mut fresh = generate_note_id();
        while taken.contains(&fresh) {
            fresh = generate_note_id();
        }
        taken.insert(fresh.clone());
        seen.insert(fresh.clone());
        note.id = fresh;
        reassigned += 1;
    }
    reassigned
}

#[cfg(test)]
mod tests {
    use super::{decode_notes, first_duplicate_id, reassign_duplicate_ids};

    #[test]
    fn decode_accepts_camel_case_blob() {
        let raw = r##"[{"id":"lq2x8k1a9bc","content":"hi","color":"#FFFB7D","pinned":true,"createdAt":1700000000000}]"##;
        let notes = decode_notes(raw).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, "lq2x8k1a9bc");
        assert!(notes[0].pinned);
        assert_eq!(notes[0].created_at, 1_700_000_000_000);
    }

    #[test]
    fn duplicate_ids_get_fresh_ids_after_the_first() {
        let raw = r##"[
            {"id":"a","content":"one","color":"#FFFB7D","pinned":false,"createdAt":1},
            {"id":"a","content":"two","color":"#FFFB7D","pinned":false,"createdAt":2},
            {"id":"b","content":"three","color":"#FFFB7D","pinned":false,"createdAt":3}
        ]"##;
        let mut notes = decode_notes(raw).unwrap();
        assert_eq!(first_duplicate_id(&notes), Some("a"));

        assert_eq!(reassign_duplicate_ids(&mut notes), 1);
        assert_eq!(notes[0].id, "a");
        assert_ne!(notes[1].id, "a");
        assert_ne!(notes[1].id, "b");
        assert_eq!(notes[1].content, "two");
        assert_eq!(notes[2].id, "b");
        assert_eq!(first_duplicate_id(&notes), None);
    }
}
