use std::collections::HashSet;
use stickynote_core::{
    load_notes, BoardError, DeleteOutcome, LoadMode, MemoryKvStore, NoteBoard,
    NoteValidationError, DEFAULT_NOTE_COLOR, DELETE_PROMPT,
};

fn empty_board() -> NoteBoard<MemoryKvStore> {
    NoteBoard::open(MemoryKvStore::new()).unwrap()
}

fn persisted(board: &NoteBoard<MemoryKvStore>) -> Vec<stickynote_core::Note> {
    load_notes(board.store(), LoadMode::Strict).unwrap()
}

#[test]
fn create_prepends_empty_unpinned_note_and_persists() {
    let mut board = empty_board();
    let first = board.create(Some("#FFB3BA")).unwrap();
    let second = board.create(None).unwrap();

    assert_eq!(board.notes()[0].id, second.note.id);
    assert_eq!(board.notes()[1].id, first.note.id);
    assert_eq!(second.note.color, DEFAULT_NOTE_COLOR);
    assert_eq!(first.note.color, "#FFB3BA");
    assert!(second.note.content.is_empty());
    assert!(!second.note.pinned);
    assert!(second.note.created_at > 0);
    assert_eq!(persisted(&board), board.notes());
}

#[test]
fn create_rejects_invalid_color_without_mutation() {
    let mut board = empty_board();
    let err = board.create(Some("not-a-color")).unwrap_err();
    assert!(matches!(
        err,
        BoardError::Validation(NoteValidationError::InvalidColor(_))
    ));
    assert!(board.notes().is_empty());
}

#[test]
fn create_preserves_active_filter_in_returned_view() {
    let mut board = empty_board();
    let existing = board.create(None).unwrap();
    board.edit(&existing.note.id, "shopping").unwrap();
    board.search("SHOP");

    let created = board.create(None).unwrap();
    assert_eq!(created.view.filter, "shop");
    assert_eq!(created.view.len(), 1);
    assert!(created.view.card(&existing.note.id).is_some());
    assert!(created.view.card(&created.note.id).is_none());
}

#[test]
fn repeated_creates_never_duplicate_ids() {
    let mut board = empty_board();
    let mut ids = HashSet::new();
    for _ in 0..200 {
        let created = board.create(None).unwrap();
        assert!(ids.insert(created.note.id));
    }
    assert_eq!(board.notes().len(), 200);
}

#[test]
fn edit_overwrites_content_and_reports_fit_rows() {
    let mut board = empty_board();
    let created = board.create(None).unwrap();

    let rows = board.edit(&created.note.id, "a\nb\nc").unwrap();
    assert_eq!(rows, Some(3));
    assert_eq!(board.note(&created.note.id).unwrap().content, "a\nb\nc");
    assert_eq!(persisted(&board)[0].content, "a\nb\nc");
}

#[test]
fn edit_and_pin_of_unknown_id_are_noops() {
    let mut board = empty_board();
    board.create(None).unwrap();
    let before = board.notes().to_vec();

    assert_eq!(board.edit("stale", "text").unwrap(), None);
    assert_eq!(board.toggle_pin("stale").unwrap(), None);
    assert!(board.export("stale").is_none());
    assert_eq!(board.notes(), before.as_slice());
}

#[test]
fn double_toggle_restores_pin_state_and_keeps_fields() {
    let mut board = empty_board();
    let created = board.create(Some("#BAFFC9")).unwrap();
    board.edit(&created.note.id, "keep me").unwrap();
    let original = board.note(&created.note.id).unwrap().clone();

    let view = board.toggle_pin(&original.id).unwrap().unwrap();
    assert_eq!(view.pinned.len(), 1);
    assert!(board.note(&original.id).unwrap().pinned);

    board.toggle_pin(&original.id).unwrap().unwrap();
    assert_eq!(board.note(&original.id).unwrap(), &original);
    assert_eq!(persisted(&board)[0], original);
}

#[test]
fn confirmed_delete_removes_exactly_one_note() {
    let mut board = empty_board();
    let keep = board.create(None).unwrap().note;
    let gone = board.create(None).unwrap().note;
    board.edit(&keep.id, "survivor").unwrap();
    let keep = board.note(&keep.id).unwrap().clone();

    let mut prompts = Vec::new();
    let outcome = board
        .delete(&gone.id, &mut |prompt: &str| {
            prompts.push(prompt.to_string());
            true
        })
        .unwrap();

    assert!(matches!(outcome, DeleteOutcome::Deleted(ref view) if view.len() == 1));
    assert_eq!(prompts, vec![DELETE_PROMPT.to_string()]);
    assert_eq!(board.notes(), [keep.clone()].as_slice());
    assert_eq!(persisted(&board), vec![keep]);
}

#[test]
fn cancelled_delete_changes_nothing() {
    let mut board = empty_board();
    let note = board.create(None).unwrap().note;

    let outcome = board.delete(&note.id, &mut |_: &str| false).unwrap();
    assert_eq!(outcome, DeleteOutcome::Cancelled);
    assert_eq!(board.notes().len(), 1);
    assert_eq!(persisted(&board).len(), 1);
}

#[test]
fn export_matches_content_bytes_exactly() {
    let mut board = empty_board();
    let note = board.create(None).unwrap().note;

    let empty = board.export(&note.id).unwrap();
    assert_eq!(empty.file_name, format!("note-{}.txt", note.id));
    assert!(empty.bytes.is_empty());

    let text = "  leading spaces\r\ntabs\tand ünïcödé\n";
    board.edit(&note.id, text).unwrap();
    let export = board.export(&note.id).unwrap();
    assert_eq!(export.bytes, text.as_bytes());
}

#[test]
fn search_scenario_is_case_insensitive_substring() {
    let mut board = empty_board();
    let a = board.create(Some("#FFFB7D")).unwrap().note;
    board.edit(&a.id, "hello").unwrap();

    let found = board.search("ELL");
    assert!(found.card(&a.id).is_some());

    let missing = board.search("zzz");
    assert!(missing.card(&a.id).is_none());
    assert!(missing.is_empty());
}

#[test]
fn pin_scenario_splits_regions() {
    let mut board = empty_board();
    let b = board.create(None).unwrap().note;
    let c = board.create(None).unwrap().note;
    assert_eq!(board.notes()[0].id, c.id);

    board.toggle_pin(&b.id).unwrap();
    let view = board.search("");
    let pinned: Vec<&str> = view.pinned.iter().map(|card| card.id.as_str()).collect();
    let unpinned: Vec<&str> = view.unpinned.iter().map(|card| card.id.as_str()).collect();
    assert_eq!(pinned, vec![b.id.as_str()]);
    assert_eq!(unpinned, vec![c.id.as_str()]);
}
