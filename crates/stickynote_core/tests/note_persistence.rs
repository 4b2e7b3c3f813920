use stickynote_core::{
    load_notes, save_notes, KvStore, LoadMode, MemoryKvStore, Note, NoteBoard, RepoError,
    SqliteKvStore, NOTES_STORAGE_KEY,
};

fn sample_notes() -> Vec<Note> {
    let mut first = Note::with_id("lq2x8k1a9bc", "#FFFB7D", 1_700_000_000_000);
    first.content = "groceries\n- milk".to_string();
    first.pinned = true;
    let mut second = Note::with_id("lq2x8k2zz01", "#BAE1FF", 1_699_999_000_000);
    second.content = String::new();
    vec![first, second]
}

#[test]
fn save_then_load_preserves_content_and_order() {
    let mut store = MemoryKvStore::new();
    let notes = sample_notes();

    save_notes(&mut store, &notes).unwrap();
    let loaded = load_notes(&store, LoadMode::Strict).unwrap();
    assert_eq!(loaded, notes);

    save_notes(&mut store, &loaded).unwrap();
    assert_eq!(load_notes(&store, LoadMode::Strict).unwrap(), notes);
}

#[test]
fn stored_blob_uses_camel_case_fields() {
    let mut store = MemoryKvStore::new();
    save_notes(&mut store, &sample_notes()).unwrap();

    let raw = store.get(NOTES_STORAGE_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &json[0];
    assert_eq!(first["id"], "lq2x8k1a9bc");
    assert_eq!(first["color"], "#FFFB7D");
    assert_eq!(first["pinned"], true);
    assert_eq!(first["createdAt"], 1_700_000_000_000_i64);
    assert!(first.get("created_at").is_none());
}

#[test]
fn absent_blob_loads_as_empty_list() {
    let store = MemoryKvStore::new();
    assert!(load_notes(&store, LoadMode::Strict).unwrap().is_empty());
    assert!(load_notes(&store, LoadMode::Lenient).unwrap().is_empty());
}

#[test]
fn malformed_blob_is_empty_when_lenient_and_error_when_strict() {
    let store = MemoryKvStore::new().with_entry(NOTES_STORAGE_KEY, "{not json");

    assert!(load_notes(&store, LoadMode::Lenient).unwrap().is_empty());
    let err = load_notes(&store, LoadMode::Strict).unwrap_err();
    assert!(matches!(err, RepoError::MalformedBlob(_)), "unexpected: {err}");
}

#[test]
fn board_open_recovers_from_malformed_blob_and_overwrites_it() {
    let store = MemoryKvStore::new().with_entry(NOTES_STORAGE_KEY, "[{\"id\":1}]");
    let mut board = NoteBoard::open(store).unwrap();
    assert!(board.notes().is_empty());

    let created = board.create(None).unwrap();
    let store = board.into_store();
    let reloaded = load_notes(&store, LoadMode::Strict).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].id, created.note.id);
}

#[test]
fn duplicate_ids_keep_every_note_when_lenient_and_error_when_strict() {
    let blob = r##"[
        {"id":"a","content":"first","color":"#FFFB7D","pinned":false,"createdAt":1},
        {"id":"a","content":"second","color":"#FFB3BA","pinned":true,"createdAt":2},
        {"id":"b","content":"third","color":"#BAFFC9","pinned":false,"createdAt":3}
    ]"##;
    let store = MemoryKvStore::new().with_entry(NOTES_STORAGE_KEY, blob);

    let err = load_notes(&store, LoadMode::Strict).unwrap_err();
    assert!(matches!(err, RepoError::MalformedBlob(ref details) if details.contains("duplicate")));

    let mut board = NoteBoard::open(store).unwrap();
    let contents: Vec<&str> = board.notes().iter().map(|n| n.content.as_str()).collect();
    assert_eq!(contents, vec!["first", "second", "third"]);
    assert_eq!(board.notes()[0].id, "a");
    assert_eq!(board.notes()[2].id, "b");
    let rekeyed = board.notes()[1].id.clone();
    assert!(rekeyed != "a" && rekeyed != "b");

    board.create(None).unwrap();
    let reloaded = load_notes(board.store(), LoadMode::Strict).unwrap();
    assert_eq!(reloaded.len(), 4);
    assert_eq!(reloaded[2].id, rekeyed);
    assert_eq!(reloaded[2].content, "second");
    assert!(reloaded[2].pinned);
}

#[test]
fn strict_board_open_surfaces_malformed_blob() {
    let store = MemoryKvStore::new().with_entry(NOTES_STORAGE_KEY, "null-ish");
    assert!(NoteBoard::open_with_mode(store, LoadMode::Strict).is_err());
}

#[test]
fn sqlite_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.sqlite3");

    let note_id = {
        let mut board = NoteBoard::open(SqliteKvStore::open(&path).unwrap()).unwrap();
        let created = board.create(Some("#E0BBE4")).unwrap();
        board.edit(&created.note.id, "persisted text").unwrap();
        created.note.id
    };

    let board = NoteBoard::open(SqliteKvStore::open(&path).unwrap()).unwrap();
    let note = board.note(&note_id).expect("note should be reloaded");
    assert_eq!(note.content, "persisted text");
    assert_eq!(note.color, "#E0BBE4");
}

#[test]
fn sqlite_store_set_overwrites_single_row() {
    let mut store = SqliteKvStore::open_in_memory().unwrap();
    store.set(NOTES_STORAGE_KEY, "[]").unwrap();
    store.set(NOTES_STORAGE_KEY, "[ ]").unwrap();

    let rows: i64 = store
        .connection()
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
    assert_eq!(store.get(NOTES_STORAGE_KEY).unwrap().as_deref(), Some("[ ]"));
    assert!(store.remove(NOTES_STORAGE_KEY).unwrap());
    assert_eq!(store.get(NOTES_STORAGE_KEY).unwrap(), None);
}
