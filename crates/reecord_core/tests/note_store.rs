use chrono::{NaiveDate, NaiveDateTime};
use reecord_core::db::open_db_in_memory;
use reecord_core::{Note, NoteRepository, NoteValidationError, SqliteNoteRepository, StoreError};

fn t0() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 5)
        .unwrap()
        .and_hms_milli_opt(7, 8, 9, 654)
        .unwrap()
}

fn t0_truncated() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 5)
        .unwrap()
        .and_hms_opt(7, 8, 9)
        .unwrap()
}

#[test]
fn add_then_get_returns_input_with_assigned_id_and_truncated_date() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let note = Note::new("Read later", t0())
        .with_link("example.com/post")
        .with_details("long read")
        .with_author("alice");
    let id = repo.add_note(&note).unwrap();

    let loaded = repo.get_note(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.title, note.title);
    assert_eq!(loaded.link, note.link);
    assert_eq!(loaded.details, note.details);
    assert_eq!(loaded.author, note.author);
    assert_eq!(loaded.date, t0_truncated());
}

#[test]
fn add_ignores_caller_supplied_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let mut note = Note::new("first", t0());
    note.id = 999;
    let id = repo.add_note(&note).unwrap();

    assert_eq!(id, 1);
    assert!(repo.get_note(999).unwrap().is_none());
}

#[test]
fn add_rejects_empty_title_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let err = repo.add_note(&Note::new("", t0())).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(NoteValidationError::EmptyTitle)
    ));
    assert!(repo.list_notes().unwrap().is_empty());
}

#[test]
fn list_on_fresh_store_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    assert!(repo.list_notes().unwrap().is_empty());
}

#[test]
fn list_returns_notes_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    for title in ["c", "a", "b"] {
        repo.add_note(&Note::new(title, t0())).unwrap();
    }

    let titles: Vec<_> = repo
        .list_notes()
        .unwrap()
        .into_iter()
        .map(|note| note.title)
        .collect();
    assert_eq!(titles, vec!["c", "a", "b"]);
}

#[test]
fn note_lifecycle_scenario() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let id = repo
        .add_note(&Note::new("Buy milk", t0()).with_details("2%"))
        .unwrap();
    assert_eq!(id, 1);

    let listed = repo.list_notes().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, 1);
    assert_eq!(listed[0].title, "Buy milk");

    let mut replacement = Note::new("Buy milk", t0()).with_details("whole");
    replacement.id = 1;
    assert_eq!(repo.update_note(&replacement).unwrap(), 1);
    assert_eq!(repo.get_note(1).unwrap().unwrap().details, "whole");

    assert_eq!(repo.remove_note(1).unwrap(), 1);
    assert!(repo.list_notes().unwrap().is_empty());
}

#[test]
fn update_of_missing_note_affects_zero_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let mut ghost = Note::new("ghost", t0());
    ghost.id = 42;
    assert_eq!(repo.update_note(&ghost).unwrap(), 0);

    ghost.id = 0;
    assert_eq!(repo.update_note(&ghost).unwrap(), 0);
    assert!(repo.list_notes().unwrap().is_empty());
}

#[test]
fn update_with_empty_title_is_rejected_and_row_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let id = repo.add_note(&Note::new("keep", t0())).unwrap();
    let mut untitled = Note::new("", t0());
    untitled.id = id;

    assert!(matches!(
        repo.update_note(&untitled).unwrap_err(),
        StoreError::Validation(_)
    ));
    assert_eq!(repo.get_note(id).unwrap().unwrap().title, "keep");
}

#[test]
fn whitespace_title_is_stored_and_read_back_verbatim() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let id = repo.add_note(&Note::new(" ", t0())).unwrap();
    let loaded = repo.get_note(id).unwrap().unwrap();
    assert_eq!(loaded.title, " ");

    let mut retitled = loaded.clone();
    retitled.title = "\t".to_string();
    assert_eq!(repo.update_note(&retitled).unwrap(), 1);
    assert_eq!(repo.get_note(id).unwrap().unwrap().title, "\t");
}

#[test]
fn whitespace_title_rows_do_not_break_listing() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO notes (title, date) VALUES (' ', '2024-03-05 07:08:09');",
        [],
    )
    .unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    repo.add_note(&Note::new("next", t0())).unwrap();

    let titles: Vec<_> = repo
        .list_notes()
        .unwrap()
        .into_iter()
        .map(|note| note.title)
        .collect();
    assert_eq!(titles, vec![" ", "next"]);
}

#[test]
fn unpadded_stored_date_surfaces_as_date_format_error() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO notes (title, date) VALUES ('sloppy', '2024-3-5 7:8:9');",
        [],
    )
    .unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    match repo.get_note(1).unwrap_err() {
        StoreError::DateFormat(err) => assert_eq!(err.value, "2024-3-5 7:8:9"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn remove_of_missing_note_leaves_store_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let id = repo.add_note(&Note::new("stay", t0())).unwrap();
    let before = repo.list_notes().unwrap();

    assert_eq!(repo.remove_note(id + 100).unwrap(), 0);
    assert_eq!(repo.remove_note(0).unwrap(), 0);
    assert_eq!(repo.remove_note(u64::MAX).unwrap(), 0);
    assert_eq!(repo.list_notes().unwrap(), before);
}

#[test]
fn get_of_unknown_ids_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    assert!(repo.get_note(1).unwrap().is_none());
    assert!(repo.get_note(0).unwrap().is_none());
    assert!(repo.get_note(u64::MAX).unwrap().is_none());
}

#[test]
fn ids_are_not_reused_after_remove() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let first = repo.add_note(&Note::new("one", t0())).unwrap();
    repo.remove_note(first).unwrap();
    let second = repo.add_note(&Note::new("two", t0())).unwrap();

    assert!(second > first);
}

#[test]
fn corrupted_date_surfaces_as_date_format_error() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO notes (title, date) VALUES ('broken', '05/03/2024');",
        [],
    )
    .unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    match repo.get_note(1).unwrap_err() {
        StoreError::DateFormat(err) => assert_eq!(err.value, "05/03/2024"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(matches!(
        repo.list_notes().unwrap_err(),
        StoreError::DateFormat(_)
    ));
}

#[test]
fn stored_date_uses_fixed_text_pattern() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let id = repo.add_note(&Note::new("dated", t0())).unwrap();
    let raw: String = conn
        .query_row("SELECT date FROM notes WHERE id = ?1;", [id as i64], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(raw, "2024-03-05 07:08:09");
}

#[test]
fn note_serializes_with_plain_field_names() {
    let note = Note::new("wire", t0_truncated()).with_author("alice");
    let json = serde_json::to_value(&note).unwrap();

    assert_eq!(json["id"], 0);
    assert_eq!(json["title"], "wire");
    assert_eq!(json["author"], "alice");

    let decoded: Note = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, note);
}
