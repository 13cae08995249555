//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide add/update/remove/get/list over the `notes` relation.
//! - Encode and decode `notes.date` through the date codec.
//!
//! # Invariants
//! - Write paths call `Note::validate()` before SQL mutations.
//! - `add_note` ignores the caller's `id`; storage assigns it.
//! - Update/remove report affected rows; zero rows is not an error.
//! - `list_notes` returns notes in insertion order.

use crate::codec::date::{deserialize_date, serialize_date};
use crate::model::note::{Note, NoteId};
use crate::repo::{note_id_from_db, note_id_to_db, StoreError, StoreResult};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    title,
    link,
    details,
    author,
    date
FROM notes";

/// Repository interface for note CRUD operations.
pub trait NoteRepository {
    /// Inserts a new note and returns the storage-assigned id.
    fn add_note(&self, note: &Note) -> StoreResult<NoteId>;
    /// Replaces every field of the note keyed on `note.id`.
    fn update_note(&self, note: &Note) -> StoreResult<usize>;
    /// Deletes the note keyed on `id`.
    fn remove_note(&self, id: NoteId) -> StoreResult<usize>;
    fn get_note(&self, id: NoteId) -> StoreResult<Option<Note>>;
    fn list_notes(&self) -> StoreResult<Vec<Note>>;
}

impl<T: NoteRepository + ?Sized> NoteRepository for &T {
    fn add_note(&self, note: &Note) -> StoreResult<NoteId> {
        (**self).add_note(note)
    }

    fn update_note(&self, note: &Note) -> StoreResult<usize> {
        (**self).update_note(note)
    }

    fn remove_note(&self, id: NoteId) -> StoreResult<usize> {
        (**self).remove_note(id)
    }

    fn get_note(&self, id: NoteId) -> StoreResult<Option<Note>> {
        (**self).get_note(id)
    }

    fn list_notes(&self) -> StoreResult<Vec<Note>> {
        (**self).list_notes()
    }
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Wraps a connection whose schema has already been ensured.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn begin(&self) -> StoreResult<Transaction<'conn>> {
        Ok(Transaction::new_unchecked(
            self.conn,
            TransactionBehavior::Immediate,
        )?)
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn add_note(&self, note: &Note) -> StoreResult<NoteId> {
        note.validate()?;

        let tx = self.begin()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO notes (title, link, details, author, date)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
            )?;
            stmt.execute(params![
                note.title.as_str(),
                note.link.as_str(),
                note.details.as_str(),
                note.author.as_str(),
                serialize_date(note.date),
            ])?;
        }
        let id = note_id_from_db(tx.last_insert_rowid())?;
        tx.commit()?;

        Ok(id)
    }

    fn update_note(&self, note: &Note) -> StoreResult<usize> {
        note.validate()?;
        let Some(id) = note_id_to_db(note.id) else {
            return Ok(0);
        };

        let tx = self.begin()?;
        let changed = {
            let mut stmt = tx.prepare(
                "UPDATE notes
                 SET
                    title = ?1,
                    link = ?2,
                    details = ?3,
                    author = ?4,
                    date = ?5
                 WHERE id = ?6;",
            )?;
            stmt.execute(params![
                note.title.as_str(),
                note.link.as_str(),
                note.details.as_str(),
                note.author.as_str(),
                serialize_date(note.date),
                id,
            ])?
        };
        tx.commit()?;

        Ok(changed)
    }

    fn remove_note(&self, id: NoteId) -> StoreResult<usize> {
        let Some(id) = note_id_to_db(id) else {
            return Ok(0);
        };

        let tx = self.begin()?;
        let changed = {
            let mut stmt = tx.prepare("DELETE FROM notes WHERE id = ?1;")?;
            stmt.execute([id])?
        };
        tx.commit()?;

        Ok(changed)
    }

    fn get_note(&self, id: NoteId) -> StoreResult<Option<Note>> {
        let Some(id) = note_id_to_db(id) else {
            return Ok(None);
        };

        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }

        Ok(None)
    }

    fn list_notes(&self) -> StoreResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();

        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        Ok(notes)
    }
}

fn parse_note_row(row: &Row<'_>) -> StoreResult<Note> {
    let id = note_id_from_db(row.get("id")?)?;
    let date_text: String = row.get("date")?;

    let note = Note {
        id,
        title: row.get("title")?,
        link: row.get("link")?,
        details: row.get("details")?,
        author: row.get("author")?,
        date: deserialize_date(&date_text)?,
    };
    if note.validate().is_err() {
        return Err(StoreError::InvalidData(format!(
            "empty title in notes row {id}"
        )));
    }
    Ok(note)
}
