//! Note use-case service.
//!
//! # Responsibility
//! - Validate caller input before it reaches the store.
//! - Stamp notes with the current time on create/update.
//! - Read back persisted notes after writes.
//!
//! # Invariants
//! - `update_note` is strict: zero affected rows is `NoteNotFound`, unlike the
//!   silent store contract underneath.
//! - Stamped dates are truncated to whole seconds.

use crate::codec::date::truncate_to_seconds;
use crate::model::note::{Note, NoteId, NoteValidationError};
use crate::repo::note_repo::NoteRepository;
use crate::repo::StoreError;
use chrono::{Local, NaiveDateTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Note fields rejected by validation.
    InvalidNote(NoteValidationError),
    /// Note id text could not be parsed.
    InvalidNoteId(String),
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    Store(StoreError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl NoteServiceError {
    /// Whether the caller's input caused the failure, as opposed to storage.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidNote(_) | Self::InvalidNoteId(_) | Self::NoteNotFound(_)
        )
    }
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNote(err) => write!(f, "{err}"),
            Self::InvalidNoteId(value) => write!(f, "invalid note id: `{value}`"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent note state: {details}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidNote(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for NoteServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Validation(err) => Self::InvalidNote(err),
            other => Self::Store(other),
        }
    }
}

impl From<NoteValidationError> for NoteServiceError {
    fn from(value: NoteValidationError) -> Self {
        Self::InvalidNote(value)
    }
}

/// Caller-supplied note fields; id and date are owned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteInput {
    pub title: String,
    pub link: String,
    pub details: String,
    pub author: String,
}

impl NoteInput {
    fn into_note(self, id: NoteId, date: NaiveDateTime) -> Note {
        Note {
            id,
            title: self.title,
            link: self.link,
            details: self.details,
            author: self.author,
            date,
        }
    }
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
    clock: fn() -> NaiveDateTime,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service stamping notes with the local wall clock.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            clock: local_now,
        }
    }

    /// Replaces the clock used to stamp note dates.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// Creates one note dated now and returns it as persisted.
    pub fn create_note(&self, input: NoteInput) -> Result<Note, NoteServiceError> {
        let note = input.into_note(0, self.now());
        note.validate()?;

        let id = self.repo.add_note(&note)?;
        self.repo
            .get_note(id)?
            .ok_or(NoteServiceError::InconsistentState(
                "created note not found in read-back",
            ))
    }

    /// Replaces every field of an existing note and re-dates it.
    pub fn update_note(&self, id: NoteId, input: NoteInput) -> Result<Note, NoteServiceError> {
        let note = input.into_note(id, self.now());
        note.validate()?;

        if self.repo.update_note(&note)? == 0 {
            return Err(NoteServiceError::NoteNotFound(id));
        }

        self.repo
            .get_note(id)?
            .ok_or(NoteServiceError::InconsistentState(
                "updated note not found in read-back",
            ))
    }

    /// Deletes one note. Returns whether a row was removed.
    pub fn delete_note(&self, id: NoteId) -> Result<bool, NoteServiceError> {
        Ok(self.repo.remove_note(id)? > 0)
    }

    pub fn get_note(&self, id: NoteId) -> Result<Option<Note>, NoteServiceError> {
        Ok(self.repo.get_note(id)?)
    }

    /// Lists all notes in insertion order.
    pub fn list_notes(&self) -> Result<Vec<Note>, NoteServiceError> {
        Ok(self.repo.list_notes()?)
    }

    fn now(&self) -> NaiveDateTime {
        truncate_to_seconds((self.clock)())
    }
}

/// Parses a note id received as text (form field, CLI argument).
pub fn parse_note_id(raw: &str) -> Result<NoteId, NoteServiceError> {
    match raw.trim().parse::<NoteId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(NoteServiceError::InvalidNoteId(raw.to_string())),
    }
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::{parse_note_id, NoteServiceError};

    #[test]
    fn parse_note_id_accepts_positive_integers() {
        assert_eq!(parse_note_id("42").unwrap(), 42);
        assert_eq!(parse_note_id(" 7 ").unwrap(), 7);
    }

    #[test]
    fn parse_note_id_rejects_zero_negative_and_text() {
        for raw in ["0", "-1", "abc", "", "1.5"] {
            let err = parse_note_id(raw).unwrap_err();
            assert!(matches!(err, NoteServiceError::InvalidNoteId(_)));
            assert!(err.is_client_error());
        }
    }
}
