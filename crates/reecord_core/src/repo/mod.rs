//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define CRUD contracts for notes and users.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Every mutating call runs exactly one statement inside its own
//!   transaction; any failure rolls it back before the error is returned.
//! - "Not found" and "rejected" are `Ok` outcomes (`None`, `false`, `0` rows),
//!   never errors.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::codec::date::DateFormatError;
use crate::model::note::{NoteId, NoteValidationError};
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod note_repo;
pub mod user_repo;

pub type StoreResult<T> = Result<T, StoreError>;

/// Per-call store failure. Recoverable: the store stays usable afterwards.
#[derive(Debug)]
pub enum StoreError {
    /// Statement or transaction failure reported by SQLite.
    Sqlite(rusqlite::Error),
    /// A stored `notes.date` value does not match the date pattern.
    DateFormat(DateFormatError),
    /// The note handed to a write path is invalid.
    Validation(NoteValidationError),
    /// A storage uniqueness constraint rejected the write.
    Conflict(String),
    /// A persisted row violates a model invariant.
    InvalidData(String),
    /// Another caller panicked while holding the connection.
    LockPoisoned,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::DateFormat(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Conflict(message) => write!(f, "conflict: {message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::LockPoisoned => write!(f, "store connection lock poisoned"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::DateFormat(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Conflict(_) | Self::InvalidData(_) | Self::LockPoisoned => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<DateFormatError> for StoreError {
    fn from(value: DateFormatError) -> Self {
        Self::DateFormat(value)
    }
}

impl From<NoteValidationError> for StoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

pub(crate) fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _) if inner.code == ErrorCode::ConstraintViolation
    )
}

/// Maps a note id onto the SQLite rowid space. `None` never matches a row.
pub(crate) fn note_id_to_db(id: NoteId) -> Option<i64> {
    if id == 0 {
        return None;
    }
    i64::try_from(id).ok()
}

pub(crate) fn note_id_from_db(value: i64) -> StoreResult<NoteId> {
    match NoteId::try_from(value) {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(StoreError::InvalidData(format!(
            "invalid id value `{value}` in notes.id"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::{note_id_from_db, note_id_to_db, StoreError};

    #[test]
    fn zero_and_oversized_ids_never_reach_storage() {
        assert_eq!(note_id_to_db(0), None);
        assert_eq!(note_id_to_db(u64::MAX), None);
        assert_eq!(note_id_to_db(42), Some(42));
    }

    #[test]
    fn non_positive_stored_ids_are_invalid_data() {
        assert!(matches!(
            note_id_from_db(0),
            Err(StoreError::InvalidData(_))
        ));
        assert!(matches!(
            note_id_from_db(-7),
            Err(StoreError::InvalidData(_))
        ));
        assert_eq!(note_id_from_db(7).unwrap(), 7);
    }
}
