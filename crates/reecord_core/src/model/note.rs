//! Note domain model.
//!
//! # Responsibility
//! - Define the note record stored in the `notes` relation.
//! - Provide presentation helpers used when rendering note lists.
//!
//! # Invariants
//! - `id` is assigned by storage and never changes afterwards.
//! - `id == 0` marks a note that has not been persisted yet.
//! - `title` is never empty for a persisted note.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned note identifier. Zero means "not persisted".
pub type NoteId = u64;

/// Validation errors for note write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyTitle,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title must not be empty"),
        }
    }
}

impl Error for NoteValidationError {}

/// A single recorded note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Populated by storage on insert; ignored by `add_note`.
    pub id: NoteId,
    pub title: String,
    pub link: String,
    pub details: String,
    /// Username of the creating user.
    pub author: String,
    /// Assigned by the caller. Storage keeps second precision only.
    pub date: NaiveDateTime,
}

impl Note {
    /// Creates an unsaved note with empty link/details/author.
    pub fn new(title: impl Into<String>, date: NaiveDateTime) -> Self {
        Self {
            id: 0,
            title: title.into(),
            link: String::new(),
            details: String::new(),
            author: String::new(),
            date,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Returns whether storage has assigned an id to this note.
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.title.is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Renders the date as `"<day> - <Month> - <year>"`, e.g. `5 - March - 2024`.
    pub fn pretty_date(&self) -> String {
        format!(
            "{} - {} - {}",
            self.date.day(),
            self.date.format("%B"),
            self.date.year()
        )
    }

    /// Returns the link with an `https://` scheme when none is present.
    pub fn render_link(&self) -> String {
        if self.link.starts_with("http") {
            self.link.clone()
        } else {
            format!("https://{}", self.link)
        }
    }
}
