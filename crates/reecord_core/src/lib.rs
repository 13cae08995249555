//! Persistence and authentication core for reecord.
//! This crate is the single source of truth for note and user invariants.

pub mod codec;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use codec::date::{deserialize_date, serialize_date, truncate_to_seconds, DateFormatError};
pub use db::{DbError, DbResult, SchemaError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use model::user::{User, UserValidationError};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{StoreError, StoreResult};
pub use service::note_service::{parse_note_id, NoteInput, NoteService, NoteServiceError};
pub use service::user_service::{UserService, UserServiceError};
pub use store::Store;
