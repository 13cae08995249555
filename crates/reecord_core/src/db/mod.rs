//! SQLite storage bootstrap and schema entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the reecord core.
//! - Create the `notes` and `users` relations before any data access.
//!
//! # Invariants
//! - Schema creation is idempotent and runs on every open.
//! - Core code must not read/write application data before the schema is ensured.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory, BUSY_TIMEOUT};
pub use schema::{ensure_schema, SchemaError};

pub type DbResult<T> = Result<T, DbError>;

/// Store lifecycle error.
///
/// `Open` and `Schema` are fatal at startup: callers must not serve requests
/// from a store that failed to open.
#[derive(Debug)]
pub enum DbError {
    /// The database file could not be opened or configured.
    Open(rusqlite::Error),
    /// Schema creation or verification failed.
    Schema(SchemaError),
    /// The engine refused to release the connection.
    Close(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "failed to open database: {err}"),
            Self::Schema(err) => write!(f, "failed to initialize schema: {err}"),
            Self::Close(err) => write!(f, "failed to close database: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) => Some(err),
            Self::Schema(err) => Some(err),
            Self::Close(err) => Some(err),
        }
    }
}

impl From<SchemaError> for DbError {
    fn from(value: SchemaError) -> Self {
        Self::Schema(value)
    }
}
