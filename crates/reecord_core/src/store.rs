//! Store handle owning the SQLite connection.
//!
//! # Responsibility
//! - Open the connection and ensure the schema exactly once per handle.
//! - Expose note and user operations to concurrent callers.
//! - Release the connection exactly once on close.
//!
//! # Invariants
//! - The connection is only reachable through the handle's mutex; each call
//!   holds it for the duration of one repository operation.
//! - Each mutating operation is its own transaction; there is no ordering
//!   guarantee between concurrent callers beyond SQLite's own isolation.

use crate::db::{open_db, open_db_in_memory, DbError, DbResult};
use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::{NoteRepository, SqliteNoteRepository};
use crate::repo::user_repo::{SqliteUserRepository, UserRepository};
use crate::repo::{StoreError, StoreResult};
use log::{debug, error, info, warn};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;

/// Thread-safe handle over one open store.
///
/// Share it between request threads with `Arc<Store>`; operations block the
/// calling thread until they complete or fail.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Opens (creating if needed) the store file at `path`.
    ///
    /// Fails with `DbError::Open` or `DbError::Schema`; in both cases the
    /// caller must not serve requests.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let conn = open_db(path.as_ref())?;
        info!(
            "event=store_open module=store status=ok path={}",
            path.as_ref().display()
        );
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens a private in-memory store.
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = open_db_in_memory()?;
        info!("event=store_open module=store status=ok path=:memory:");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Releases the connection. Consumes the handle so it cannot be reused.
    pub fn close(self) -> DbResult<()> {
        let conn = self
            .conn
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match conn.close() {
            Ok(()) => {
                info!("event=store_close module=store status=ok");
                Ok(())
            }
            Err((_conn, err)) => {
                error!(
                    "event=store_close module=store status=error error={}",
                    err
                );
                Err(DbError::Close(err))
            }
        }
    }

    fn with_conn<F, T>(&self, op: &'static str, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T>,
    {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        let result = f(&*conn);
        match &result {
            Ok(_) => debug!("event={op} module=store status=ok"),
            Err(StoreError::Conflict(message)) => {
                warn!("event={op} module=store status=conflict error={message}")
            }
            Err(err) => error!("event={op} module=store status=error error={err}"),
        }
        result
    }
}

impl NoteRepository for Store {
    fn add_note(&self, note: &Note) -> StoreResult<NoteId> {
        self.with_conn("note_add", |conn| {
            SqliteNoteRepository::new(conn).add_note(note)
        })
    }

    fn update_note(&self, note: &Note) -> StoreResult<usize> {
        self.with_conn("note_update", |conn| {
            SqliteNoteRepository::new(conn).update_note(note)
        })
    }

    fn remove_note(&self, id: NoteId) -> StoreResult<usize> {
        self.with_conn("note_remove", |conn| {
            SqliteNoteRepository::new(conn).remove_note(id)
        })
    }

    fn get_note(&self, id: NoteId) -> StoreResult<Option<Note>> {
        self.with_conn("note_get", |conn| SqliteNoteRepository::new(conn).get_note(id))
    }

    fn list_notes(&self) -> StoreResult<Vec<Note>> {
        self.with_conn("note_list", |conn| {
            SqliteNoteRepository::new(conn).list_notes()
        })
    }
}

impl UserRepository for Store {
    fn has_user(&self, username: &str) -> StoreResult<bool> {
        self.with_conn("user_exists", |conn| {
            SqliteUserRepository::new(conn).has_user(username)
        })
    }

    fn add_user(&self, username: &str, password: &str) -> StoreResult<bool> {
        self.with_conn("user_add", |conn| {
            SqliteUserRepository::new(conn).add_user(username, password)
        })
    }

    fn remove_user(&self, username: &str) -> StoreResult<usize> {
        self.with_conn("user_remove", |conn| {
            SqliteUserRepository::new(conn).remove_user(username)
        })
    }

    fn change_password(&self, username: &str, new_password: &str) -> StoreResult<usize> {
        self.with_conn("user_change_password", |conn| {
            SqliteUserRepository::new(conn).change_password(username, new_password)
        })
    }

    fn check_login(&self, username: &str, password: &str) -> StoreResult<bool> {
        self.with_conn("user_check_login", |conn| {
            SqliteUserRepository::new(conn).check_login(username, password)
        })
    }
}
