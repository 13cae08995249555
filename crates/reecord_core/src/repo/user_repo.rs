//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide existence check, add/remove, password change and login check
//!   over the `users` relation.
//!
//! # Invariants
//! - `add_user` never overwrites an existing user: a taken username yields
//!   `Ok(false)` without mutation.
//! - The existence check and the insert are separate steps; the primary key on
//!   `users.username` rejects the insert when a concurrent caller wins the
//!   race, and that rejection surfaces as `StoreError::Conflict`.
//! - Passwords are compared byte-for-byte (plaintext storage).

use crate::model::user::User;
use crate::repo::{is_constraint_violation, StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};

/// Repository interface for user credential operations.
pub trait UserRepository {
    fn has_user(&self, username: &str) -> StoreResult<bool>;
    /// Returns `false` when the username is already taken.
    fn add_user(&self, username: &str, password: &str) -> StoreResult<bool>;
    fn remove_user(&self, username: &str) -> StoreResult<usize>;
    fn change_password(&self, username: &str, new_password: &str) -> StoreResult<usize>;
    /// Returns `false` for an unknown username or a wrong password.
    fn check_login(&self, username: &str, password: &str) -> StoreResult<bool>;
}

impl<T: UserRepository + ?Sized> UserRepository for &T {
    fn has_user(&self, username: &str) -> StoreResult<bool> {
        (**self).has_user(username)
    }

    fn add_user(&self, username: &str, password: &str) -> StoreResult<bool> {
        (**self).add_user(username, password)
    }

    fn remove_user(&self, username: &str) -> StoreResult<usize> {
        (**self).remove_user(username)
    }

    fn change_password(&self, username: &str, new_password: &str) -> StoreResult<usize> {
        (**self).change_password(username, new_password)
    }

    fn check_login(&self, username: &str, password: &str) -> StoreResult<bool> {
        (**self).check_login(username, password)
    }
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Wraps a connection whose schema has already been ensured.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Loads one user row by username.
    pub fn get_user(&self, username: &str) -> StoreResult<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT username, password FROM users WHERE username = ?1;",
                [username],
                |row| {
                    Ok(User {
                        username: row.get(0)?,
                        password: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    /// Inserts one user without the existence pre-check.
    ///
    /// A duplicate username is rejected by storage and reported as
    /// `StoreError::Conflict`.
    pub fn insert_user(&self, username: &str, password: &str) -> StoreResult<()> {
        let tx = self.begin()?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO users (username, password) VALUES (?1, ?2);")?;
            if let Err(err) = stmt.execute(params![username, password]) {
                if is_constraint_violation(&err) {
                    return Err(StoreError::Conflict(format!(
                        "username `{username}` already exists"
                    )));
                }
                return Err(err.into());
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn begin(&self) -> StoreResult<Transaction<'conn>> {
        Ok(Transaction::new_unchecked(
            self.conn,
            TransactionBehavior::Immediate,
        )?)
    }

    fn execute_in_tx(&self, sql: &str, params: impl rusqlite::Params) -> StoreResult<usize> {
        let tx = self.begin()?;
        let changed = {
            let mut stmt = tx.prepare(sql)?;
            stmt.execute(params)?
        };
        tx.commit()?;
        Ok(changed)
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn has_user(&self, username: &str) -> StoreResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM users
                WHERE username = ?1
            );",
            [username],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn add_user(&self, username: &str, password: &str) -> StoreResult<bool> {
        if self.has_user(username)? {
            return Ok(false);
        }

        self.insert_user(username, password)?;
        Ok(true)
    }

    fn remove_user(&self, username: &str) -> StoreResult<usize> {
        self.execute_in_tx("DELETE FROM users WHERE username = ?1;", [username])
    }

    fn change_password(&self, username: &str, new_password: &str) -> StoreResult<usize> {
        self.execute_in_tx(
            "UPDATE users SET password = ?1 WHERE username = ?2;",
            params![new_password, username],
        )
    }

    fn check_login(&self, username: &str, password: &str) -> StoreResult<bool> {
        Ok(self
            .get_user(username)?
            .is_some_and(|user| user.password_matches(password)))
    }
}
