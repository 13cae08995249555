//! Schema creation and verification.
//!
//! # Responsibility
//! - Create the `notes` and `users` relations when absent.
//! - Reject files whose relations predate the required column set.
//!
//! # Invariants
//! - `ensure_schema` is safe to run on every open regardless of prior state.
//! - Creation statements run inside one transaction.
//! - `users.username` is the primary key, so duplicate inserts fail in storage.

use rusqlite::{Connection, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const SCHEMA_SQL: &str = include_str!("schema.sql");

const NOTES_COLUMNS: &[&str] = &["id", "title", "link", "details", "author", "date"];
const USERS_COLUMNS: &[&str] = &["username", "password"];

/// Columns every opened store must expose, per relation.
pub const REQUIRED_COLUMNS: &[(&str, &[&str])] =
    &[("notes", NOTES_COLUMNS), ("users", USERS_COLUMNS)];

#[derive(Debug)]
pub enum SchemaError {
    Sqlite(rusqlite::Error),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for SchemaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::MissingRequiredTable(_) | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for SchemaError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Creates the `notes` and `users` relations if they do not exist yet, then
/// verifies that both expose the required columns.
pub fn ensure_schema(conn: &mut Connection) -> Result<(), SchemaError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.commit()?;

    verify_schema(conn)
}

fn verify_schema(conn: &Connection) -> Result<(), SchemaError> {
    for &(table, columns) in REQUIRED_COLUMNS {
        if !table_exists(conn, table)? {
            return Err(SchemaError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(SchemaError::MissingRequiredColumn { table, column });
            }
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool, SchemaError> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool, SchemaError> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
