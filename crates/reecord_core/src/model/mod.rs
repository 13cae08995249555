//! Domain value objects exchanged across the store boundary.
//!
//! # Responsibility
//! - Define the note and user records persisted by the store.
//!
//! # Invariants
//! - Values are plain, independently owned data; no shared mutable state.
//! - A persisted note has a non-zero `id` and a non-empty `title`.

pub mod note;
pub mod user;
