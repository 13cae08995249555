//! Text codecs for persisted values.
//!
//! # Invariants
//! - Every note read/write goes through `date` for its timestamp column.

pub mod date;
