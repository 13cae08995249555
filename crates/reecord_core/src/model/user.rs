//! User credential model.
//!
//! # Invariants
//! - `username` is unique in storage.
//! - `password` is stored and compared as plaintext. This is a known weakness
//!   kept for compatibility with existing stores; a real deployment should
//!   store salted hashes instead.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    EmptyPassword,
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl Error for UserValidationError {}

/// One row of the `users` relation.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password: String,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.username.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if self.password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(())
    }

    /// Byte-for-byte password comparison.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

// Keep the password out of debug output and therefore out of logs.
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
