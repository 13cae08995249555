//! User account use-case service.
//!
//! # Responsibility
//! - Validate credentials input before it reaches the store.
//! - Turn store outcomes into caller-facing rejections.
//!
//! # Invariants
//! - A taken username is `UsernameTaken`; a storage conflict from a lost
//!   insert race stays a `Store` failure.
//! - Login never fails for a wrong password; it returns `false`.

use crate::model::user::{User, UserValidationError};
use crate::repo::user_repo::UserRepository;
use crate::repo::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum UserServiceError {
    InvalidInput(UserValidationError),
    UsernameTaken(String),
    UserNotFound(String),
    Store(StoreError),
}

impl UserServiceError {
    /// Whether the caller's input caused the failure, as opposed to storage.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}

impl Display for UserServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "{err}"),
            Self::UsernameTaken(_) => write!(f, "Username already taken."),
            Self::UserNotFound(username) => write!(f, "user not found: {username}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for UserServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::UsernameTaken(_) | Self::UserNotFound(_) => None,
        }
    }
}

impl From<StoreError> for UserServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<UserValidationError> for UserServiceError {
    fn from(value: UserValidationError) -> Self {
        Self::InvalidInput(value)
    }
}

/// Account service facade over repository implementations.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new user with non-empty credentials.
    pub fn register(&self, username: &str, password: &str) -> Result<(), UserServiceError> {
        User::new(username, password).validate()?;

        if !self.repo.add_user(username, password)? {
            return Err(UserServiceError::UsernameTaken(username.to_string()));
        }
        Ok(())
    }

    /// Removes a user. Returns whether a row was removed.
    pub fn unregister(&self, username: &str) -> Result<bool, UserServiceError> {
        if username.is_empty() {
            return Err(UserValidationError::EmptyUsername.into());
        }
        Ok(self.repo.remove_user(username)? > 0)
    }

    /// Checks credentials. Empty fields are rejected as invalid input.
    pub fn login(&self, username: &str, password: &str) -> Result<bool, UserServiceError> {
        User::new(username, password).validate()?;
        Ok(self.repo.check_login(username, password)?)
    }

    /// Replaces the password of an existing user.
    pub fn change_password(
        &self,
        username: &str,
        new_password: &str,
    ) -> Result<(), UserServiceError> {
        User::new(username, new_password).validate()?;

        if self.repo.change_password(username, new_password)? == 0 {
            return Err(UserServiceError::UserNotFound(username.to_string()));
        }
        Ok(())
    }
}
