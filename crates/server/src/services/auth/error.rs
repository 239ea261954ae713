//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::validation::FieldErrors;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username failed structural parsing.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] readshelf_core::UsernameError),

    /// Username is already registered.
    #[error("username already exists")]
    UsernameTaken,

    /// Signup form fields failed validation.
    #[error("signup validation failed")]
    Validation(FieldErrors),

    /// User not found.
    #[error("user not found")]
    UserNotFound,

    /// Stored hash does not match the given password.
    #[error("incorrect password")]
    IncorrectPassword,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
