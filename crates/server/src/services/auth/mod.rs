//! Authentication service.
//!
//! Signup and login flows over the user repository, with argon2id password
//! hashing.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use readshelf_core::Username;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;
use crate::validation;

/// Authentication service.
///
/// Handles account signup and password login. Callers are expected to have
/// scrubbed raw form input (see [`crate::sanitize`]) before it reaches here.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Sign up a new account.
    ///
    /// Order follows the form flow: uniqueness check first (a taken username
    /// wins over any other field problem), then the signup constraint set,
    /// then hash and persist. The new account starts with no shelves.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UsernameTaken` if the username exists (including a
    /// concurrent signup losing the insert race).
    /// Returns `AuthError::Validation` with field errors if the form fails
    /// the signup constraints.
    /// Returns `AuthError::InvalidUsername` if the username passes the form
    /// rules but not structural limits (length cap, control characters).
    pub async fn signup(
        &self,
        name: &str,
        username: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        // Uniqueness check (case-sensitive exact match)
        if let Ok(parsed) = Username::parse(username)
            && self.users.get_by_username(&parsed).await?.is_some()
        {
            return Err(AuthError::UsernameTaken);
        }

        let errors = validation::signup().validate(&[
            ("name", name),
            ("username", username),
            ("password", password),
        ]);
        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }

        let username = Username::parse(username)?;
        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create_with_password(name, &username, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UsernameTaken,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Log in with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if no account matches the username
    /// (an unparseable username can never match a stored one).
    /// Returns `AuthError::IncorrectPassword` on a hash mismatch.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = Username::parse(username).map_err(|_| AuthError::UserNotFound)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::IncorrectPassword)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::IncorrectPassword)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("speak friend and enter").unwrap();
        assert!(verify_password("speak friend and enter", &hash).is_ok());
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hash = hash_password("speak friend and enter").unwrap();
        assert!(matches!(
            verify_password("mellon", &hash),
            Err(AuthError::IncorrectPassword)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("speak friend and enter").unwrap();
        let b = hash_password("speak friend and enter").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::IncorrectPassword)
        ));
    }
}
