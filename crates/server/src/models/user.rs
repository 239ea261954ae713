//! User domain types.

use chrono::{DateTime, Utc};

use readshelf_core::{UserId, Username};

/// A registered account (domain type).
///
/// The password hash is never part of this type; it is only handled inside
/// the auth service.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name shown in views.
    pub name: String,
    /// Unique login name.
    pub username: Username,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
