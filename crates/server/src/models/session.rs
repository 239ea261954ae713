//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use readshelf_core::Username;

/// Session-stored user identity.
///
/// Holds only a reference to the user (the username), never a copy of the
/// user record. Absence of this value in the session is the single
/// normalized anonymous state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// The authenticated username.
    pub username: Username,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
