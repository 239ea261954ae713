//! Bookshelf domain types.

use chrono::{DateTime, Utc};

use readshelf_core::{ShelfId, UserId};

/// A user-named grouping of books, owned by exactly one user.
#[derive(Debug, Clone)]
pub struct Bookshelf {
    /// Unique shelf ID.
    pub id: ShelfId,
    /// Owning user.
    pub user_id: UserId,
    /// Shelf title, unique within the owner's shelves.
    pub title: String,
    /// When the shelf was created.
    pub created_at: DateTime<Utc>,
}

/// A shelf with its derived book count, for the shelves listing.
///
/// The count is derived by query; there is no embedded book snapshot to keep
/// in sync.
#[derive(Debug, Clone)]
pub struct ShelfOverview {
    /// Unique shelf ID.
    pub id: ShelfId,
    /// Shelf title.
    pub title: String,
    /// Number of books currently on the shelf.
    pub book_count: i64,
}
