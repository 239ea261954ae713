//! Book domain types.

use chrono::{DateTime, Utc};

use readshelf_core::{BookId, ShelfId, Username};

/// A tracked book (domain type).
///
/// Belongs to exactly one shelf; `owner_username` makes it queryable
/// standalone without joining through the shelf.
#[derive(Debug, Clone)]
pub struct Book {
    /// Unique book ID.
    pub id: BookId,
    /// Shelf this book sits on.
    pub shelf_id: ShelfId,
    /// Owning user's username.
    pub owner_username: Username,
    /// Book title.
    pub title: String,
    /// Book author.
    pub author: String,
    /// Free-text reading status, set once at creation.
    pub status: String,
    /// When the book was added.
    pub created_at: DateTime<Utc>,
}

/// Fields for inserting a new book.
#[derive(Debug, Clone)]
pub struct NewBook<'a> {
    pub shelf_id: ShelfId,
    pub owner_username: &'a Username,
    pub title: &'a str,
    pub author: &'a str,
    pub status: &'a str,
}

/// Optional exact-match filters for the books listing, AND-combined.
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    pub title: Option<String>,
    pub author: Option<String>,
    pub status: Option<String>,
}

impl BookFilter {
    /// Returns true if no filter fields are set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.status.is_none()
    }
}
