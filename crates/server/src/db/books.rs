//! Book repository for database operations.
//!
//! Appending a book to a shelf is a single INSERT; shelf views are derived
//! by querying `shelf_id`, so there is no array to read-modify-write and no
//! lost-update window between concurrent adds.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use readshelf_core::{BookId, ShelfId, Username};

use super::RepositoryError;
use crate::models::{Book, BookFilter, NewBook};

/// Internal row type for `PostgreSQL` book queries.
#[derive(Debug, sqlx::FromRow)]
struct BookRow {
    id: i32,
    shelf_id: i32,
    owner_username: String,
    title: String,
    author: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookRow> for Book {
    type Error = RepositoryError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        let owner_username = Username::parse(&row.owner_username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;

        Ok(Self {
            id: BookId::new(row.id),
            shelf_id: ShelfId::new(row.shelf_id),
            owner_username,
            title: row.title,
            author: row.author,
            status: row.status,
            created_at: row.created_at,
        })
    }
}

const BOOK_COLUMNS: &str = "id, shelf_id, owner_username, title, author, status, created_at";

/// Repository for book database operations.
pub struct BookRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BookRepository<'a> {
    /// Create a new book repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new book onto a shelf.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including a
    /// vanished shelf, surfaced as a foreign-key violation).
    pub async fn insert(&self, new_book: &NewBook<'_>) -> Result<Book, RepositoryError> {
        let row = sqlx::query_as::<_, BookRow>(
            r"
            INSERT INTO library.book (shelf_id, owner_username, title, author, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, shelf_id, owner_username, title, author, status, created_at
            ",
        )
        .bind(new_book.shelf_id.as_i32())
        .bind(new_book.owner_username.as_str())
        .bind(new_book.title)
        .bind(new_book.author)
        .bind(new_book.status)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// List an owner's books, optionally narrowed by exact-match filters.
    ///
    /// Filter fields are AND-combined; an empty filter returns every book
    /// the owner has added.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored username is invalid.
    pub async fn list_for_owner(
        &self,
        owner: &Username,
        filter: &BookFilter,
    ) -> Result<Vec<Book>, RepositoryError> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {BOOK_COLUMNS} FROM library.book WHERE owner_username = "
        ));
        query.push_bind(owner.as_str());

        if let Some(title) = &filter.title {
            query.push(" AND title = ");
            query.push_bind(title);
        }
        if let Some(author) = &filter.author {
            query.push(" AND author = ");
            query.push_bind(author);
        }
        if let Some(status) = &filter.status {
            query.push(" AND status = ");
            query.push_bind(status);
        }

        query.push(" ORDER BY created_at ASC, id ASC");

        let rows: Vec<BookRow> = query.build_query_as().fetch_all(self.pool).await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List the books on a shelf in the order they were added.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored username is invalid.
    pub async fn list_for_shelf(&self, shelf_id: ShelfId) -> Result<Vec<Book>, RepositoryError> {
        let rows = sqlx::query_as::<_, BookRow>(
            r"
            SELECT id, shelf_id, owner_username, title, author, status, created_at
            FROM library.book
            WHERE shelf_id = $1
            ORDER BY created_at ASC, id ASC
            ",
        )
        .bind(shelf_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
