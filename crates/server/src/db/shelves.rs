//! Bookshelf repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use readshelf_core::{ShelfId, UserId};

use super::RepositoryError;
use crate::models::{Bookshelf, ShelfOverview};

/// Internal row type for `PostgreSQL` shelf queries.
#[derive(Debug, sqlx::FromRow)]
struct ShelfRow {
    id: i32,
    user_id: i32,
    title: String,
    created_at: DateTime<Utc>,
}

impl From<ShelfRow> for Bookshelf {
    fn from(row: ShelfRow) -> Self {
        Self {
            id: ShelfId::new(row.id),
            user_id: UserId::new(row.user_id),
            title: row.title,
            created_at: row.created_at,
        }
    }
}

/// Row type for the shelf listing with derived book counts.
#[derive(Debug, sqlx::FromRow)]
struct ShelfOverviewRow {
    id: i32,
    title: String,
    book_count: i64,
}

impl From<ShelfOverviewRow> for ShelfOverview {
    fn from(row: ShelfOverviewRow) -> Self {
        Self {
            id: ShelfId::new(row.id),
            title: row.title,
            book_count: row.book_count,
        }
    }
}

/// Repository for bookshelf database operations.
pub struct ShelfRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShelfRepository<'a> {
    /// Create a new shelf repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's shelves in creation order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Bookshelf>, RepositoryError> {
        let rows = sqlx::query_as::<_, ShelfRow>(
            r"
            SELECT id, user_id, title, created_at
            FROM library.bookshelf
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            ",
        )
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List a user's shelves with their derived book counts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_overviews(
        &self,
        user_id: UserId,
    ) -> Result<Vec<ShelfOverview>, RepositoryError> {
        let rows = sqlx::query_as::<_, ShelfOverviewRow>(
            r"
            SELECT s.id, s.title, COUNT(b.id) AS book_count
            FROM library.bookshelf s
            LEFT JOIN library.book b ON b.shelf_id = s.id
            WHERE s.user_id = $1
            GROUP BY s.id, s.title, s.created_at
            ORDER BY s.created_at ASC, s.id ASC
            ",
        )
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Find a user's shelf by exact title match.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_title(
        &self,
        user_id: UserId,
        title: &str,
    ) -> Result<Option<Bookshelf>, RepositoryError> {
        let row = sqlx::query_as::<_, ShelfRow>(
            r"
            SELECT id, user_id, title, created_at
            FROM library.bookshelf
            WHERE user_id = $1 AND title = $2
            ",
        )
        .bind(user_id.as_i32())
        .bind(title)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a new, empty shelf for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user already has a shelf
    /// with this title.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        user_id: UserId,
        title: &str,
    ) -> Result<Bookshelf, RepositoryError> {
        let row = sqlx::query_as::<_, ShelfRow>(
            r"
            INSERT INTO library.bookshelf (user_id, title)
            VALUES ($1, $2)
            RETURNING id, user_id, title, created_at
            ",
        )
        .bind(user_id.as_i32())
        .bind(title)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("shelf title already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(row.into())
    }
}
