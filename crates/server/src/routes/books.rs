//! Book route handlers.
//!
//! The books listing with its optional exact-match filters, and the
//! add-book form targeting one of the caller's shelves.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::db::books::BookRepository;
use crate::db::shelves::ShelfRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireUser;
use crate::models::{Book, BookFilter, Bookshelf, NewBook};
use crate::routes::load_current_user;
use crate::sanitize;
use crate::state::AppState;
use crate::validation;

// =============================================================================
// Form and Query Types
// =============================================================================

/// Query parameters for the books listing.
///
/// All filters are optional, exact-match, and AND-combined. The parameter
/// names are part of the URL surface and kept as-is.
#[derive(Debug, Deserialize, Default)]
pub struct BooksQuery {
    #[serde(rename = "titleSort")]
    pub title_sort: Option<String>,
    #[serde(rename = "authorSort")]
    pub author_sort: Option<String>,
    pub status: Option<String>,
}

/// Add-book form data.
#[derive(Debug, Deserialize)]
pub struct AddBookForm {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "shelfTitle")]
    pub shelf_title: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Books listing template.
#[derive(Template, WebTemplate)]
#[template(path = "books/index.html")]
pub struct BooksTemplate {
    /// Display name of the owner.
    pub name: String,
    pub books: Vec<Book>,
}

/// Add-book form template.
#[derive(Template, WebTemplate)]
#[template(path = "books/add.html")]
pub struct AddBookTemplate {
    pub username: String,
    /// The caller's shelves, for the shelf picker.
    pub shelves: Vec<Bookshelf>,
    pub error: Option<String>,
    pub field_errors: Vec<String>,
}

// =============================================================================
// Routes
// =============================================================================

/// List the caller's books, optionally filtered.
pub async fn index(
    State(state): State<AppState>,
    RequireUser(current): RequireUser,
    Query(query): Query<BooksQuery>,
) -> Result<BooksTemplate> {
    let user = load_current_user(&state, &current).await?;

    let filter = BookFilter {
        title: sanitize::scrub_filter(query.title_sort),
        author: sanitize::scrub_filter(query.author_sort),
        status: sanitize::scrub_filter(query.status),
    };

    let books = BookRepository::new(state.pool())
        .list_for_owner(&user.username, &filter)
        .await?;

    Ok(BooksTemplate {
        name: user.name,
        books,
    })
}

/// Display the add-book form with the caller's shelves.
pub async fn add_page(
    State(state): State<AppState>,
    RequireUser(current): RequireUser,
) -> Result<AddBookTemplate> {
    let user = load_current_user(&state, &current).await?;
    let shelves = ShelfRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(AddBookTemplate {
        username: user.username.into_inner(),
        shelves,
        error: None,
        field_errors: Vec::new(),
    })
}

/// Handle add-book form submission.
///
/// The target shelf must exist before anything is written: a missing shelf
/// re-renders the form with "shelf not found" and no book row is created,
/// so a book can never exist without its shelf entry.
pub async fn add(
    State(state): State<AppState>,
    RequireUser(current): RequireUser,
    Form(form): Form<AddBookForm>,
) -> Result<Response> {
    let user = load_current_user(&state, &current).await?;

    let title = sanitize::scrub(&form.title);
    let author = sanitize::scrub(&form.author);
    let status = sanitize::scrub(&form.status);
    let shelf_title = sanitize::scrub(&form.shelf_title);

    let shelf_repo = ShelfRepository::new(state.pool());
    let shelves = shelf_repo.list_for_user(user.id).await?;

    let errors = validation::add_book().validate(&[("title", &title), ("author", &author)]);
    if !errors.is_empty() {
        return Ok(AddBookTemplate {
            username: user.username.into_inner(),
            shelves,
            error: None,
            field_errors: errors.messages(),
        }
        .into_response());
    }

    let Some(shelf) = shelf_repo.get_by_title(user.id, &shelf_title).await? else {
        return Ok(AddBookTemplate {
            username: user.username.into_inner(),
            shelves,
            error: Some("shelf not found".to_string()),
            field_errors: Vec::new(),
        }
        .into_response());
    };

    let book = BookRepository::new(state.pool())
        .insert(&NewBook {
            shelf_id: shelf.id,
            owner_username: &user.username,
            title: &title,
            author: &author,
            status: &status,
        })
        .await?;

    tracing::info!(username = %user.username, shelf = %shelf.title, book = %book.title, "book added");
    Ok(Redirect::to("/shelves").into_response())
}
