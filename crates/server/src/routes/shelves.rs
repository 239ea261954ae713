//! Shelf route handlers.
//!
//! Listing, detail and creation of bookshelves. Shelf contents and counts
//! are derived by query from the book table; there is no embedded copy to
//! keep in sync.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::db::RepositoryError;
use crate::db::books::BookRepository;
use crate::db::shelves::ShelfRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireUser;
use crate::models::{Book, ShelfOverview};
use crate::routes::load_current_user;
use crate::sanitize;
use crate::state::AppState;
use crate::validation;

// =============================================================================
// Form Types
// =============================================================================

/// Create-shelf form data.
#[derive(Debug, Deserialize)]
pub struct CreateShelfForm {
    #[serde(rename = "shelfTitle")]
    pub shelf_title: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Shelves listing template.
#[derive(Template, WebTemplate)]
#[template(path = "shelves/index.html")]
pub struct ShelvesTemplate {
    /// Display name of the owner.
    pub username: String,
    pub shelves: Vec<ShelfOverview>,
}

/// Single-shelf detail template.
#[derive(Template, WebTemplate)]
#[template(path = "shelves/show.html")]
pub struct ShelfDetailTemplate {
    pub username: String,
    pub shelf_title: String,
    pub books: Vec<Book>,
}

/// Create-shelf form template.
#[derive(Template, WebTemplate)]
#[template(path = "shelves/create.html")]
pub struct CreateShelfTemplate {
    pub username: String,
    pub error: Option<String>,
    pub field_errors: Vec<String>,
}

// =============================================================================
// Routes
// =============================================================================

/// List the caller's shelves with derived book counts.
pub async fn index(
    State(state): State<AppState>,
    RequireUser(current): RequireUser,
) -> Result<ShelvesTemplate> {
    let user = load_current_user(&state, &current).await?;
    let shelves = ShelfRepository::new(state.pool())
        .list_overviews(user.id)
        .await?;

    Ok(ShelvesTemplate {
        username: user.name,
        shelves,
    })
}

/// Show one shelf and its books, looked up by exact title.
pub async fn show(
    State(state): State<AppState>,
    RequireUser(current): RequireUser,
    Path(shelf_title): Path<String>,
) -> Result<ShelfDetailTemplate> {
    let user = load_current_user(&state, &current).await?;
    let shelf_title = sanitize::scrub(&shelf_title);

    let shelf = ShelfRepository::new(state.pool())
        .get_by_title(user.id, &shelf_title)
        .await?
        .ok_or_else(|| AppError::NotFound("shelf not found".to_string()))?;

    let books = BookRepository::new(state.pool())
        .list_for_shelf(shelf.id)
        .await?;

    Ok(ShelfDetailTemplate {
        username: user.username.into_inner(),
        shelf_title: shelf.title,
        books,
    })
}

/// Display the create-shelf form.
pub async fn create_page(
    State(state): State<AppState>,
    RequireUser(current): RequireUser,
) -> Result<CreateShelfTemplate> {
    let user = load_current_user(&state, &current).await?;

    Ok(CreateShelfTemplate {
        username: user.username.into_inner(),
        error: None,
        field_errors: Vec::new(),
    })
}

/// Handle create-shelf form submission.
pub async fn create(
    State(state): State<AppState>,
    RequireUser(current): RequireUser,
    Form(form): Form<CreateShelfForm>,
) -> Result<Response> {
    let user = load_current_user(&state, &current).await?;
    let shelf_title = sanitize::scrub(&form.shelf_title);

    let errors = validation::create_shelf().validate(&[("shelfTitle", &shelf_title)]);
    if !errors.is_empty() {
        return Ok(CreateShelfTemplate {
            username: user.username.into_inner(),
            error: None,
            field_errors: errors.messages(),
        }
        .into_response());
    }

    match ShelfRepository::new(state.pool())
        .create(user.id, &shelf_title)
        .await
    {
        Ok(shelf) => {
            tracing::info!(username = %user.username, shelf = %shelf.title, "shelf created");
            Ok(Redirect::to("/shelves").into_response())
        }
        Err(RepositoryError::Conflict(_)) => Ok(CreateShelfTemplate {
            username: user.username.into_inner(),
            error: Some("shelf already exists".to_string()),
            field_errors: Vec::new(),
        }
        .into_response()),
        Err(e) => Err(e.into()),
    }
}
