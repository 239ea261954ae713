//! HTTP route handlers for the readshelf server.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (redirects to /shelves when logged in)
//! GET  /health                 - Health check
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! GET  /signup                 - Signup page
//! POST /signup                 - Signup action
//! GET  /logout                 - Logout action
//!
//! # Shelves (require auth)
//! GET  /shelves                - List the caller's shelves
//! GET  /shelves/{shelfTitle}   - One shelf and its books
//! GET  /create                 - Create-shelf form
//! POST /create                 - Create-shelf action
//!
//! # Books (require auth)
//! GET  /books                  - List the caller's books (optional filters)
//! GET  /add                    - Add-book form
//! POST /add                    - Add-book action
//! ```

pub mod auth;
pub mod books;
pub mod home;
pub mod shelves;

use axum::{
    Router,
    routing::get,
};

use crate::db::users::UserRepository;
use crate::error::AppError;
use crate::models::{CurrentUser, User};
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/logout", get(auth::logout))
}

/// Create the shelf routes router.
pub fn shelf_routes() -> Router<AppState> {
    Router::new()
        .route("/shelves", get(shelves::index))
        .route("/shelves/{shelf_title}", get(shelves::show))
        .route("/create", get(shelves::create_page).post(shelves::create))
}

/// Create the book routes router.
pub fn book_routes() -> Router<AppState> {
    Router::new()
        .route("/books", get(books::index))
        .route("/add", get(books::add_page).post(books::add))
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .merge(auth_routes())
        .merge(shelf_routes())
        .merge(book_routes())
}

/// Load the full user record behind a session identity.
///
/// The session only holds the username; views need the stored record (e.g.
/// the display name). A session pointing at a vanished account is treated as
/// unauthorized rather than a server fault.
pub(crate) async fn load_current_user(
    state: &AppState,
    current: &CurrentUser,
) -> Result<User, AppError> {
    UserRepository::new(state.pool())
        .get_by_username(&current.username)
        .await?
        .ok_or_else(|| AppError::Unauthorized("account no longer exists".to_string()))
}
