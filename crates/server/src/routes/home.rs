//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Redirect, Response};

use crate::filters;
use crate::middleware::OptionalUser;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate;

/// Display the home page, or send identified callers to their shelves.
pub async fn home(OptionalUser(user): OptionalUser) -> Response {
    if user.is_some() {
        Redirect::to("/shelves").into_response()
    } else {
        HomeTemplate.into_response()
    }
}
