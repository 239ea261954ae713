//! Authentication route handlers.
//!
//! Login, signup and logout. Expected auth failures render back onto the
//! originating form; store failures propagate as `AppError` and become a
//! generic 5xx.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::sanitize;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Signup form data.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub username: String,
    pub password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub error: Option<String>,
    pub field_errors: Vec<String>,
}

impl SignupTemplate {
    fn blank() -> Self {
        Self {
            error: None,
            field_errors: Vec::new(),
        }
    }

    fn with_error(message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            field_errors: Vec::new(),
        }
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page() -> LoginTemplate {
    LoginTemplate { error: None }
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let username = sanitize::scrub(&form.username);
    let password = sanitize::scrub(&form.password);

    let auth = AuthService::new(state.pool());
    match auth.login(&username, &password).await {
        Ok(user) => {
            let current = CurrentUser {
                username: user.username.clone(),
            };
            if let Err(e) = set_current_user(&session, &current).await {
                tracing::error!("Failed to set session: {e}");
                return Err(AppError::Internal("session store failure".to_string()));
            }

            tracing::info!(username = %user.username, "login succeeded");
            Ok(Redirect::to("/shelves").into_response())
        }
        Err(AuthError::UserNotFound) => Ok(LoginTemplate {
            error: Some("user not found".to_string()),
        }
        .into_response()),
        Err(AuthError::IncorrectPassword) => Ok(LoginTemplate {
            error: Some("incorrect password".to_string()),
        }
        .into_response()),
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
pub async fn signup_page() -> SignupTemplate {
    SignupTemplate::blank()
}

/// Handle signup form submission.
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignupForm>,
) -> Result<Response> {
    let name = sanitize::scrub(&form.name);
    let username = sanitize::scrub(&form.username);
    let password = sanitize::scrub(&form.password);

    let auth = AuthService::new(state.pool());
    match auth.signup(&name, &username, &password).await {
        Ok(user) => {
            let current = CurrentUser {
                username: user.username.clone(),
            };
            if let Err(e) = set_current_user(&session, &current).await {
                tracing::error!("Failed to set session: {e}");
                return Err(AppError::Internal("session store failure".to_string()));
            }

            tracing::info!(username = %user.username, "signup succeeded");
            Ok(Redirect::to("/shelves").into_response())
        }
        Err(AuthError::UsernameTaken) => {
            Ok(SignupTemplate::with_error("Username Already Exists").into_response())
        }
        Err(AuthError::Validation(errors)) => Ok(SignupTemplate {
            error: None,
            field_errors: errors.messages(),
        }
        .into_response()),
        Err(e) => {
            // Persistence and hashing failures surface on the form; the
            // message text is long-standing and kept as-is.
            tracing::error!("Signup failed: {e}");
            Ok(SignupTemplate::with_error("Error with signin").into_response())
        }
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Clears the session identity and destroys the session.
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }

    // Also destroy the entire session
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    Redirect::to("/")
}
