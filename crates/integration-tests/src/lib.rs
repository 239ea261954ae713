//! Integration tests for Readshelf.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p readshelf-cli -- migrate
//!
//! # Start the server
//! cargo run -p readshelf-server
//!
//! # Run integration tests
//! cargo test -p readshelf-integration-tests -- --ignored
//! ```
//!
//! Tests talk HTTP to a running server; they are `#[ignore]`d so a plain
//! `cargo test` never requires a live stack.

use reqwest::Client;
use reqwest::redirect::Policy;
use uuid::Uuid;

/// Base URL for the server (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("READSHELF_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client with a cookie store, not following redirects.
///
/// Redirects are the interesting assertion surface (login and signup
/// redirect to `/shelves`, anonymous callers to `/signup`), so the client
/// leaves them unfollowed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Generate a unique username long enough to pass signup validation.
#[must_use]
pub fn unique_username() -> String {
    format!("it-{}", Uuid::new_v4())
}

/// Sign up a fresh user on the given client, returning the username.
///
/// # Panics
///
/// Panics if signup does not redirect to `/shelves`.
pub async fn signup_fresh_user(client: &Client, password: &str) -> String {
    let username = unique_username();
    let resp = client
        .post(format!("{}/signup", base_url()))
        .form(&[
            ("name", "Integration Tester"),
            ("username", username.as_str()),
            ("password", password),
        ])
        .send()
        .await
        .expect("Failed to sign up");

    assert!(resp.status().is_redirection(), "signup should redirect");
    assert_eq!(
        resp.headers()
            .get("location")
            .and_then(|v| v.to_str().ok()),
        Some("/shelves")
    );

    username
}
