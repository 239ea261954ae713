//! Integration tests for signup, login and logout flows.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p readshelf-server)
//!
//! Run with: cargo test -p readshelf-integration-tests -- --ignored

use readshelf_integration_tests::{base_url, client, signup_fresh_user, unique_username};

const PASSWORD: &str = "correct horse battery";

#[tokio::test]
#[ignore = "Requires running readshelf server and database"]
async fn test_signup_redirects_to_shelves_and_logs_in() {
    let client = client();
    signup_fresh_user(&client, PASSWORD).await;

    // The session cookie from signup authenticates the next request
    let resp = client
        .get(format!("{}/shelves", base_url()))
        .send()
        .await
        .expect("Failed to get shelves");
    assert!(resp.status().is_success());
}

#[tokio::test]
#[ignore = "Requires running readshelf server and database"]
async fn test_signup_short_username_is_a_validation_error() {
    let client = client();
    let resp = client
        .post(format!("{}/signup", base_url()))
        .form(&[
            ("name", "Integration Tester"),
            ("username", "short"),
            ("password", PASSWORD),
        ])
        .send()
        .await
        .expect("Failed to post signup");

    // Re-rendered form, not a redirect
    assert!(resp.status().is_success());
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("username must be 8 characters or longer"));

    // And no account was persisted: logging in with it finds no user
    let resp = client
        .post(format!("{}/login", base_url()))
        .form(&[("username", "short"), ("password", PASSWORD)])
        .send()
        .await
        .expect("Failed to post login");
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("user not found"));
}

#[tokio::test]
#[ignore = "Requires running readshelf server and database"]
async fn test_duplicate_signup_is_rejected_and_first_password_survives() {
    let client = client();
    let username = signup_fresh_user(&client, PASSWORD).await;

    // Second signup with the same username, different password
    let second = client
        .post(format!("{}/signup", base_url()))
        .form(&[
            ("name", "Impostor"),
            ("username", username.as_str()),
            ("password", "a different password"),
        ])
        .send()
        .await
        .expect("Failed to post signup");
    assert!(second.status().is_success());
    let body = second.text().await.expect("Failed to read response");
    assert!(body.contains("Username Already Exists"));

    // The original credentials still work, so the stored hash was untouched
    let fresh = readshelf_integration_tests::client();
    let resp = fresh
        .post(format!("{}/login", base_url()))
        .form(&[("username", username.as_str()), ("password", PASSWORD)])
        .send()
        .await
        .expect("Failed to post login");
    assert!(resp.status().is_redirection());
    assert_eq!(
        resp.headers().get("location").and_then(|v| v.to_str().ok()),
        Some("/shelves")
    );
}

#[tokio::test]
#[ignore = "Requires running readshelf server and database"]
async fn test_login_wrong_password_shows_incorrect_password() {
    let client = client();
    let username = signup_fresh_user(&client, PASSWORD).await;

    let fresh = readshelf_integration_tests::client();
    let resp = fresh
        .post(format!("{}/login", base_url()))
        .form(&[("username", username.as_str()), ("password", "wrong wrong wrong")])
        .send()
        .await
        .expect("Failed to post login");

    assert!(resp.status().is_success());
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("incorrect password"));

    // The session stayed anonymous
    let resp = fresh
        .get(format!("{}/shelves", base_url()))
        .send()
        .await
        .expect("Failed to get shelves");
    assert!(resp.status().is_redirection());
}

#[tokio::test]
#[ignore = "Requires running readshelf server and database"]
async fn test_login_unknown_user_shows_user_not_found() {
    let client = client();
    let resp = client
        .post(format!("{}/login", base_url()))
        .form(&[("username", unique_username().as_str()), ("password", PASSWORD)])
        .send()
        .await
        .expect("Failed to post login");

    assert!(resp.status().is_success());
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("user not found"));
}

#[tokio::test]
#[ignore = "Requires running readshelf server and database"]
async fn test_logout_then_shelves_redirects_to_signup() {
    let client = client();
    signup_fresh_user(&client, PASSWORD).await;

    let resp = client
        .get(format!("{}/logout", base_url()))
        .send()
        .await
        .expect("Failed to get logout");
    assert!(resp.status().is_redirection());
    assert_eq!(
        resp.headers().get("location").and_then(|v| v.to_str().ok()),
        Some("/")
    );

    let resp = client
        .get(format!("{}/shelves", base_url()))
        .send()
        .await
        .expect("Failed to get shelves");
    assert!(resp.status().is_redirection());
    assert_eq!(
        resp.headers().get("location").and_then(|v| v.to_str().ok()),
        Some("/signup")
    );
}
