//! Authentication API Tests

use axum::http::StatusCode;
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::{json, Value};

use crate::common::{unique_email, unique_username, TestApp};
use tutor_platform::domain::UserRole;

fn registration(email: &str, username: &str) -> Value {
    json!({
        "email": email,
        "username": username,
        "password": "ValidPassword123!",
        "display_name": Name().fake::<String>()
    })
}

#[tokio::test]
async fn test_register_with_valid_data() {
    // Arrange
    let app = TestApp::new().await;

    // Act
    let response = app
        .server
        .post("/api/v1/auth/register")
        .json(&registration(&unique_email(), &unique_username()))
        .await;

    // Assert
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["user"]["role"], "student");
    assert_eq!(body["token_type"], "Bearer");
    assert!(body["user"]["id"].is_string());
    assert!(body["user"].get("password_hash").is_none());
    assert!(!body["refresh_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_register_as_tutor() {
    let app = TestApp::new().await;
    let mut body = registration(&unique_email(), &unique_username());
    body["role"] = json!("tutor");

    let response = app.server.post("/api/v1/auth/register").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["user"]["role"], "tutor");
}

#[tokio::test]
async fn test_register_rejects_admin_and_unknown_roles() {
    let app = TestApp::new().await;

    for role in ["admin", "wizard"] {
        let mut body = registration(&unique_email(), &unique_username());
        body["role"] = json!(role);

        let response = app.server.post("/api/v1/auth/register").json(&body).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "role {}", role);
    }
}

#[tokio::test]
async fn test_register_with_invalid_fields_fails() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/auth/register")
        .json(&json!({ "email": "not-an-email", "username": "x", "password": "short" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email", "password", "username"]);
}

#[tokio::test]
async fn test_register_with_duplicate_email_fails() {
    let app = TestApp::new().await;
    let email = unique_email();
    app.server
        .post("/api/v1/auth/register")
        .json(&registration(&email, &unique_username()))
        .await;

    let response = app
        .server
        .post("/api/v1/auth/register")
        .json(&registration(&email, &unique_username()))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_with_valid_and_wrong_password() {
    let app = TestApp::new().await;
    let email = unique_email();
    app.server
        .post("/api/v1/auth/register")
        .json(&registration(&email, &unique_username()))
        .await;

    let ok = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": email, "password": "ValidPassword123!" }))
        .await;
    assert_eq!(ok.status_code(), StatusCode::OK);
    assert!(ok.json::<Value>()["access_token"].is_string());

    let wrong = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": email, "password": "WrongPassword123!" }))
        .await;
    assert_eq!(wrong.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rotates_and_logout_revokes() {
    let app = TestApp::new().await;
    let registered: Value = app
        .server
        .post("/api/v1/auth/register")
        .json(&registration(&unique_email(), &unique_username()))
        .await
        .json();
    let first = registered["refresh_token"].as_str().unwrap().to_string();

    let refreshed = app
        .server
        .post("/api/v1/auth/refresh")
        .json(&json!({ "refresh_token": first }))
        .await;
    assert_eq!(refreshed.status_code(), StatusCode::OK);
    let second = refreshed.json::<Value>()["refresh_token"]
        .as_str()
        .unwrap()
        .to_string();
    assert_ne!(first, second);

    // The rotated-out token is dead
    let reused = app
        .server
        .post("/api/v1/auth/refresh")
        .json(&json!({ "refresh_token": first }))
        .await;
    assert_eq!(reused.status_code(), StatusCode::UNAUTHORIZED);

    let logout = app
        .server
        .post("/api/v1/auth/logout")
        .json(&json!({ "refresh_token": second }))
        .await;
    assert_eq!(logout.status_code(), StatusCode::NO_CONTENT);

    let after_logout = app
        .server
        .post("/api/v1/auth/refresh")
        .json(&json!({ "refresh_token": second }))
        .await;
    assert_eq!(after_logout.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_with_unknown_token_is_no_content() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/auth/logout")
        .json(&json!({ "refresh_token": "never-issued" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_current_user() {
    let app = TestApp::new().await;
    let email = unique_email();
    let request = registration(&email, &unique_username());
    let registered: Value = app
        .server
        .post("/api/v1/auth/register")
        .json(&request)
        .await
        .json();
    let token = registered["access_token"].as_str().unwrap().to_string();

    let response = app
        .server
        .get("/api/v1/users/@me")
        .authorization_bearer(token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["email"], email.as_str());
    assert_eq!(body["display_name"], request["display_name"]);
}

#[tokio::test]
async fn test_current_user_requires_valid_user_token() {
    let app = TestApp::new().await;

    let missing = app.server.get("/api/v1/users/@me").await;
    assert_eq!(missing.status_code(), StatusCode::UNAUTHORIZED);

    let garbage = app
        .server
        .get("/api/v1/users/@me")
        .authorization_bearer("not.a.jwt")
        .await;
    assert_eq!(garbage.status_code(), StatusCode::UNAUTHORIZED);

    let nucleus = app
        .server
        .get("/api/v1/users/@me")
        .authorization_bearer(app.token_for(1, UserRole::Nucleus))
        .await;
    assert_eq!(nucleus.status_code(), StatusCode::FORBIDDEN);
}
