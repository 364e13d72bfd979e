//! Nucleus API Tests

use axum::http::{HeaderName, HeaderValue, StatusCode};
use serde_json::{json, Value};

use crate::common::{TestApp, NUCLEUS_EMAIL, NUCLEUS_PASSWORD};

#[tokio::test]
async fn test_login_success_is_audited() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/nucleus/login")
        .add_header(
            HeaderName::from_static("x-forwarded-for"),
            HeaderValue::from_static("203.0.113.9"),
        )
        .add_header(
            HeaderName::from_static("user-agent"),
            HeaderValue::from_static("ops-console/1.0"),
        )
        .json(&json!({ "email": NUCLEUS_EMAIL, "password": NUCLEUS_PASSWORD }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["nucleus_user"]["email"], NUCLEUS_EMAIL);
    assert!(body["nucleus_user"]["last_login_at"].is_string());

    let audits = app.nucleus.audits.lock();
    assert_eq!(audits.len(), 1);
    assert_eq!(audits[0].action, "login_success");
    assert_eq!(audits[0].ip_address.as_deref(), Some("203.0.113.9"));
    assert_eq!(audits[0].user_agent.as_deref(), Some("ops-console/1.0"));
}

#[tokio::test]
async fn test_failed_logins_share_message_and_are_audited() {
    let app = TestApp::new().await;

    let wrong_password = app
        .server
        .post("/api/v1/nucleus/login")
        .json(&json!({ "email": NUCLEUS_EMAIL, "password": "nope-nope-nope" }))
        .await;
    let unknown = app
        .server
        .post("/api/v1/nucleus/login")
        .json(&json!({ "email": "ghost@nucleus.test", "password": "nope-nope-nope" }))
        .await;

    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_password.json::<Value>()["message"],
        unknown.json::<Value>()["message"]
    );

    let audits = app.nucleus.audits.lock();
    let reasons: Vec<&str> = audits
        .iter()
        .map(|a| a.details["reason"].as_str().unwrap())
        .collect();
    assert_eq!(reasons, vec!["bad_password", "unknown_email"]);
    assert!(audits.iter().all(|a| a.action == "login_failed"));
}

#[tokio::test]
async fn test_audit_logs_nucleus_only_newest_first() {
    let app = TestApp::new().await;
    let login: Value = app
        .server
        .post("/api/v1/nucleus/login")
        .json(&json!({ "email": NUCLEUS_EMAIL, "password": "wrong-password" }))
        .await
        .json();
    assert!(login.get("access_token").is_none());

    let session: Value = app
        .server
        .post("/api/v1/nucleus/login")
        .json(&json!({ "email": NUCLEUS_EMAIL, "password": NUCLEUS_PASSWORD }))
        .await
        .json();
    let token = session["access_token"].as_str().unwrap().to_string();

    let admin = app
        .server
        .get("/api/v1/nucleus/audit-logs")
        .authorization_bearer(app.admin_token())
        .await;
    assert_eq!(admin.status_code(), StatusCode::FORBIDDEN);

    let logs: Vec<Value> = app
        .server
        .get("/api/v1/nucleus/audit-logs?limit=1")
        .authorization_bearer(token)
        .await
        .json();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["action"], "login_success");
}

#[tokio::test]
async fn test_nucleus_token_counts_as_staff() {
    let app = TestApp::new().await;
    let session: Value = app
        .server
        .post("/api/v1/nucleus/login")
        .json(&json!({ "email": NUCLEUS_EMAIL, "password": NUCLEUS_PASSWORD }))
        .await
        .json();

    let response = app
        .server
        .post("/api/v1/departments")
        .authorization_bearer(session["access_token"].as_str().unwrap())
        .json(&json!({ "name": "Astronomy" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
}
