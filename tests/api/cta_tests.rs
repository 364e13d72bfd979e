//! CTA Tracking API Tests

use axum::http::StatusCode;
use serde_json::Value;

use crate::common::TestApp;

#[tokio::test]
async fn test_department_clicks_accumulate() {
    let app = TestApp::new().await;
    let maths = app.insert_department("Mathematics", "mathematics", true);
    let uri = format!("/api/v1/departments/{}/cta/book-trial", maths.id);

    let first: Value = app.server.post(&uri).await.json();
    let second = app.server.post(&uri).await;

    assert_eq!(second.status_code(), StatusCode::OK);
    let second: Value = second.json();
    assert_eq!(first["click_count"], 1);
    assert_eq!(second["click_count"], 2);
    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["department_id"], maths.id.to_string());
}

#[tokio::test]
async fn test_department_click_errors() {
    let app = TestApp::new().await;
    let maths = app.insert_department("Mathematics", "mathematics", true);

    let unknown = app.server.post("/api/v1/departments/999/cta/book-trial").await;
    assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);

    let bad_key = app
        .server
        .post(&format!("/api/v1/departments/{}/cta/Book%20Trial", maths.id))
        .await;
    assert_eq!(bad_key.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_department_counters_are_staff_only_and_sorted() {
    let app = TestApp::new().await;
    let maths = app.insert_department("Mathematics", "mathematics", true);
    let base = format!("/api/v1/departments/{}/cta", maths.id);
    app.server.post(&format!("{}/hero", base)).await;
    app.server.post(&format!("{}/footer", base)).await;
    app.server.post(&format!("{}/footer", base)).await;

    let student = app
        .server
        .get(&base)
        .authorization_bearer(app.student_token())
        .await;
    assert_eq!(student.status_code(), StatusCode::FORBIDDEN);

    let counters: Vec<Value> = app
        .server
        .get(&base)
        .authorization_bearer(app.admin_token())
        .await
        .json();
    let keys: Vec<&str> = counters.iter().map(|c| c["cta_key"].as_str().unwrap()).collect();
    assert_eq!(keys, vec!["footer", "hero"]);
}

#[tokio::test]
async fn test_platform_clicks() {
    let app = TestApp::new().await;

    let web: Value = app.server.post("/api/v1/cta/signup").await.json();
    assert_eq!(web["platform"], "web");

    let ios: Value = app
        .server
        .post("/api/v1/cta/signup?platform=ios")
        .await
        .json();
    assert_eq!(ios["platform"], "ios");
    assert_eq!(ios["click_count"], 1);

    let unknown = app.server.post("/api/v1/cta/signup?platform=desktop").await;
    assert_eq!(unknown.status_code(), StatusCode::BAD_REQUEST);

    let counters: Vec<Value> = app
        .server
        .get("/api/v1/cta")
        .authorization_bearer(app.admin_token())
        .await
        .json();
    assert_eq!(counters.len(), 2);
}
