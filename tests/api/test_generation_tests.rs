//! Practice Test Generation API Tests

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::TestApp;

#[tokio::test]
async fn test_generate_with_defaults() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/tests/generate")
        .authorization_bearer(app.student_token())
        .json(&json!({ "subject": "Mathematics", "topic": "Fractions" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "stub");
    assert_eq!(body["difficulty"], "medium");
    assert_eq!(body["questions"].as_array().unwrap().len(), 10);
    assert_eq!(body["questions"][5]["answer_index"], 1);
    assert!(body.get("department_id").is_none());
}

#[tokio::test]
async fn test_generate_with_options() {
    let app = TestApp::new().await;

    let body: Value = app
        .server
        .post("/api/v1/tests/generate")
        .authorization_bearer(app.student_token())
        .json(&json!({
            "subject": "Physics",
            "topic": "Optics",
            "difficulty": "hard",
            "question_count": 3,
            "department_id": "77"
        }))
        .await
        .json();

    assert_eq!(body["difficulty"], "hard");
    assert_eq!(body["department_id"], "77");
    assert_eq!(body["questions"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_generate_rejects_bad_input() {
    let app = TestApp::new().await;

    for body in [
        json!({ "subject": "Physics", "topic": "Optics", "difficulty": "brutal" }),
        json!({ "subject": "Physics", "topic": "Optics", "question_count": 0 }),
        json!({ "subject": "Physics", "topic": "Optics", "department_id": "dept" }),
        json!({ "topic": "Optics" }),
    ] {
        let response = app
            .server
            .post("/api/v1/tests/generate")
            .authorization_bearer(app.student_token())
            .json(&body)
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{}", body);
    }
}

#[tokio::test]
async fn test_generate_requires_token() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/tests/generate")
        .json(&json!({ "subject": "Physics", "topic": "Optics" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
