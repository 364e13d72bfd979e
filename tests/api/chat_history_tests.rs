//! Department Chat History API Tests

use axum::http::StatusCode;
use serde_json::Value;

use crate::common::TestApp;
use tutor_platform::application::services::{ChatService, PostMessageDto};

async fn post(app: &TestApp, department_id: i64, content: &str) -> i64 {
    app.state
        .chat_service()
        .post_message(PostMessageDto {
            department_id,
            author_id: None,
            author_name: "Guest".into(),
            content: content.into(),
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_history_is_chronological_and_paged() {
    let app = TestApp::new().await;
    let physics = app.insert_department("Physics", "physics", true);
    let mut ids = Vec::new();
    for i in 1..=5 {
        ids.push(post(&app, physics.id, &format!("message {}", i)).await);
    }
    let uri = format!("/api/v1/departments/{}/messages", physics.id);

    let latest: Vec<Value> = app
        .server
        .get(&format!("{}?limit=2", uri))
        .authorization_bearer(app.student_token())
        .await
        .json();
    let contents: Vec<&str> = latest.iter().map(|m| m["content"].as_str().unwrap()).collect();
    assert_eq!(contents, vec!["message 4", "message 5"]);

    let older: Vec<Value> = app
        .server
        .get(&format!("{}?limit=2&before={}", uri, ids[3]))
        .authorization_bearer(app.student_token())
        .await
        .json();
    let contents: Vec<&str> = older.iter().map(|m| m["content"].as_str().unwrap()).collect();
    assert_eq!(contents, vec!["message 2", "message 3"]);
}

#[tokio::test]
async fn test_history_requires_token_and_known_department() {
    let app = TestApp::new().await;
    let physics = app.insert_department("Physics", "physics", true);

    let anonymous = app
        .server
        .get(&format!("/api/v1/departments/{}/messages", physics.id))
        .await;
    assert_eq!(anonymous.status_code(), StatusCode::UNAUTHORIZED);

    let unknown = app
        .server
        .get("/api/v1/departments/424242/messages")
        .authorization_bearer(app.student_token())
        .await;
    assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);

    let bad_cursor = app
        .server
        .get(&format!("/api/v1/departments/{}/messages?before=latest", physics.id))
        .authorization_bearer(app.student_token())
        .await;
    assert_eq!(bad_cursor.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_persisted_message_shape() {
    let app = TestApp::new().await;
    let physics = app.insert_department("Physics", "physics", true);
    post(&app, physics.id, "  hello room  ").await;

    let history: Vec<Value> = app
        .server
        .get(&format!("/api/v1/departments/{}/messages", physics.id))
        .authorization_bearer(app.student_token())
        .await
        .json();

    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["content"], "hello room");
    assert_eq!(history[0]["author_name"], "Guest");
    assert_eq!(history[0]["author_id"], Value::Null);
    assert_eq!(history[0]["department_id"], physics.id.to_string());
    assert_eq!(app.chat_messages.rows.lock().len(), 1);
}
