//! Department API Tests

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::TestApp;

#[tokio::test]
async fn test_list_is_public_and_sorted_by_name() {
    let app = TestApp::new().await;
    app.insert_department("Physics", "physics", true);
    app.insert_department("Biology", "biology", true);
    app.insert_department("Latin", "latin", false);

    let active: Vec<Value> = app.server.get("/api/v1/departments").await.json();
    let names: Vec<&str> = active.iter().map(|d| d["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Biology", "Physics"]);

    let all: Vec<Value> = app
        .server
        .get("/api/v1/departments?include_inactive=true")
        .await
        .json();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_get_by_id_or_slug() {
    let app = TestApp::new().await;
    let physics = app.insert_department("Physics", "physics", true);

    let by_slug = app.server.get("/api/v1/departments/physics").await;
    assert_eq!(by_slug.status_code(), StatusCode::OK);
    assert_eq!(by_slug.json::<Value>()["id"], physics.id.to_string());

    let by_id = app
        .server
        .get(&format!("/api/v1/departments/{}", physics.id))
        .await;
    assert_eq!(by_id.json::<Value>()["slug"], "physics");

    let missing = app.server.get("/api/v1/departments/astrology").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_requires_staff() {
    let app = TestApp::new().await;
    let body = json!({ "name": "Geography" });

    let anonymous = app.server.post("/api/v1/departments").json(&body).await;
    assert_eq!(anonymous.status_code(), StatusCode::UNAUTHORIZED);

    let student = app
        .server
        .post("/api/v1/departments")
        .authorization_bearer(app.student_token())
        .json(&body)
        .await;
    assert_eq!(student.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_derives_slug_and_rejects_duplicates() {
    let app = TestApp::new().await;

    let created = app
        .server
        .post("/api/v1/departments")
        .authorization_bearer(app.admin_token())
        .json(&json!({ "name": "  Computer Science & AI ", "description": "Code" }))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let body: Value = created.json();
    assert_eq!(body["name"], "Computer Science & AI");
    assert_eq!(body["slug"], "computer-science-ai");
    assert_eq!(body["is_active"], true);

    let duplicate = app
        .server
        .post("/api/v1/departments")
        .authorization_bearer(app.admin_token())
        .json(&json!({ "name": "Other", "slug": "computer-science-ai" }))
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_validates_name_and_slug() {
    let app = TestApp::new().await;

    let missing_name = app
        .server
        .post("/api/v1/departments")
        .authorization_bearer(app.admin_token())
        .json(&json!({}))
        .await;
    assert_eq!(missing_name.status_code(), StatusCode::BAD_REQUEST);

    let bad_slug = app
        .server
        .post("/api/v1/departments")
        .authorization_bearer(app.admin_token())
        .json(&json!({ "name": "History", "slug": "Not A Slug" }))
        .await;
    assert_eq!(bad_slug.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_padded_name_is_checked_after_trimming() {
    let app = TestApp::new().await;
    let maths = app.insert_department("Mathematics", "mathematics", true);

    let created = app
        .server
        .post("/api/v1/departments")
        .authorization_bearer(app.admin_token())
        .json(&json!({ "name": "  x  ", "slug": "xx" }))
        .await;
    assert_eq!(created.status_code(), StatusCode::BAD_REQUEST);
    assert!(app.departments.rows.lock().iter().all(|d| d.slug != "xx"));

    let renamed = app
        .server
        .patch(&format!("/api/v1/departments/{}", maths.id))
        .authorization_bearer(app.admin_token())
        .json(&json!({ "name": " y  " }))
        .await;
    assert_eq!(renamed.status_code(), StatusCode::BAD_REQUEST);

    let unchanged: Value = app.server.get("/api/v1/departments/mathematics").await.json();
    assert_eq!(unchanged["name"], "Mathematics");
}

#[tokio::test]
async fn test_partial_update() {
    let app = TestApp::new().await;
    let chemistry = app.insert_department("Chemistry", "chemistry", true);
    let uri = format!("/api/v1/departments/{}", chemistry.id);

    let response = app
        .server
        .patch(&uri)
        .authorization_bearer(app.admin_token())
        .json(&json!({ "description": "Atoms", "is_active": false }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["name"], "Chemistry");
    assert_eq!(body["description"], "Atoms");
    assert_eq!(body["is_active"], false);

    let cleared: Value = app
        .server
        .patch(&uri)
        .authorization_bearer(app.admin_token())
        .json(&json!({ "description": null }))
        .await
        .json();
    assert_eq!(cleared["description"], Value::Null);
}

#[tokio::test]
async fn test_update_missing_and_conflicting() {
    let app = TestApp::new().await;
    app.insert_department("Biology", "biology", true);
    let physics = app.insert_department("Physics", "physics", true);

    let missing = app
        .server
        .patch("/api/v1/departments/12345")
        .authorization_bearer(app.admin_token())
        .json(&json!({ "name": "Ghost" }))
        .await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

    let clash = app
        .server
        .patch(&format!("/api/v1/departments/{}", physics.id))
        .authorization_bearer(app.admin_token())
        .json(&json!({ "slug": "biology" }))
        .await;
    assert_eq!(clash.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete() {
    let app = TestApp::new().await;
    let english = app.insert_department("English", "english", true);
    let uri = format!("/api/v1/departments/{}", english.id);

    let deleted = app
        .server
        .delete(&uri)
        .authorization_bearer(app.admin_token())
        .await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);

    let again = app
        .server
        .delete(&uri)
        .authorization_bearer(app.admin_token())
        .await;
    assert_eq!(again.status_code(), StatusCode::NOT_FOUND);

    let bad_id = app
        .server
        .delete("/api/v1/departments/english")
        .authorization_bearer(app.admin_token())
        .await;
    assert_eq!(bad_id.status_code(), StatusCode::BAD_REQUEST);
}
