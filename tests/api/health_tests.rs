//! Health Check API Tests

use axum::http::StatusCode;
use serde_json::Value;

use crate::common::TestApp;

#[tokio::test]
async fn test_health_check_returns_status_and_version() {
    let app = TestApp::new().await;

    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_liveness_probe() {
    let app = TestApp::new().await;

    let response = app.server.get("/health/live").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "alive");
}

#[tokio::test]
async fn test_readiness_unavailable_without_database() {
    let app = TestApp::new().await;

    let response = app.server.get("/health/ready").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["checks"]["database"]["status"], "unhealthy");
    assert_eq!(body["checks"]["redis"]["status"], "degraded");
    assert_eq!(body["checks"]["chat"]["active_connections"], 0);
}

#[tokio::test]
async fn test_metrics_exposes_http_counters() {
    let app = TestApp::new().await;
    app.server.get("/health").await;

    let response = app.server.get("/metrics").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("tutor_platform_http_requests_total"));
}
