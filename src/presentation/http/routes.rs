//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    http::header,
    middleware,
    response::IntoResponse,
    routing::{get, patch, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{
    auth_middleware, logging::track_metrics, rate_limit_auth, rate_limit_nucleus,
};
use crate::presentation::websocket::ws_handler;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes(state.clone()))
        // Department chat relay
        .route("/ws/chat", get(ws_handler))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        metrics::gather_metrics(),
    )
}

/// API v1 routes
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes(state.clone()))
        .merge(nucleus_login_route(state.clone()))
        .merge(public_routes())
        .merge(protected_routes(state))
}

/// Authentication routes (public, rate limited)
fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/refresh", post(handlers::auth::refresh_token))
        .route("/logout", post(handlers::auth::logout))
        .route_layer(middleware::from_fn_with_state(state, rate_limit_auth))
}

/// Nucleus login (public, rate limited)
fn nucleus_login_route(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/nucleus/login", post(handlers::nucleus::login))
        .route_layer(middleware::from_fn_with_state(state, rate_limit_nucleus))
}

/// Catalogue reads and CTA clicks need no account
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/departments", get(handlers::department::list_departments))
        .route("/departments/{id}", get(handlers::department::get_department))
        .route(
            "/departments/{id}/cta/{cta_key}",
            post(handlers::cta::record_department_click),
        )
        .route("/cta/{cta_key}", post(handlers::cta::record_platform_click))
}

/// Routes behind a bearer token. Role checks happen in the handlers.
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/users/@me", get(handlers::user::get_current_user))
        .route(
            "/departments",
            post(handlers::department::create_department),
        )
        .route(
            "/departments/{id}",
            patch(handlers::department::update_department)
                .delete(handlers::department::delete_department),
        )
        .route(
            "/departments/{id}/cta",
            get(handlers::cta::get_department_counters),
        )
        .route(
            "/departments/{id}/messages",
            get(handlers::chat::get_messages),
        )
        .route("/cta", get(handlers::cta::get_platform_counters))
        .route("/tests/generate", post(handlers::test_generation::generate_test))
        .route("/nucleus/audit-logs", get(handlers::nucleus::get_audit_logs))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
