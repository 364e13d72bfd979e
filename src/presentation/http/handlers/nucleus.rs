//! Nucleus Handlers
//!
//! Super-admin login and audit trail.

use axum::{
    extract::{Extension, Query, State},
    Json,
};
use axum_extra::{headers::UserAgent, TypedHeader};

use crate::application::dto::request::{AuditLogParams, LoginRequest};
use crate::application::dto::response::{AuditLogResponse, NucleusLoginResponse};
use crate::application::services::{NucleusLoginDto, NucleusService};
use crate::presentation::http::extractors::ClientIp;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validate_request;
use crate::startup::AppState;

/// Nucleus login. Every attempt is audited with the client address.
pub async fn login(
    State(state): State<AppState>,
    ClientIp(ip_address): ClientIp,
    user_agent: Option<TypedHeader<UserAgent>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<NucleusLoginResponse>, AppError> {
    validate_request(&body)?;

    let session = state
        .nucleus_service()
        .login(NucleusLoginDto {
            email: body.email,
            password: body.password,
            ip_address,
            user_agent: user_agent.map(|TypedHeader(ua)| ua.as_str().to_string()),
        })
        .await?;

    Ok(Json(session.into()))
}

/// Newest audit rows first (nucleus only)
pub async fn get_audit_logs(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(params): Query<AuditLogParams>,
) -> Result<Json<Vec<AuditLogResponse>>, AppError> {
    auth.require_nucleus()?;

    let logs = state.nucleus_service().audit_logs(params.limit).await?;
    Ok(Json(logs.into_iter().map(Into::into).collect()))
}
