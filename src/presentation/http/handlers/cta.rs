//! CTA Tracking Handlers

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};

use crate::application::dto::request::PlatformCtaParams;
use crate::application::dto::response::{CtaCounterResponse, PlatformCtaCounterResponse};
use crate::application::services::CtaService;
use crate::domain::Platform;
use crate::presentation::http::extractors::parse_id;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Count a click on a department CTA
pub async fn record_department_click(
    State(state): State<AppState>,
    Path((department_id, cta_key)): Path<(String, String)>,
) -> Result<Json<CtaCounterResponse>, AppError> {
    let department_id = parse_id(&department_id, "department")?;

    let counter = state
        .cta_service()
        .record_department_click(department_id, &cta_key)
        .await?;

    Ok(Json(counter.into()))
}

/// Department counters, highest first (staff)
pub async fn get_department_counters(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(department_id): Path<String>,
) -> Result<Json<Vec<CtaCounterResponse>>, AppError> {
    auth.require_staff()?;
    let department_id = parse_id(&department_id, "department")?;

    let counters = state
        .cta_service()
        .department_counters(department_id)
        .await?;

    Ok(Json(counters.into_iter().map(Into::into).collect()))
}

/// Count a click on a platform-wide CTA
pub async fn record_platform_click(
    State(state): State<AppState>,
    Path(cta_key): Path<String>,
    Query(params): Query<PlatformCtaParams>,
) -> Result<Json<PlatformCtaCounterResponse>, AppError> {
    let platform = match params.platform.as_deref() {
        None => Platform::default(),
        Some(raw) => Platform::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown platform: {}", raw)))?,
    };

    let counter = state
        .cta_service()
        .record_platform_click(&cta_key, platform)
        .await?;

    Ok(Json(counter.into()))
}

/// All platform counters (staff)
pub async fn get_platform_counters(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<PlatformCtaCounterResponse>>, AppError> {
    auth.require_staff()?;

    let counters = state.cta_service().platform_counters().await?;
    Ok(Json(counters.into_iter().map(Into::into).collect()))
}
