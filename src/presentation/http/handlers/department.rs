//! Department Handlers

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{
    CreateDepartmentRequest, DepartmentListParams, UpdateDepartmentRequest,
};
use crate::application::dto::response::DepartmentResponse;
use crate::application::services::{CreateDepartmentDto, DepartmentService, UpdateDepartmentDto};
use crate::presentation::http::extractors::parse_id;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validate_request;
use crate::startup::AppState;

/// List departments ordered by name
pub async fn list_departments(
    State(state): State<AppState>,
    Query(params): Query<DepartmentListParams>,
) -> Result<Json<Vec<DepartmentResponse>>, AppError> {
    let departments = state
        .department_service()
        .list(params.include_inactive)
        .await?;

    Ok(Json(departments.into_iter().map(Into::into).collect()))
}

/// Get a department by id or slug
pub async fn get_department(
    State(state): State<AppState>,
    Path(id_or_slug): Path<String>,
) -> Result<Json<DepartmentResponse>, AppError> {
    let department = state.department_service().get(&id_or_slug).await?;
    Ok(Json(department.into()))
}

/// Create a department (staff)
pub async fn create_department(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<CreateDepartmentRequest>,
) -> Result<(StatusCode, Json<DepartmentResponse>), AppError> {
    auth.require_staff()?;
    validate_request(&body)?;

    let department = state
        .department_service()
        .create(CreateDepartmentDto {
            name: body.name,
            slug: body.slug,
            description: body.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(department.into())))
}

/// Partially update a department (staff)
pub async fn update_department(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(department_id): Path<String>,
    Json(body): Json<UpdateDepartmentRequest>,
) -> Result<Json<DepartmentResponse>, AppError> {
    auth.require_staff()?;
    validate_request(&body)?;
    let department_id = parse_id(&department_id, "department")?;

    let department = state
        .department_service()
        .update(
            department_id,
            UpdateDepartmentDto {
                name: body.name,
                slug: body.slug,
                description: body.description,
                is_active: body.is_active,
            },
        )
        .await?;

    Ok(Json(department.into()))
}

/// Delete a department with its counters and chat history (staff)
pub async fn delete_department(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(department_id): Path<String>,
) -> Result<StatusCode, AppError> {
    auth.require_staff()?;
    let department_id = parse_id(&department_id, "department")?;

    state.department_service().delete(department_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
