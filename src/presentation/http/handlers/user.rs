//! User Handlers

use axum::{
    extract::{Extension, State},
    Json,
};

use crate::application::dto::response::UserResponse;
use crate::application::services::AuthService;
use crate::domain::UserRole;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Get current authenticated user
pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<UserResponse>, AppError> {
    // Nucleus ids live in a separate table
    if auth.role == UserRole::Nucleus {
        return Err(AppError::Forbidden(
            "Nucleus accounts have no user profile".into(),
        ));
    }

    let user = state.auth_service().get_user(auth.user_id).await?;

    Ok(Json(UserResponse::from(user)))
}
