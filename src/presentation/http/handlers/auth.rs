//! Authentication Handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::request::{LoginRequest, RefreshTokenRequest, RegisterRequest};
use crate::application::dto::response::{RegisterResponse, TokenResponse};
use crate::application::services::{AuthService, RegisterUserDto};
use crate::domain::UserRole;
use crate::shared::error::AppError;
use crate::shared::validation::validate_request;
use crate::startup::AppState;

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    validate_request(&body)?;

    let role = match body.role.as_deref() {
        None => UserRole::default(),
        Some(raw) => UserRole::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown role: {}", raw)))?,
    };

    let (user, tokens) = state
        .auth_service()
        .register(RegisterUserDto {
            username: body.username,
            email: body.email,
            password: body.password,
            display_name: body.display_name,
            role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(RegisterResponse::new(user, tokens))))
}

/// Login with credentials
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    validate_request(&body)?;

    let tokens = state
        .auth_service()
        .authenticate(&body.email, &body.password)
        .await?;

    Ok(Json(TokenResponse::from(tokens)))
}

/// Exchange a refresh token for a new token pair
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(body): Json<RefreshTokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let tokens = state
        .auth_service()
        .refresh_token(&body.refresh_token)
        .await?;

    Ok(Json(TokenResponse::from(tokens)))
}

/// Logout (revoke refresh token)
pub async fn logout(
    State(state): State<AppState>,
    Json(body): Json<RefreshTokenRequest>,
) -> Result<StatusCode, AppError> {
    state
        .auth_service()
        .revoke_token(&body.refresh_token)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
