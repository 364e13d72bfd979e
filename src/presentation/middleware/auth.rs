//! Authentication Middleware
//!
//! JWT validation middleware for protected routes.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::application::services::auth_service::decode_access_token;
use crate::application::services::AuthError;
use crate::domain::UserRole;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Authenticated principal, inserted into request extensions by
/// [`auth_middleware`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    /// `users.id`, or `nucleus_users.id` when `role` is `Nucleus`
    pub user_id: i64,
    pub role: UserRole,
}

impl AuthUser {
    /// Admins and nucleus accounts.
    pub fn require_staff(&self) -> Result<(), AppError> {
        if self.role.is_staff() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Staff access required".into()))
        }
    }

    pub fn require_nucleus(&self) -> Result<(), AppError> {
        if self.role == UserRole::Nucleus {
            Ok(())
        } else {
            Err(AppError::Forbidden("Nucleus access required".into()))
        }
    }
}

/// Authentication middleware that validates JWT tokens
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?;

    // Check for Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".into()))?;

    let claims = decode_access_token(&state.settings.jwt.secret, token).map_err(|e| match e {
        AuthError::TokenExpired => AppError::Unauthorized("Token expired".into()),
        _ => AppError::Unauthorized("Invalid token".into()),
    })?;

    let user_id: i64 = claims
        .sub
        .parse()
        .map_err(|_| AppError::Unauthorized("Invalid token claims".into()))?;

    // Insert authenticated user into request extensions
    request.extensions_mut().insert(AuthUser {
        user_id,
        role: claims.role,
    });

    Ok(next.run(request).await)
}
