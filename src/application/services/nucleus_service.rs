//! Nucleus Service
//!
//! Super-admin login with an audit trail. Nucleus sessions are short-lived
//! access tokens with the `nucleus` role; there is no refresh flow.

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::application::services::auth_service::issue_access_token;
use crate::config::JwtSettings;
use crate::domain::{
    AuditAction, NewAuditLog, NucleusAuditLog, NucleusRepository, NucleusUser, UserRole,
};
use crate::shared::error::AppError;
use crate::shared::password::verify_password;

pub const AUDIT_LOG_DEFAULT_LIMIT: i64 = 50;
pub const AUDIT_LOG_MAX_LIMIT: i64 = 200;

/// Nucleus service trait
#[async_trait]
pub trait NucleusService: Send + Sync {
    /// Verify nucleus credentials and record the attempt
    async fn login(&self, attempt: NucleusLoginDto) -> Result<NucleusSession, NucleusError>;

    /// Most recent audit rows, newest first
    async fn audit_logs(&self, limit: Option<i64>) -> Result<Vec<NucleusAuditLog>, NucleusError>;
}

/// Login attempt with request metadata for the audit trail
#[derive(Debug, Clone)]
pub struct NucleusLoginDto {
    pub email: String,
    pub password: String,
    pub ip_address: Option<IpAddr>,
    pub user_agent: Option<String>,
}

/// Successful nucleus login
#[derive(Debug, Clone)]
pub struct NucleusSession {
    pub access_token: String,
    pub expires_in: i64,
    pub user: NucleusUser,
}

/// Nucleus service errors
#[derive(Debug, thiserror::Error)]
pub enum NucleusError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AppError> for NucleusError {
    fn from(e: AppError) -> Self {
        NucleusError::Internal(e.to_string())
    }
}

impl From<NucleusError> for AppError {
    fn from(e: NucleusError) -> Self {
        match e {
            NucleusError::InvalidCredentials => AppError::Unauthorized(e.to_string()),
            NucleusError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Clamp a requested audit page size.
pub fn clamp_audit_limit(requested: Option<i64>) -> i64 {
    requested
        .unwrap_or(AUDIT_LOG_DEFAULT_LIMIT)
        .clamp(1, AUDIT_LOG_MAX_LIMIT)
}

/// NucleusService implementation
pub struct NucleusServiceImpl {
    nucleus_repo: Arc<dyn NucleusRepository>,
    jwt_settings: JwtSettings,
}

impl NucleusServiceImpl {
    pub fn new(nucleus_repo: Arc<dyn NucleusRepository>, jwt_settings: JwtSettings) -> Self {
        Self {
            nucleus_repo,
            jwt_settings,
        }
    }

    /// Write an audit row. Failures are logged, never surfaced to the caller.
    async fn audit(
        &self,
        attempt: &NucleusLoginDto,
        nucleus_user_id: Option<i64>,
        action: AuditAction,
        reason: Option<&str>,
    ) {
        let details = match reason {
            Some(reason) => json!({ "email": attempt.email, "reason": reason }),
            None => json!({ "email": attempt.email }),
        };
        let entry = NewAuditLog {
            nucleus_user_id,
            action,
            ip_address: attempt.ip_address,
            user_agent: attempt.user_agent.clone(),
            details,
        };
        if let Err(e) = self.nucleus_repo.record_audit(&entry).await {
            tracing::error!(error = %e, action = action.as_str(), "Failed to write nucleus audit log");
        }
    }
}

#[async_trait]
impl NucleusService for NucleusServiceImpl {
    async fn login(&self, attempt: NucleusLoginDto) -> Result<NucleusSession, NucleusError> {
        let account = self.nucleus_repo.find_by_email(&attempt.email).await?;

        let mut user = match account {
            None => {
                self.audit(&attempt, None, AuditAction::LoginFailed, Some("unknown_email"))
                    .await;
                return Err(NucleusError::InvalidCredentials);
            }
            Some(user) if !user.is_active => {
                self.audit(&attempt, Some(user.id), AuditAction::LoginFailed, Some("inactive"))
                    .await;
                return Err(NucleusError::InvalidCredentials);
            }
            Some(user) => user,
        };

        let valid = match verify_password(&attempt.password, &user.password_hash) {
            Ok(valid) => valid,
            Err(e) => {
                self.audit(&attempt, Some(user.id), AuditAction::LoginFailed, Some("invalid_hash"))
                    .await;
                return Err(NucleusError::Internal(format!("Invalid password hash: {}", e)));
            }
        };
        if !valid {
            self.audit(&attempt, Some(user.id), AuditAction::LoginFailed, Some("bad_password"))
                .await;
            return Err(NucleusError::InvalidCredentials);
        }

        let (access_token, expires_in) = issue_access_token(
            &self.jwt_settings.secret,
            user.id,
            UserRole::Nucleus,
            self.jwt_settings.nucleus_token_expiry_minutes,
        )
        .map_err(|e| NucleusError::Internal(e.to_string()))?;

        self.nucleus_repo.touch_last_login(user.id).await?;
        user.last_login_at = Some(Utc::now());
        self.audit(&attempt, Some(user.id), AuditAction::LoginSuccess, None)
            .await;

        tracing::info!(nucleus_user_id = user.id, "Nucleus login");
        Ok(NucleusSession {
            access_token,
            expires_in,
            user,
        })
    }

    async fn audit_logs(&self, limit: Option<i64>) -> Result<Vec<NucleusAuditLog>, NucleusError> {
        Ok(self
            .nucleus_repo
            .recent_audit_logs(clamp_audit_limit(limit))
            .await?)
    }
}
