//! Nucleus (super-admin) records.
//!
//! `nucleus_users` and `nucleus_audit_logs` are managed outside the regular
//! account flow and are only touched through hand-written SQL.

use std::net::IpAddr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Super-admin account.
///
/// Maps to the `nucleus_users` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - email: VARCHAR(255) NOT NULL UNIQUE
/// - password_hash: VARCHAR(255) NOT NULL
/// - full_name: VARCHAR(100) NOT NULL
/// - is_active: BOOLEAN NOT NULL DEFAULT TRUE
/// - last_login_at: TIMESTAMPTZ NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NucleusUser {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Audited nucleus actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    LoginSuccess,
    LoginFailed,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoginSuccess => "login_success",
            Self::LoginFailed => "login_failed",
        }
    }
}

/// Audit row to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditLog {
    /// Known account, if the attempt matched one
    pub nucleus_user_id: Option<i64>,
    pub action: AuditAction,
    pub ip_address: Option<IpAddr>,
    pub user_agent: Option<String>,
    pub details: serde_json::Value,
}

/// Stored audit row (`nucleus_audit_logs`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NucleusAuditLog {
    pub id: i64,
    pub nucleus_user_id: Option<i64>,
    pub action: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Raw-SQL data access for the nucleus tier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NucleusRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<NucleusUser>, AppError>;

    async fn touch_last_login(&self, id: i64) -> Result<(), AppError>;

    async fn record_audit(&self, entry: &NewAuditLog) -> Result<(), AppError>;

    /// Newest entries first.
    async fn recent_audit_logs(&self, limit: i64) -> Result<Vec<NucleusAuditLog>, AppError>;
}
