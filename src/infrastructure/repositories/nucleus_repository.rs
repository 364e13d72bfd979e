//! Nucleus Repository Implementation
//!
//! Hand-written SQL against `nucleus_users` and `nucleus_audit_logs`.
//! IP addresses are stored as INET and travel as text.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{NewAuditLog, NucleusAuditLog, NucleusRepository, NucleusUser};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct NucleusUserRow {
    id: i64,
    email: String,
    password_hash: String,
    full_name: String,
    is_active: bool,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<NucleusUserRow> for NucleusUser {
    fn from(row: NucleusUserRow) -> Self {
        NucleusUser {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            full_name: row.full_name,
            is_active: row.is_active,
            last_login_at: row.last_login_at,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AuditLogRow {
    id: i64,
    nucleus_user_id: Option<i64>,
    action: String,
    ip_address: Option<String>,
    user_agent: Option<String>,
    details: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl From<AuditLogRow> for NucleusAuditLog {
    fn from(row: AuditLogRow) -> Self {
        NucleusAuditLog {
            id: row.id,
            nucleus_user_id: row.nucleus_user_id,
            action: row.action,
            ip_address: row.ip_address,
            user_agent: row.user_agent,
            details: row.details,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL nucleus repository.
#[derive(Clone)]
pub struct PgNucleusRepository {
    pool: PgPool,
}

impl PgNucleusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NucleusRepository for PgNucleusRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<NucleusUser>, AppError> {
        let row = sqlx::query_as::<_, NucleusUserRow>(
            r#"
            SELECT id, email, password_hash, full_name, is_active, last_login_at, created_at
            FROM nucleus_users
            WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(NucleusUser::from))
    }

    async fn touch_last_login(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE nucleus_users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn record_audit(&self, entry: &NewAuditLog) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO nucleus_audit_logs (nucleus_user_id, action, ip_address, user_agent, details)
            VALUES ($1, $2, $3::INET, $4, $5)
            "#,
        )
        .bind(entry.nucleus_user_id)
        .bind(entry.action.as_str())
        .bind(entry.ip_address.map(|ip| ip.to_string()))
        .bind(&entry.user_agent)
        .bind(&entry.details)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn recent_audit_logs(&self, limit: i64) -> Result<Vec<NucleusAuditLog>, AppError> {
        let rows = sqlx::query_as::<_, AuditLogRow>(
            r#"
            SELECT id, nucleus_user_id, action, HOST(ip_address) AS ip_address,
                   user_agent, details, created_at
            FROM nucleus_audit_logs
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(NucleusAuditLog::from).collect())
    }
}
