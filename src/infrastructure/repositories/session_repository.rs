//! PostgreSQL refresh-token sessions (`user_sessions` table).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Session, SessionRepository};
use crate::shared::error::AppError;

const RETURNING: &str = "RETURNING id, user_id, refresh_token_hash, expires_at, created_at, revoked_at";

#[derive(Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AppError> {
        Ok(sqlx::query_as::<_, Session>(
            "SELECT id, user_id, refresh_token_hash, expires_at, created_at, revoked_at \
             FROM user_sessions WHERE refresh_token_hash = $1",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn create(&self, session: &Session) -> Result<Session, AppError> {
        let sql = format!(
            "INSERT INTO user_sessions (id, user_id, refresh_token_hash, expires_at) \
             VALUES ($1, $2, $3, $4) {}",
            RETURNING
        );

        sqlx::query_as::<_, Session>(&sql)
            .bind(session.id)
            .bind(session.user_id)
            .bind(&session.refresh_token_hash)
            .bind(session.expires_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, "Session already exists", "User not found"))
    }

    /// Fails with `NotFound` when the session is gone or already revoked,
    /// so a concurrent logout wins over a refresh.
    async fn rotate(
        &self,
        id: Uuid,
        new_token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let rotated = sqlx::query(
            "UPDATE user_sessions SET refresh_token_hash = $2, expires_at = $3 \
             WHERE id = $1 AND revoked_at IS NULL",
        )
        .bind(id)
        .bind(new_token_hash)
        .bind(expires_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        match rotated {
            0 => Err(AppError::NotFound(format!("Session {} not found", id))),
            _ => Ok(()),
        }
    }

    async fn revoke(&self, id: Uuid) -> Result<(), AppError> {
        // keep the first revocation time
        sqlx::query("UPDATE user_sessions SET revoked_at = COALESCE(revoked_at, NOW()) WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
