//! User Session entity and repository trait.
//!
//! Maps to the `user_sessions` table. One row per issued refresh token.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Refresh token session.
///
/// Maps to the `user_sessions` table:
/// - id: UUID PRIMARY KEY
/// - user_id: BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE
/// - refresh_token_hash: VARCHAR(64) NOT NULL UNIQUE (SHA-256 hex)
/// - expires_at: TIMESTAMPTZ NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - revoked_at: TIMESTAMPTZ NULL
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    pub id: Uuid,

    pub user_id: i64,

    /// SHA-256 hash of the refresh token (never store raw tokens)
    #[serde(skip_serializing)]
    pub refresh_token_hash: String,

    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,

    /// When the session was revoked (None if active)
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Create a new session.
    pub fn new(user_id: i64, refresh_token_hash: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            refresh_token_hash,
            expires_at,
            created_at: Utc::now(),
            revoked_at: None,
        }
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Not expired and not revoked.
    pub fn is_active(&self) -> bool {
        !self.is_revoked() && !self.is_expired()
    }
}

/// Repository trait for Session data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Find a session by refresh token hash.
    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AppError>;

    /// Create a new session.
    async fn create(&self, session: &Session) -> Result<Session, AppError>;

    /// Replace the token hash and expiry (refresh token rotation).
    async fn rotate(
        &self,
        id: Uuid,
        new_token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    /// Revoke a session (set revoked_at). Revoking twice is not an error.
    async fn revoke(&self, id: Uuid) -> Result<(), AppError>;
}
