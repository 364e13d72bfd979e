//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::UserRole;
use crate::shared::error::AppError;

/// A student, tutor or admin account.
///
/// Maps to the `users` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - username: VARCHAR(32) NOT NULL UNIQUE
/// - email: VARCHAR(255) NOT NULL UNIQUE
/// - password_hash: VARCHAR(255) NOT NULL
/// - display_name: VARCHAR(64) NULL
/// - role: VARCHAR(16) NOT NULL DEFAULT 'student'
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Snowflake ID (primary key)
    pub id: i64,

    /// Username (2-32 characters, unique)
    pub username: String,

    /// Email address (unique)
    pub email: String,

    /// Argon2 password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Name shown in chat and on the dashboard
    pub display_name: Option<String>,

    pub role: UserRole,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Name to show to other users; falls back to the username.
    pub fn visible_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

/// Repository trait for User data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their Snowflake ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Find a user by their email address (case-insensitive).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Create a new user in the database.
    async fn create(&self, user: &User) -> Result<User, AppError>;

    /// Check if an email address is already registered.
    async fn email_exists(&self, email: &str) -> Result<bool, AppError>;

    /// Check if a username is already taken.
    async fn username_exists(&self, username: &str) -> Result<bool, AppError>;
}
