//! PostgreSQL accounts store (`users` table).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{User, UserRepository, UserRole};
use crate::shared::error::AppError;

macro_rules! user_query {
    ($tail:literal) => {
        concat!(
            "SELECT id, username, email, password_hash, display_name, role, created_at, updated_at FROM users ",
            $tail
        )
    };
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    display_name: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for User {
    type Error = AppError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let role = UserRole::parse(&row.role)
            .filter(|role| *role != UserRole::Nucleus)
            .ok_or_else(|| {
                AppError::Internal(format!("user {} has unknown role '{}'", row.id, row.role))
            })?;

        Ok(User {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            display_name: row.display_name,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn lookup(&self, sql: &'static str, key: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, AccountRow>(sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn taken(&self, column: &'static str, value: &str) -> Result<bool, AppError> {
        // `column` is always one of our own literals
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER({}) = LOWER($1))",
            column
        );
        Ok(sqlx::query_scalar::<_, bool>(&sql)
            .bind(value)
            .fetch_one(&self.pool)
            .await?)
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, AccountRow>(user_query!("WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.lookup(user_query!("WHERE LOWER(email) = LOWER($1)"), email)
            .await
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO users (id, username, email, password_hash, display_name, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, username, email, password_hash, display_name, role, created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.display_name)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::from_write(
                e,
                "User with this email or username already exists",
                "Referenced record not found",
            )
        })?;

        User::try_from(row)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        self.taken("email", email).await
    }

    async fn username_exists(&self, username: &str) -> Result<bool, AppError> {
        self.taken("username", username).await
    }
}
