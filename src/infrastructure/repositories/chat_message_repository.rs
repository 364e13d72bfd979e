//! Chat Message Repository Implementation
//!
//! PostgreSQL implementation of the ChatMessageRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{ChatHistoryQuery, ChatMessageRepository, DeptChatMessage, NewChatMessage};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct ChatMessageRow {
    id: i64,
    department_id: i64,
    author_id: Option<i64>,
    author_name: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ChatMessageRow> for DeptChatMessage {
    fn from(row: ChatMessageRow) -> Self {
        DeptChatMessage {
            id: row.id,
            department_id: row.department_id,
            author_id: row.author_id,
            author_name: row.author_name,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL chat message repository.
#[derive(Clone)]
pub struct PgChatMessageRepository {
    pool: PgPool,
}

impl PgChatMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatMessageRepository for PgChatMessageRepository {
    async fn create(&self, message: &NewChatMessage) -> Result<DeptChatMessage, AppError> {
        let row = sqlx::query_as::<_, ChatMessageRow>(
            r#"
            INSERT INTO dept_chat_messages (id, department_id, author_id, author_name, content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, department_id, author_id, author_name, content, created_at, updated_at
            "#,
        )
        .bind(message.id)
        .bind(message.department_id)
        .bind(message.author_id)
        .bind(&message.author_name)
        .bind(&message.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Message already exists", "Department not found"))?;

        Ok(row.into())
    }

    async fn history(
        &self,
        department_id: i64,
        query: ChatHistoryQuery,
    ) -> Result<Vec<DeptChatMessage>, AppError> {
        // Newest page first, then flipped so clients can append in order.
        let rows = sqlx::query_as::<_, ChatMessageRow>(
            r#"
            SELECT id, department_id, author_id, author_name, content, created_at, updated_at
            FROM (
                SELECT id, department_id, author_id, author_name, content, created_at, updated_at
                FROM dept_chat_messages
                WHERE department_id = $1
                  AND ($2::BIGINT IS NULL OR id < $2)
                ORDER BY id DESC
                LIMIT $3
            ) page
            ORDER BY id ASC
            "#,
        )
        .bind(department_id)
        .bind(query.before)
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DeptChatMessage::from).collect())
    }
}
