//! Department chat message entity and repository trait.
//!
//! Maps to the `dept_chat_messages` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A message posted to a department chat room.
///
/// Maps to the `dept_chat_messages` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID, ordered by creation)
/// - department_id: BIGINT NOT NULL REFERENCES departments(id) ON DELETE CASCADE
/// - author_id: BIGINT NULL (claimed by the client, not verified)
/// - author_name: VARCHAR(64) NOT NULL
/// - content: TEXT NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeptChatMessage {
    pub id: i64,
    pub department_id: i64,
    pub author_id: Option<i64>,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewChatMessage {
    pub id: i64,
    pub department_id: i64,
    pub author_id: Option<i64>,
    pub author_name: String,
    pub content: String,
}

/// Page request: the newest `limit` messages with an id below `before`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatHistoryQuery {
    pub before: Option<i64>,
    pub limit: i64,
}

/// Repository trait for chat message persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatMessageRepository: Send + Sync {
    /// Persist a message. An unknown department yields `AppError::NotFound`.
    async fn create(&self, message: &NewChatMessage) -> Result<DeptChatMessage, AppError>;

    /// One page of history in chronological (oldest first) order.
    async fn history(
        &self,
        department_id: i64,
        query: ChatHistoryQuery,
    ) -> Result<Vec<DeptChatMessage>, AppError>;
}
