//! Department Chat Service
//!
//! Persistence side of the department chat relay and REST history paging.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ChatSettings;
use crate::domain::{
    ChatHistoryQuery, ChatMessageRepository, DepartmentRepository, DeptChatMessage,
    NewChatMessage,
};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// `dept_chat_messages.author_name` is VARCHAR(64)
pub const AUTHOR_NAME_MAX_LEN: usize = 64;

/// Chat service trait
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Validate and persist a message posted to a department room
    async fn post_message(&self, message: PostMessageDto) -> Result<DeptChatMessage, ChatError>;

    /// One page of department history, oldest first
    async fn history(
        &self,
        department_id: i64,
        before: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<DeptChatMessage>, ChatError>;
}

/// Message posted over the relay
#[derive(Debug, Clone)]
pub struct PostMessageDto {
    pub department_id: i64,
    pub author_id: Option<i64>,
    pub author_name: String,
    pub content: String,
}

/// Chat service errors
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Department not found")]
    DepartmentNotFound,

    #[error("Message content must be 1-{0} characters")]
    InvalidContent(usize),

    #[error("Author name must be 1-{AUTHOR_NAME_MAX_LEN} characters")]
    InvalidAuthor,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AppError> for ChatError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::NotFound(_) => ChatError::DepartmentNotFound,
            e => ChatError::Internal(e.to_string()),
        }
    }
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::DepartmentNotFound => AppError::NotFound(e.to_string()),
            ChatError::InvalidContent(_) | ChatError::InvalidAuthor => {
                AppError::BadRequest(e.to_string())
            }
            ChatError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// ChatService implementation
pub struct ChatServiceImpl {
    message_repo: Arc<dyn ChatMessageRepository>,
    department_repo: Arc<dyn DepartmentRepository>,
    id_generator: Arc<SnowflakeGenerator>,
    settings: ChatSettings,
}

impl ChatServiceImpl {
    pub fn new(
        message_repo: Arc<dyn ChatMessageRepository>,
        department_repo: Arc<dyn DepartmentRepository>,
        id_generator: Arc<SnowflakeGenerator>,
        settings: ChatSettings,
    ) -> Self {
        Self {
            message_repo,
            department_repo,
            id_generator,
            settings,
        }
    }
}

#[async_trait]
impl ChatService for ChatServiceImpl {
    async fn post_message(&self, message: PostMessageDto) -> Result<DeptChatMessage, ChatError> {
        let content = message.content.trim();
        if content.is_empty() || content.chars().count() > self.settings.max_message_length {
            return Err(ChatError::InvalidContent(self.settings.max_message_length));
        }
        let author_name = message.author_name.trim();
        if author_name.is_empty() || author_name.chars().count() > AUTHOR_NAME_MAX_LEN {
            return Err(ChatError::InvalidAuthor);
        }

        let stored = self
            .message_repo
            .create(&NewChatMessage {
                id: self.id_generator.generate(),
                department_id: message.department_id,
                author_id: message.author_id,
                author_name: author_name.to_string(),
                content: content.to_string(),
            })
            .await?;

        Ok(stored)
    }

    async fn history(
        &self,
        department_id: i64,
        before: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<DeptChatMessage>, ChatError> {
        if !self.department_repo.exists(department_id).await? {
            return Err(ChatError::DepartmentNotFound);
        }

        let query = ChatHistoryQuery {
            before,
            limit: self.settings.clamp_limit(limit),
        };
        Ok(self.message_repo.history(department_id, query).await?)
    }
}
