//! WebSocket Message Types
//!
//! Department chat frames. Every frame is `{"event": "<name>", "data": {...}}`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::application::dto::response::ChatMessageResponse;

/// Frames sent by clients
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    #[serde(rename = "chat:join")]
    Join(JoinPayload),
    #[serde(rename = "chat:leave")]
    Leave(LeavePayload),
    #[serde(rename = "chat:message")]
    Message(MessagePayload),
}

/// Frames sent by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    #[serde(rename = "chat:presence")]
    Presence(PresencePayload),
    #[serde(rename = "chat:message")]
    Message(ChatMessageResponse),
}

impl ServerEvent {
    pub fn event_name(&self) -> &'static str {
        match self {
            ServerEvent::Presence(_) => "chat:presence",
            ServerEvent::Message(_) => "chat:message",
        }
    }
}

/// `chat:join` payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JoinPayload {
    #[serde(deserialize_with = "deserialize_id")]
    pub department_id: i64,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub user_id: Option<i64>,
    pub user_name: String,
}

/// `chat:leave` payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LeavePayload {
    #[serde(deserialize_with = "deserialize_id")]
    pub department_id: i64,
}

/// `chat:message` payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessagePayload {
    #[serde(deserialize_with = "deserialize_id")]
    pub department_id: i64,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub user_id: Option<i64>,
    pub user_name: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Joined,
    Left,
}

/// `chat:presence` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresencePayload {
    pub department_id: String,
    pub user_id: Option<String>,
    pub user_name: String,
    pub status: PresenceStatus,
    /// Distinct connections in the room after the change
    pub online: usize,
}

/// Snowflake IDs arrive as strings from JavaScript clients and as numbers
/// from everything else.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Str(String),
}

impl RawId {
    fn into_id<E: serde::de::Error>(self) -> Result<i64, E> {
        match self {
            RawId::Int(id) => Ok(id),
            RawId::Str(s) => s.parse().map_err(E::custom),
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer)?.into_id()
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer)?
        .map(RawId::into_id)
        .transpose()
}
