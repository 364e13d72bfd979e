//! WebSocket Connection Handler
//!
//! Drives one department chat connection: forwards hub frames to the socket
//! and applies `chat:*` events read from it.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use super::hub::{Departure, RoomMember};
use super::messages::{
    ClientEvent, JoinPayload, LeavePayload, MessagePayload, PresencePayload, PresenceStatus,
    ServerEvent,
};
use crate::application::dto::response::ChatMessageResponse;
use crate::application::services::{ChatService, PostMessageDto};
use crate::infrastructure::metrics;
use crate::startup::AppState;

/// WebSocket upgrade handler for `/ws/chat`
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: AppState) {
    let connection_id = Uuid::new_v4();
    tracing::debug!(connection_id = %connection_id, "New chat connection");

    // Split socket for concurrent read/write
    let (mut sender, mut receiver) = socket.split();

    // Create channel for outgoing frames
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();
    state.chat_hub.register(connection_id, tx);
    metrics::chat_connection_opened();

    // Spawn task to forward frames from channel to WebSocket
    let sender_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(t) => t,
                Err(e) => {
                    tracing::error!(event = event.event_name(), "Failed to serialize frame: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => handle_frame(&state, connection_id, text.as_str()).await,
            Ok(Message::Close(_)) => {
                tracing::debug!(connection_id = %connection_id, "Connection closed");
                break;
            }
            Ok(_) => {
                // Ping/pong is handled by axum; binary frames are not part of the protocol
            }
            Err(e) => {
                tracing::debug!(connection_id = %connection_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    disconnect(&state, connection_id);
    metrics::chat_connection_closed();
    sender_task.abort();

    tracing::debug!(connection_id = %connection_id, "Chat connection finished");
}

/// Drop the connection from the hub, telling each joined room it left.
fn disconnect(state: &AppState, connection_id: Uuid) {
    for departure in state.chat_hub.unregister(connection_id) {
        announce_departure(state, departure);
    }
}

/// Parse and apply one client frame. Malformed frames are logged and ignored.
async fn handle_frame(state: &AppState, connection_id: Uuid, text: &str) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!(connection_id = %connection_id, error = %e, "Ignoring malformed frame");
            return;
        }
    };

    match event {
        ClientEvent::Join(payload) => handle_join(state, connection_id, payload),
        ClientEvent::Leave(payload) => handle_leave(state, connection_id, payload),
        ClientEvent::Message(payload) => handle_message(state, connection_id, payload).await,
    }
}

fn handle_join(state: &AppState, connection_id: Uuid, payload: JoinPayload) {
    let member = RoomMember {
        user_id: payload.user_id,
        user_name: payload.user_name,
    };
    let Some(online) = state
        .chat_hub
        .join(connection_id, payload.department_id, member.clone())
    else {
        return;
    };

    tracing::info!(
        connection_id = %connection_id,
        room = payload.department_id,
        user_id = ?member.user_id,
        online,
        "Joined department chat"
    );

    let presence = presence_event(payload.department_id, &member, PresenceStatus::Joined, online);
    state.chat_hub.broadcast(payload.department_id, &presence);
}

fn handle_leave(state: &AppState, connection_id: Uuid, payload: LeavePayload) {
    match state.chat_hub.leave(connection_id, payload.department_id) {
        Some(departure) => {
            tracing::info!(
                connection_id = %connection_id,
                room = payload.department_id,
                online = departure.online,
                "Left department chat"
            );
            announce_departure(state, departure);
        }
        None => {
            tracing::debug!(
                connection_id = %connection_id,
                room = payload.department_id,
                "Leave for a room not joined"
            );
        }
    }
}

async fn handle_message(state: &AppState, connection_id: Uuid, payload: MessagePayload) {
    let department_id = payload.department_id;
    let result = state
        .chat_service()
        .post_message(PostMessageDto {
            department_id,
            author_id: payload.user_id,
            author_name: payload.user_name,
            content: payload.content,
        })
        .await;

    match result {
        Ok(stored) => {
            metrics::record_chat_message("persisted");
            let event = ServerEvent::Message(ChatMessageResponse::from(stored));
            let delivered = state.chat_hub.broadcast(department_id, &event);
            tracing::debug!(
                connection_id = %connection_id,
                room = department_id,
                delivered,
                "Chat message relayed"
            );
        }
        Err(e) => {
            metrics::record_chat_message("failed");
            tracing::warn!(
                connection_id = %connection_id,
                room = department_id,
                error = %e,
                "Dropping chat message"
            );
        }
    }
}

fn announce_departure(state: &AppState, departure: Departure) {
    let presence = presence_event(
        departure.department_id,
        &departure.member,
        PresenceStatus::Left,
        departure.online,
    );
    state.chat_hub.broadcast(departure.department_id, &presence);
}

fn presence_event(
    department_id: i64,
    member: &RoomMember,
    status: PresenceStatus,
    online: usize,
) -> ServerEvent {
    ServerEvent::Presence(PresencePayload {
        department_id: department_id.to_string(),
        user_id: member.user_id.map(|id| id.to_string()),
        user_name: member.user_name.clone(),
        status,
        online,
    })
}
