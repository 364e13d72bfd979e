//! Department Chat Relay
//!
//! Real-time department chat over WebSocket connections.

pub mod handler;
pub mod hub;
pub mod messages;

pub use handler::ws_handler;
pub use hub::{ChatHub, Departure, RoomMember};
pub use messages::{ClientEvent, PresencePayload, PresenceStatus, ServerEvent};
