//! Presentation Layer
//!
//! HTTP routes, middleware and the department chat relay.

pub mod http;
pub mod middleware;
pub mod websocket;
