//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod health;
pub mod auth;
pub mod user;
pub mod nucleus;
pub mod department;
pub mod cta;
pub mod chat;
pub mod test_generation;
