//! Integration Tests Entry Point
//!
//! Tests are organized by module:
//! - `api/` - REST API endpoint tests against the full router
//! - `common/` - Test application and in-memory repositories

mod api;
mod common;

pub use common::*;
