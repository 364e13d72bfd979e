//! HTTP Presentation
//!
//! REST handlers, routing and request extractors.

pub mod extractors;
pub mod handlers;
pub mod routes;
