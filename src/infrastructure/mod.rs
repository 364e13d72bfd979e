//! Infrastructure Layer
//!
//! Implementations for external services:
//! - Database pool, migrations, seeders and repositories (PostgreSQL)
//! - Redis connection for rate limiting
//! - Prometheus metrics

pub mod database;
pub mod cache;
pub mod metrics;
pub mod repositories;
