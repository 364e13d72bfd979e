//! # Tutor Platform Library
//!
//! Backend of a tutoring platform:
//! - REST API for accounts, departments, CTA analytics and practice tests
//! - Nucleus super-admin login with an audit trail
//! - WebSocket relay for department chat rooms
//! - PostgreSQL for persistent storage, Redis for rate limiting
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core business entities and repository traits
//! - **Application Layer**: Business logic services and DTOs
//! - **Infrastructure Layer**: Database, cache, and external service implementations
//! - **Presentation Layer**: HTTP handlers, middleware and the chat relay
//!
//! ## Module Structure
//!
//! ```text
//! tutor_platform/
//! +-- config/        Configuration management
//! +-- domain/        Domain entities, value objects, and traits
//! +-- application/   Application services and DTOs
//! +-- infrastructure/ Database, Redis, repositories and metrics
//! +-- presentation/  HTTP routes, middleware and WebSocket relay
//! +-- shared/        Common utilities (errors, passwords, snowflake IDs)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP and WebSocket handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
