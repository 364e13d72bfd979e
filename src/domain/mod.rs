//! # Domain Layer
//!
//! Core records of the tutoring platform and the repository contracts the
//! infrastructure layer implements.
//!
//! ## Structure
//!
//! - **entities**: Users, sessions, departments, CTA counters, department
//!   chat messages and nucleus (super-admin) records
//! - **value_objects**: Roles and slugs
//!
//! The domain layer has no dependency on infrastructure or presentation code.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
