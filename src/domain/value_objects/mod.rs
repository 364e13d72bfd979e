//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **UserRole**: Authorization tier carried in access tokens
//! - **Slug**: URL-safe department identifier

mod role;
mod slug;

pub use role::*;
pub use slug::*;
