//! # Domain Entities
//!
//! Records mapped one-to-one onto database tables, each with the repository
//! trait that defines its data access. Implementations live in
//! `infrastructure::repositories`.

mod user;
mod session;
mod department;
mod cta_tracking;
mod chat_message;
mod nucleus;

pub use user::{User, UserRepository};
pub use session::{Session, SessionRepository};
pub use department::{Department, DepartmentChanges, DepartmentRepository, NewDepartment};
pub use cta_tracking::{
    CtaKey, CtaKeyError, CtaTracking, CtaTrackingRepository, Platform, PlatformCtaTracking,
};
pub use chat_message::{ChatHistoryQuery, ChatMessageRepository, DeptChatMessage, NewChatMessage};
pub use nucleus::{AuditAction, NewAuditLog, NucleusAuditLog, NucleusRepository, NucleusUser};

#[cfg(test)]
pub use user::MockUserRepository;
#[cfg(test)]
pub use session::MockSessionRepository;
#[cfg(test)]
pub use department::MockDepartmentRepository;
#[cfg(test)]
pub use cta_tracking::MockCtaTrackingRepository;
#[cfg(test)]
pub use chat_message::MockChatMessageRepository;
#[cfg(test)]
pub use nucleus::MockNucleusRepository;
