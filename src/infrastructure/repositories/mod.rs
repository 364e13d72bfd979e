//! Repository Implementations
//!
//! PostgreSQL implementations of the domain repository traits, plus the
//! [`Repositories`] bundle handed to request handlers through `AppState`.

pub mod user_repository;
pub mod session_repository;
pub mod department_repository;
pub mod cta_repository;
pub mod chat_message_repository;
pub mod nucleus_repository;

use std::sync::Arc;

use sqlx::PgPool;

use crate::domain::{
    ChatMessageRepository, CtaTrackingRepository, DepartmentRepository, NucleusRepository,
    SessionRepository, UserRepository,
};

pub use user_repository::PgUserRepository;
pub use session_repository::PgSessionRepository;
pub use department_repository::PgDepartmentRepository;
pub use cta_repository::PgCtaTrackingRepository;
pub use chat_message_repository::PgChatMessageRepository;
pub use nucleus_repository::PgNucleusRepository;

/// Every repository the application uses, behind trait objects so tests can
/// swap in fakes.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub departments: Arc<dyn DepartmentRepository>,
    pub cta: Arc<dyn CtaTrackingRepository>,
    pub chat_messages: Arc<dyn ChatMessageRepository>,
    pub nucleus: Arc<dyn NucleusRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            sessions: Arc::new(PgSessionRepository::new(pool.clone())),
            departments: Arc::new(PgDepartmentRepository::new(pool.clone())),
            cta: Arc::new(PgCtaTrackingRepository::new(pool.clone())),
            chat_messages: Arc::new(PgChatMessageRepository::new(pool.clone())),
            nucleus: Arc::new(PgNucleusRepository::new(pool)),
        }
    }
}
