//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Registration, login, JWT tokens, refresh sessions
//! - **DepartmentService**: Department catalogue
//! - **CtaService**: Call-to-action click counters
//! - **ChatService**: Department chat persistence and history
//! - **NucleusService**: Super-admin login and audit trail
//! - **TestGenerator**: Practice test generation

pub mod auth_service;
pub mod department_service;
pub mod cta_service;
pub mod chat_service;
pub mod nucleus_service;
pub mod test_generation_service;

pub use auth_service::{AuthError, AuthService, AuthServiceImpl, AuthTokens, Claims, RegisterUserDto};
pub use department_service::{
    CreateDepartmentDto, DepartmentError, DepartmentService, DepartmentServiceImpl,
    UpdateDepartmentDto,
};
pub use cta_service::{CtaError, CtaService, CtaServiceImpl};
pub use chat_service::{ChatError, ChatService, ChatServiceImpl, PostMessageDto};
pub use nucleus_service::{
    NucleusError, NucleusLoginDto, NucleusService, NucleusServiceImpl, NucleusSession,
};
pub use test_generation_service::{
    Difficulty, GeneratedTest, Question, StubTestGenerator, TestGenerator, TestSpec,
};
