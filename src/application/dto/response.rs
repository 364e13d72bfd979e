//! Response DTOs
//!
//! Data structures for API response bodies. Snowflake IDs are rendered as
//! strings so JavaScript clients do not lose precision.

use serde::Serialize;

use crate::application::services::{AuthTokens, GeneratedTest, NucleusSession, Question};
use crate::domain::{
    CtaTracking, Department, DeptChatMessage, NucleusAuditLog, NucleusUser, PlatformCtaTracking,
    User,
};

/// Authentication tokens response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

impl From<AuthTokens> for TokenResponse {
    fn from(tokens: AuthTokens) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
            token_type: tokens.token_type,
        }
    }
}

/// Registration response (includes user and tokens)
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

impl RegisterResponse {
    pub fn new(user: User, tokens: AuthTokens) -> Self {
        Self {
            user: user.into(),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
            token_type: tokens.token_type,
        }
    }
}

/// User response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub role: String,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
            display_name: user.display_name,
            role: user.role.as_str().to_string(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Department response
#[derive(Debug, Serialize)]
pub struct DepartmentResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Department> for DepartmentResponse {
    fn from(d: Department) -> Self {
        Self {
            id: d.id.to_string(),
            name: d.name,
            slug: d.slug,
            description: d.description,
            is_active: d.is_active,
            created_at: d.created_at.to_rfc3339(),
            updated_at: d.updated_at.to_rfc3339(),
        }
    }
}

/// Department CTA counter response
#[derive(Debug, Serialize)]
pub struct CtaCounterResponse {
    pub id: String,
    pub department_id: String,
    pub cta_key: String,
    pub click_count: i64,
    pub last_clicked_at: String,
    pub created_at: String,
}

impl From<CtaTracking> for CtaCounterResponse {
    fn from(c: CtaTracking) -> Self {
        Self {
            id: c.id.to_string(),
            department_id: c.department_id.to_string(),
            cta_key: c.cta_key,
            click_count: c.click_count,
            last_clicked_at: c.last_clicked_at.to_rfc3339(),
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// Platform CTA counter response
#[derive(Debug, Serialize)]
pub struct PlatformCtaCounterResponse {
    pub id: String,
    pub cta_key: String,
    pub platform: String,
    pub click_count: i64,
    pub last_clicked_at: String,
    pub created_at: String,
}

impl From<PlatformCtaTracking> for PlatformCtaCounterResponse {
    fn from(c: PlatformCtaTracking) -> Self {
        Self {
            id: c.id.to_string(),
            cta_key: c.cta_key,
            platform: c.platform.as_str().to_string(),
            click_count: c.click_count,
            last_clicked_at: c.last_clicked_at.to_rfc3339(),
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// Department chat message, used by REST history and the relay broadcast
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
pub struct ChatMessageResponse {
    pub id: String,
    pub department_id: String,
    pub author_id: Option<String>,
    pub author_name: String,
    pub content: String,
    pub created_at: String,
}

impl From<DeptChatMessage> for ChatMessageResponse {
    fn from(m: DeptChatMessage) -> Self {
        Self {
            id: m.id.to_string(),
            department_id: m.department_id.to_string(),
            author_id: m.author_id.map(|id| id.to_string()),
            author_name: m.author_name,
            content: m.content,
            created_at: m.created_at.to_rfc3339(),
        }
    }
}

/// Nucleus account response
#[derive(Debug, Serialize)]
pub struct NucleusUserResponse {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub last_login_at: Option<String>,
}

impl From<NucleusUser> for NucleusUserResponse {
    fn from(u: NucleusUser) -> Self {
        Self {
            id: u.id.to_string(),
            email: u.email,
            full_name: u.full_name,
            last_login_at: u.last_login_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Nucleus login response
#[derive(Debug, Serialize)]
pub struct NucleusLoginResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: String,
    pub nucleus_user: NucleusUserResponse,
}

impl From<NucleusSession> for NucleusLoginResponse {
    fn from(session: NucleusSession) -> Self {
        Self {
            access_token: session.access_token,
            expires_in: session.expires_in,
            token_type: "Bearer".to_string(),
            nucleus_user: session.user.into(),
        }
    }
}

/// Nucleus audit log row
#[derive(Debug, Serialize)]
pub struct AuditLogResponse {
    pub id: String,
    pub nucleus_user_id: Option<String>,
    pub action: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub details: serde_json::Value,
    pub created_at: String,
}

impl From<NucleusAuditLog> for AuditLogResponse {
    fn from(log: NucleusAuditLog) -> Self {
        Self {
            id: log.id.to_string(),
            nucleus_user_id: log.nucleus_user_id.map(|id| id.to_string()),
            action: log.action,
            ip_address: log.ip_address,
            user_agent: log.user_agent,
            details: log.details,
            created_at: log.created_at.to_rfc3339(),
        }
    }
}

/// Generated practice test
#[derive(Debug, Serialize)]
pub struct GeneratedTestResponse {
    pub id: String,
    pub subject: String,
    pub topic: String,
    pub difficulty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    pub status: String,
    pub questions: Vec<Question>,
    pub generated_at: String,
}

impl From<GeneratedTest> for GeneratedTestResponse {
    fn from(t: GeneratedTest) -> Self {
        Self {
            id: t.id.to_string(),
            subject: t.subject,
            topic: t.topic,
            difficulty: t.difficulty.as_str().to_string(),
            department_id: t.department_id.map(|id| id.to_string()),
            status: t.status.to_string(),
            questions: t.questions,
            generated_at: t.generated_at.to_rfc3339(),
        }
    }
}
