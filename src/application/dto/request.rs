//! Request DTOs
//!
//! Data structures for API request bodies and query strings. Required string
//! fields default to empty so a missing field fails validation with a 400
//! instead of a body rejection.

use serde::{Deserialize, Deserializer};
use validator::Validate;

/// Login request (users and nucleus)
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(max = 64, message = "Display name must be at most 64 characters"))]
    pub display_name: Option<String>,

    /// `student` (default) or `tutor`
    pub role: Option<String>,
}

/// Refresh token request
#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Create department request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDepartmentRequest {
    #[serde(default)]
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: String,

    pub slug: Option<String>,

    pub description: Option<String>,
}

/// Update department request. `"description": null` clears the description.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateDepartmentRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: Option<String>,

    pub slug: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,

    pub is_active: Option<bool>,
}

/// Department list query parameters
#[derive(Debug, Default, Deserialize)]
pub struct DepartmentListParams {
    #[serde(default)]
    pub include_inactive: bool,
}

/// Platform CTA query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PlatformCtaParams {
    pub platform: Option<String>,
}

/// Chat history query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ChatHistoryParams {
    pub before: Option<String>,
    pub limit: Option<i64>,
}

/// Audit log query parameters
#[derive(Debug, Default, Deserialize)]
pub struct AuditLogParams {
    pub limit: Option<i64>,
}

/// Practice test generation request
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateTestRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Subject must be 1-100 characters"))]
    pub subject: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Topic must be 1-200 characters"))]
    pub topic: String,

    /// `easy`, `medium` (default) or `hard`
    pub difficulty: Option<String>,

    #[validate(range(min = 1, max = 50, message = "Question count must be 1-50"))]
    pub question_count: Option<u32>,

    pub department_id: Option<String>,
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
