//! Call-to-action click counters.
//!
//! Two tables share the same shape: `cta_tracking` counts clicks per
//! department, `platform_cta_tracking` counts platform-wide clicks per client
//! platform.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

pub const CTA_KEY_MAX_LEN: usize = 64;

/// Identifier of a tracked UI element, e.g. `book-trial` or `hero_signup`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CtaKey(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CtaKeyError {
    #[error("CTA key must be 1-{CTA_KEY_MAX_LEN} characters")]
    Length,
    #[error("CTA key may only contain lowercase letters, digits, '-' and '_'")]
    Charset,
}

impl CtaKey {
    pub fn parse(raw: &str) -> Result<Self, CtaKeyError> {
        if raw.is_empty() || raw.len() > CTA_KEY_MAX_LEN {
            return Err(CtaKeyError::Length);
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            return Err(CtaKeyError::Charset);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CtaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Client platform a platform-wide click came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Web,
    Ios,
    Android,
}

impl Platform {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "web" => Some(Self::Web),
            "ios" => Some(Self::Ios),
            "android" => Some(Self::Android),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Ios => "ios",
            Self::Android => "android",
        }
    }
}

/// Click counter for a CTA inside one department.
///
/// Maps to the `cta_tracking` table, unique on (department_id, cta_key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CtaTracking {
    pub id: i64,
    pub department_id: i64,
    pub cta_key: String,
    pub click_count: i64,
    pub last_clicked_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Platform-wide click counter.
///
/// Maps to the `platform_cta_tracking` table, unique on (cta_key, platform).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformCtaTracking {
    pub id: i64,
    pub cta_key: String,
    pub platform: Platform,
    pub click_count: i64,
    pub last_clicked_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Repository trait for CTA counters.
///
/// Increments are single upsert statements so concurrent clicks never lose
/// counts. `new_id` is only used when the counter row does not exist yet.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CtaTrackingRepository: Send + Sync {
    /// Increment a department counter. An unknown department yields
    /// `AppError::NotFound`.
    async fn record_department_click(
        &self,
        new_id: i64,
        department_id: i64,
        cta_key: &str,
    ) -> Result<CtaTracking, AppError>;

    /// Counters of one department, highest click count first.
    async fn list_for_department(&self, department_id: i64) -> Result<Vec<CtaTracking>, AppError>;

    async fn record_platform_click(
        &self,
        new_id: i64,
        cta_key: &str,
        platform: Platform,
    ) -> Result<PlatformCtaTracking, AppError>;

    /// All platform counters, highest click count first.
    async fn list_platform(&self) -> Result<Vec<PlatformCtaTracking>, AppError>;
}
