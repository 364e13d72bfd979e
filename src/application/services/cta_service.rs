//! CTA Tracking Service
//!
//! Click counters for call-to-action elements, per department and per
//! client platform.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    CtaKey, CtaKeyError, CtaTracking, CtaTrackingRepository, DepartmentRepository, Platform,
    PlatformCtaTracking,
};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// CTA service trait
#[async_trait]
pub trait CtaService: Send + Sync {
    /// Count one click on a department CTA
    async fn record_department_click(
        &self,
        department_id: i64,
        cta_key: &str,
    ) -> Result<CtaTracking, CtaError>;

    /// Counters of a department, highest first
    async fn department_counters(&self, department_id: i64) -> Result<Vec<CtaTracking>, CtaError>;

    /// Count one click on a platform-wide CTA
    async fn record_platform_click(
        &self,
        cta_key: &str,
        platform: Platform,
    ) -> Result<PlatformCtaTracking, CtaError>;

    /// All platform counters, highest first
    async fn platform_counters(&self) -> Result<Vec<PlatformCtaTracking>, CtaError>;
}

/// CTA service errors
#[derive(Debug, thiserror::Error)]
pub enum CtaError {
    #[error("Department not found")]
    DepartmentNotFound,

    #[error("Invalid CTA key: {0}")]
    InvalidKey(#[from] CtaKeyError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AppError> for CtaError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::NotFound(_) => CtaError::DepartmentNotFound,
            e => CtaError::Internal(e.to_string()),
        }
    }
}

impl From<CtaError> for AppError {
    fn from(e: CtaError) -> Self {
        match e {
            CtaError::DepartmentNotFound => AppError::NotFound(e.to_string()),
            CtaError::InvalidKey(_) => AppError::BadRequest(e.to_string()),
            CtaError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// CtaService implementation
pub struct CtaServiceImpl {
    cta_repo: Arc<dyn CtaTrackingRepository>,
    department_repo: Arc<dyn DepartmentRepository>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl CtaServiceImpl {
    pub fn new(
        cta_repo: Arc<dyn CtaTrackingRepository>,
        department_repo: Arc<dyn DepartmentRepository>,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            cta_repo,
            department_repo,
            id_generator,
        }
    }
}

#[async_trait]
impl CtaService for CtaServiceImpl {
    async fn record_department_click(
        &self,
        department_id: i64,
        cta_key: &str,
    ) -> Result<CtaTracking, CtaError> {
        let key = CtaKey::parse(cta_key)?;

        if !self.department_repo.exists(department_id).await? {
            return Err(CtaError::DepartmentNotFound);
        }

        let counter = self
            .cta_repo
            .record_department_click(self.id_generator.generate(), department_id, key.as_str())
            .await?;
        metrics::record_cta_click("department");
        tracing::debug!(department_id, cta_key = %key, clicks = counter.click_count, "CTA click recorded");
        Ok(counter)
    }

    async fn department_counters(&self, department_id: i64) -> Result<Vec<CtaTracking>, CtaError> {
        if !self.department_repo.exists(department_id).await? {
            return Err(CtaError::DepartmentNotFound);
        }
        Ok(self.cta_repo.list_for_department(department_id).await?)
    }

    async fn record_platform_click(
        &self,
        cta_key: &str,
        platform: Platform,
    ) -> Result<PlatformCtaTracking, CtaError> {
        let key = CtaKey::parse(cta_key)?;
        let counter = self
            .cta_repo
            .record_platform_click(self.id_generator.generate(), key.as_str(), platform)
            .await?;
        metrics::record_cta_click("platform");
        tracing::debug!(cta_key = %key, platform = platform.as_str(), clicks = counter.click_count, "Platform CTA click recorded");
        Ok(counter)
    }

    async fn platform_counters(&self) -> Result<Vec<PlatformCtaTracking>, CtaError> {
        Ok(self.cta_repo.list_platform().await?)
    }
}
