//! CTA Tracking Repository Implementation
//!
//! Counters are bumped with `INSERT ... ON CONFLICT DO UPDATE` so that the
//! first click creates the row and concurrent clicks are all counted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{CtaTracking, CtaTrackingRepository, Platform, PlatformCtaTracking};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct CtaRow {
    id: i64,
    department_id: i64,
    cta_key: String,
    click_count: i64,
    last_clicked_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<CtaRow> for CtaTracking {
    fn from(row: CtaRow) -> Self {
        CtaTracking {
            id: row.id,
            department_id: row.department_id,
            cta_key: row.cta_key,
            click_count: row.click_count,
            last_clicked_at: row.last_clicked_at,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PlatformCtaRow {
    id: i64,
    cta_key: String,
    platform: String,
    click_count: i64,
    last_clicked_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<PlatformCtaRow> for PlatformCtaTracking {
    fn from(row: PlatformCtaRow) -> Self {
        PlatformCtaTracking {
            id: row.id,
            cta_key: row.cta_key,
            platform: Platform::parse(&row.platform).unwrap_or_default(),
            click_count: row.click_count,
            last_clicked_at: row.last_clicked_at,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL CTA counter repository.
#[derive(Clone)]
pub struct PgCtaTrackingRepository {
    pool: PgPool,
}

impl PgCtaTrackingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CtaTrackingRepository for PgCtaTrackingRepository {
    async fn record_department_click(
        &self,
        new_id: i64,
        department_id: i64,
        cta_key: &str,
    ) -> Result<CtaTracking, AppError> {
        let row = sqlx::query_as::<_, CtaRow>(
            r#"
            INSERT INTO cta_tracking (id, department_id, cta_key, click_count, last_clicked_at)
            VALUES ($1, $2, $3, 1, NOW())
            ON CONFLICT (department_id, cta_key) DO UPDATE
            SET click_count = cta_tracking.click_count + 1,
                last_clicked_at = NOW()
            RETURNING id, department_id, cta_key, click_count, last_clicked_at, created_at
            "#,
        )
        .bind(new_id)
        .bind(department_id)
        .bind(cta_key)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Counter already exists", "Department not found"))?;

        Ok(row.into())
    }

    async fn list_for_department(&self, department_id: i64) -> Result<Vec<CtaTracking>, AppError> {
        let rows = sqlx::query_as::<_, CtaRow>(
            r#"
            SELECT id, department_id, cta_key, click_count, last_clicked_at, created_at
            FROM cta_tracking
            WHERE department_id = $1
            ORDER BY click_count DESC, cta_key ASC
            "#,
        )
        .bind(department_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CtaTracking::from).collect())
    }

    async fn record_platform_click(
        &self,
        new_id: i64,
        cta_key: &str,
        platform: Platform,
    ) -> Result<PlatformCtaTracking, AppError> {
        let row = sqlx::query_as::<_, PlatformCtaRow>(
            r#"
            INSERT INTO platform_cta_tracking (id, cta_key, platform, click_count, last_clicked_at)
            VALUES ($1, $2, $3, 1, NOW())
            ON CONFLICT (cta_key, platform) DO UPDATE
            SET click_count = platform_cta_tracking.click_count + 1,
                last_clicked_at = NOW()
            RETURNING id, cta_key, platform, click_count, last_clicked_at, created_at
            "#,
        )
        .bind(new_id)
        .bind(cta_key)
        .bind(platform.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_platform(&self) -> Result<Vec<PlatformCtaTracking>, AppError> {
        let rows = sqlx::query_as::<_, PlatformCtaRow>(
            r#"
            SELECT id, cta_key, platform, click_count, last_clicked_at, created_at
            FROM platform_cta_tracking
            ORDER BY click_count DESC, cta_key ASC, platform ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PlatformCtaTracking::from).collect())
    }
}
