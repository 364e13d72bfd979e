//! Seed data.
//!
//! Every statement is `ON CONFLICT DO NOTHING`, so seeding an already seeded
//! database changes nothing.

use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::SeedSettings;
use crate::domain::Slug;
use crate::shared::error::AppError;
use crate::shared::password;
use crate::shared::snowflake::SnowflakeGenerator;

/// Departments created on a fresh install: (name, description).
pub const DEFAULT_DEPARTMENTS: &[(&str, &str)] = &[
    ("Mathematics", "Algebra, geometry, calculus and statistics"),
    ("Physics", "Mechanics, electricity, waves and modern physics"),
    ("Chemistry", "General, organic and physical chemistry"),
    ("Biology", "Cells, genetics, ecology and human biology"),
    ("English", "Reading, writing, grammar and literature"),
    ("Computer Science", "Programming, algorithms and data structures"),
];

/// What a seed run inserted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub departments_inserted: u64,
    pub nucleus_admin_inserted: bool,
}

/// Insert default departments and the nucleus admin.
pub async fn seed_all(
    pool: &PgPool,
    ids: &SnowflakeGenerator,
    settings: &SeedSettings,
) -> Result<SeedSummary, AppError> {
    let departments_inserted = seed_departments(pool, ids).await?;
    let nucleus_admin_inserted = seed_nucleus_admin(pool, settings).await?;

    Ok(SeedSummary {
        departments_inserted,
        nucleus_admin_inserted,
    })
}

/// Insert the default departments inside one transaction.
pub async fn seed_departments(pool: &PgPool, ids: &SnowflakeGenerator) -> Result<u64, AppError> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    for (name, description) in DEFAULT_DEPARTMENTS {
        let slug = Slug::from_name(name)
            .map_err(|e| AppError::Internal(format!("Invalid seed department {}: {}", name, e)))?;

        let result = sqlx::query(
            r#"
            INSERT INTO departments (id, name, slug, description)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(ids.generate())
        .bind(*name)
        .bind(slug.as_str())
        .bind(*description)
        .execute(&mut *tx)
        .await?;

        inserted += result.rows_affected();
    }

    tx.commit().await?;
    info!(inserted, "Seeded departments");
    Ok(inserted)
}

/// Create the nucleus admin when a seed password is configured.
pub async fn seed_nucleus_admin(pool: &PgPool, settings: &SeedSettings) -> Result<bool, AppError> {
    let Some(password) = settings.nucleus_password.as_deref() else {
        warn!("NUCLEUS_SEED_PASSWORD not set, skipping nucleus admin");
        return Ok(false);
    };

    let password_hash = password::hash_password(password)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

    let result = sqlx::query(
        r#"
        INSERT INTO nucleus_users (email, password_hash, full_name)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO NOTHING
        "#,
    )
    .bind(&settings.nucleus_email)
    .bind(&password_hash)
    .bind(&settings.nucleus_name)
    .execute(pool)
    .await?;

    let inserted = result.rows_affected() > 0;
    info!(email = %settings.nucleus_email, inserted, "Seeded nucleus admin");
    Ok(inserted)
}
