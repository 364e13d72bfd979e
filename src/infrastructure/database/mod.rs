//! Database Module
//!
//! PostgreSQL connection pool, migrations, seed data and schema checks.

pub mod schema;
pub mod seed;

use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseSettings;

pub use schema::{verify_schema, SchemaReport, TableCheck};
pub use seed::{seed_all, SeedSummary, DEFAULT_DEPARTMENTS};

/// Embedded migrations from `./migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Create a PostgreSQL connection pool
pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout))
        .connect(&settings.url)
        .await
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}
