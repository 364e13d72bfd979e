//! Department Repository Implementation
//!
//! PostgreSQL implementation of the DepartmentRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Department, DepartmentChanges, DepartmentRepository, NewDepartment};
use crate::shared::error::AppError;

const DUPLICATE_DEPARTMENT: &str = "A department with this name or slug already exists";

#[derive(Debug, sqlx::FromRow)]
struct DepartmentRow {
    id: i64,
    name: String,
    slug: String,
    description: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DepartmentRow> for Department {
    fn from(row: DepartmentRow) -> Self {
        Department {
            id: row.id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL department repository implementation.
#[derive(Clone)]
pub struct PgDepartmentRepository {
    pool: PgPool,
}

impl PgDepartmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DepartmentRepository for PgDepartmentRepository {
    async fn list(&self, include_inactive: bool) -> Result<Vec<Department>, AppError> {
        let rows = sqlx::query_as::<_, DepartmentRow>(
            r#"
            SELECT id, name, slug, description, is_active, created_at, updated_at
            FROM departments
            WHERE is_active OR $1
            ORDER BY name ASC
            "#,
        )
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Department::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Department>, AppError> {
        let row = sqlx::query_as::<_, DepartmentRow>(
            r#"
            SELECT id, name, slug, description, is_active, created_at, updated_at
            FROM departments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Department::from))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Department>, AppError> {
        let row = sqlx::query_as::<_, DepartmentRow>(
            r#"
            SELECT id, name, slug, description, is_active, created_at, updated_at
            FROM departments
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Department::from))
    }

    async fn create(&self, department: &NewDepartment) -> Result<Department, AppError> {
        let row = sqlx::query_as::<_, DepartmentRow>(
            r#"
            INSERT INTO departments (id, name, slug, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, slug, description, is_active, created_at, updated_at
            "#,
        )
        .bind(department.id)
        .bind(&department.name)
        .bind(&department.slug)
        .bind(&department.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, DUPLICATE_DEPARTMENT, "Department not found"))?;

        Ok(row.into())
    }

    async fn update(
        &self,
        id: i64,
        changes: &DepartmentChanges,
    ) -> Result<Option<Department>, AppError> {
        let row = sqlx::query_as::<_, DepartmentRow>(
            r#"
            UPDATE departments
            SET name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                description = CASE WHEN $4 THEN $5 ELSE description END,
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, slug, description, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.slug)
        .bind(changes.description.is_some())
        .bind(changes.description.clone().flatten())
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, DUPLICATE_DEPARTMENT, "Department not found"))?;

        Ok(row.map(Department::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM departments WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}
