//! Department entity and repository trait.
//!
//! Maps to the `departments` table. A department is a subject area
//! (Mathematics, Physics, ...) that owns a chat room and CTA counters.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Represents a department.
///
/// Maps to the `departments` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - name: VARCHAR(100) NOT NULL UNIQUE
/// - slug: VARCHAR(100) NOT NULL UNIQUE
/// - description: TEXT NULL
/// - is_active: BOOLEAN NOT NULL DEFAULT TRUE
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a department. Name and slug are already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDepartment {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

/// Partial update. `None` leaves a column untouched; for `description`,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepartmentChanges {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl DepartmentChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.slug.is_none()
            && self.description.is_none()
            && self.is_active.is_none()
    }
}

/// Repository trait for Department data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// All departments ordered by name; inactive ones only when asked.
    async fn list(&self, include_inactive: bool) -> Result<Vec<Department>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Department>, AppError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Department>, AppError>;

    /// Insert a department. Duplicate name or slug yields `AppError::Conflict`.
    async fn create(&self, department: &NewDepartment) -> Result<Department, AppError>;

    /// Apply a partial update. Returns `None` when the department does not exist.
    async fn update(
        &self,
        id: i64,
        changes: &DepartmentChanges,
    ) -> Result<Option<Department>, AppError>;

    /// Delete a department and, via cascade, its counters and messages.
    /// Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    async fn exists(&self, id: i64) -> Result<bool, AppError>;
}
