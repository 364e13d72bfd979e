//! Department Service
//!
//! Department catalogue management. Reads are public; writes are limited to
//! staff by the HTTP layer.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    Department, DepartmentChanges, DepartmentRepository, NewDepartment, Slug, SlugError,
};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

const NAME_MIN_LEN: usize = 2;
const NAME_MAX_LEN: usize = 100;

/// Department service trait
#[async_trait]
pub trait DepartmentService: Send + Sync {
    /// List departments ordered by name
    async fn list(&self, include_inactive: bool) -> Result<Vec<Department>, DepartmentError>;

    /// Look up by numeric ID, or by slug for anything else
    async fn get(&self, id_or_slug: &str) -> Result<Department, DepartmentError>;

    /// Create a department, deriving the slug from the name when omitted
    async fn create(&self, request: CreateDepartmentDto) -> Result<Department, DepartmentError>;

    /// Partially update a department
    async fn update(
        &self,
        id: i64,
        update: UpdateDepartmentDto,
    ) -> Result<Department, DepartmentError>;

    /// Delete a department with its counters and chat history
    async fn delete(&self, id: i64) -> Result<(), DepartmentError>;
}

/// Create department input
#[derive(Debug, Clone)]
pub struct CreateDepartmentDto {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
}

/// Update department input
#[derive(Debug, Clone, Default)]
pub struct UpdateDepartmentDto {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
}

/// Department service errors
#[derive(Debug, thiserror::Error)]
pub enum DepartmentError {
    #[error("Department not found")]
    NotFound,

    #[error("Department with this name or slug already exists")]
    Duplicate,

    #[error("Name must be {NAME_MIN_LEN}-{NAME_MAX_LEN} characters")]
    InvalidName,

    #[error("Invalid slug: {0}")]
    InvalidSlug(#[from] SlugError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AppError> for DepartmentError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Conflict(_) => DepartmentError::Duplicate,
            AppError::NotFound(_) => DepartmentError::NotFound,
            e => DepartmentError::Internal(e.to_string()),
        }
    }
}

impl From<DepartmentError> for AppError {
    fn from(e: DepartmentError) -> Self {
        match e {
            DepartmentError::NotFound => AppError::NotFound(e.to_string()),
            DepartmentError::Duplicate => AppError::Conflict(e.to_string()),
            DepartmentError::InvalidName | DepartmentError::InvalidSlug(_) => {
                AppError::BadRequest(e.to_string())
            }
            DepartmentError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// DepartmentService implementation
pub struct DepartmentServiceImpl {
    department_repo: Arc<dyn DepartmentRepository>,
    id_generator: Arc<SnowflakeGenerator>,
}

/// Trim a department name and check the trimmed length.
fn normalize_name(raw: &str) -> Result<String, DepartmentError> {
    let name = raw.trim();
    if (NAME_MIN_LEN..=NAME_MAX_LEN).contains(&name.chars().count()) {
        Ok(name.to_string())
    } else {
        Err(DepartmentError::InvalidName)
    }
}

impl DepartmentServiceImpl {
    pub fn new(
        department_repo: Arc<dyn DepartmentRepository>,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            department_repo,
            id_generator,
        }
    }
}

#[async_trait]
impl DepartmentService for DepartmentServiceImpl {
    async fn list(&self, include_inactive: bool) -> Result<Vec<Department>, DepartmentError> {
        Ok(self.department_repo.list(include_inactive).await?)
    }

    async fn get(&self, id_or_slug: &str) -> Result<Department, DepartmentError> {
        let found = match id_or_slug.parse::<i64>() {
            Ok(id) => self.department_repo.find_by_id(id).await?,
            Err(_) => self.department_repo.find_by_slug(id_or_slug).await?,
        };
        found.ok_or(DepartmentError::NotFound)
    }

    async fn create(&self, request: CreateDepartmentDto) -> Result<Department, DepartmentError> {
        let name = normalize_name(&request.name)?;
        let slug = match request.slug.as_deref() {
            Some(explicit) => Slug::parse(explicit)?,
            None => Slug::from_name(&name)?,
        };

        let department = self
            .department_repo
            .create(&NewDepartment {
                id: self.id_generator.generate(),
                name,
                slug: slug.into(),
                description: request.description,
            })
            .await?;

        tracing::info!(department_id = department.id, slug = %department.slug, "Department created");
        Ok(department)
    }

    async fn update(
        &self,
        id: i64,
        update: UpdateDepartmentDto,
    ) -> Result<Department, DepartmentError> {
        let slug = update
            .slug
            .as_deref()
            .map(Slug::parse)
            .transpose()?
            .map(String::from);

        let name = update.name.as_deref().map(normalize_name).transpose()?;

        let changes = DepartmentChanges {
            name,
            slug,
            description: update.description,
            is_active: update.is_active,
        };

        if changes.is_empty() {
            return self
                .department_repo
                .find_by_id(id)
                .await?
                .ok_or(DepartmentError::NotFound);
        }

        self.department_repo
            .update(id, &changes)
            .await?
            .ok_or(DepartmentError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<(), DepartmentError> {
        if !self.department_repo.delete(id).await? {
            return Err(DepartmentError::NotFound);
        }
        tracing::info!(department_id = id, "Department deleted");
        Ok(())
    }
}
