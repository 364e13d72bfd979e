//! Schema verification.
//!
//! Compares the live database against the tables and columns the
//! repositories query, using `information_schema`.

use std::collections::HashSet;
use std::fmt;

use sqlx::PgPool;

use crate::shared::error::AppError;

/// Tables and the columns the application depends on.
pub const EXPECTED_SCHEMA: &[(&str, &[&str])] = &[
    (
        "users",
        &["id", "username", "email", "password_hash", "display_name", "role", "created_at", "updated_at"],
    ),
    (
        "user_sessions",
        &["id", "user_id", "refresh_token_hash", "expires_at", "created_at", "revoked_at"],
    ),
    (
        "departments",
        &["id", "name", "slug", "description", "is_active", "created_at", "updated_at"],
    ),
    (
        "cta_tracking",
        &["id", "department_id", "cta_key", "click_count", "last_clicked_at", "created_at"],
    ),
    (
        "platform_cta_tracking",
        &["id", "cta_key", "platform", "click_count", "last_clicked_at", "created_at"],
    ),
    (
        "dept_chat_messages",
        &["id", "department_id", "author_id", "author_name", "content", "created_at", "updated_at"],
    ),
    (
        "nucleus_users",
        &["id", "email", "password_hash", "full_name", "is_active", "last_login_at", "created_at"],
    ),
    (
        "nucleus_audit_logs",
        &["id", "nucleus_user_id", "action", "ip_address", "user_agent", "details", "created_at"],
    ),
];

/// Result of checking one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCheck {
    pub table: String,
    pub exists: bool,
    pub missing_columns: Vec<String>,
}

impl TableCheck {
    pub fn is_ok(&self) -> bool {
        self.exists && self.missing_columns.is_empty()
    }
}

/// Result of a full schema verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaReport {
    pub tables: Vec<TableCheck>,
}

impl SchemaReport {
    pub fn is_ok(&self) -> bool {
        self.tables.iter().all(TableCheck::is_ok)
    }

    /// Build a report from the columns present per table.
    pub fn from_columns(present: &[(String, String)]) -> Self {
        let present: HashSet<(&str, &str)> = present
            .iter()
            .map(|(t, c)| (t.as_str(), c.as_str()))
            .collect();

        let tables = EXPECTED_SCHEMA
            .iter()
            .map(|(table, columns)| {
                let exists = present.iter().any(|(t, _)| t == table);
                let missing_columns = if exists {
                    columns
                        .iter()
                        .filter(|c| !present.contains(&(*table, **c)))
                        .map(|c| c.to_string())
                        .collect()
                } else {
                    Vec::new()
                };
                TableCheck {
                    table: table.to_string(),
                    exists,
                    missing_columns,
                }
            })
            .collect();

        Self { tables }
    }
}

impl fmt::Display for SchemaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for check in &self.tables {
            if !check.exists {
                writeln!(f, "MISSING  {}", check.table)?;
            } else if !check.missing_columns.is_empty() {
                writeln!(
                    f,
                    "INVALID  {} (missing columns: {})",
                    check.table,
                    check.missing_columns.join(", ")
                )?;
            } else {
                writeln!(f, "OK       {}", check.table)?;
            }
        }
        Ok(())
    }
}

/// Query `information_schema` for the expected tables in the current schema.
pub async fn verify_schema(pool: &PgPool) -> Result<SchemaReport, AppError> {
    let tables: Vec<String> = EXPECTED_SCHEMA.iter().map(|(t, _)| t.to_string()).collect();

    let present = sqlx::query_as::<_, (String, String)>(
        r#"
        SELECT table_name::TEXT, column_name::TEXT
        FROM information_schema.columns
        WHERE table_schema = current_schema()
          AND table_name::TEXT = ANY($1)
        "#,
    )
    .bind(&tables)
    .fetch_all(pool)
    .await?;

    Ok(SchemaReport::from_columns(&present))
}
