//! # Admin Repository
//!
//! The `admins` collection: one row per user id, `role = 1` grants
//! moderation rights. A missing row means "not an administrator".

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for administrator lookups.
#[derive(Debug, Clone)]
pub struct AdminRepository {
    pool: SqlitePool,
}

impl AdminRepository {
    /// Creates a new AdminRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AdminRepository { pool }
    }

    /// Returns true only if a row exists for the user and its role is set.
    pub async fn is_admin(&self, user_id: &str) -> DbResult<bool> {
        let role: Option<bool> = sqlx::query_scalar("SELECT role FROM admins WHERE user_id = ?1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        debug!(user_id = %user_id, role = ?role, "Checked admin role");
        Ok(role.unwrap_or(false))
    }

    /// Creates or replaces the admin row for a user.
    pub async fn set_role(&self, user_id: &str, role: bool) -> DbResult<()> {
        debug!(user_id = %user_id, role, "Setting admin role");

        sqlx::query(
            r#"
            INSERT INTO admins (user_id, role, created_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(user_id) DO UPDATE SET role = excluded.role
            "#,
        )
        .bind(user_id)
        .bind(role)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
