//! # Contact Repository
//!
//! Messages submitted through the contact form.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use suuq_core::ContactMessage;

/// Repository for the `contacts` collection.
#[derive(Debug, Clone)]
pub struct ContactRepository {
    pool: SqlitePool,
}

impl ContactRepository {
    /// Creates a new ContactRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ContactRepository { pool }
    }

    /// Stores a message and returns its generated id.
    pub async fn insert(&self, message: &ContactMessage) -> DbResult<String> {
        let id = Uuid::new_v4().to_string();
        debug!(id = %id, email = %message.email, "Inserting contact message");

        sqlx::query(
            r#"
            INSERT INTO contacts (id, name, email, subject, message, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&id)
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.subject)
        .bind(&message.message)
        .bind(message.created_at)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    /// Counts stored messages.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
