//! # Notification Repository
//!
//! Owner notifications written when an administrator acts on a product.
//! The storefront only writes them; reading is left to other clients.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use suuq_core::Notification;

#[derive(Debug, FromRow)]
struct NotificationRow {
    user_id: String,
    message: String,
    product_name: String,
    created_at: DateTime<Utc>,
    read: bool,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Notification {
            user_id: row.user_id,
            message: row.message,
            product_name: row.product_name,
            created_at: row.created_at,
            read: row.read,
        }
    }
}

/// Repository for the `notifications` collection.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: SqlitePool,
}

impl NotificationRepository {
    /// Creates a new NotificationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        NotificationRepository { pool }
    }

    /// Writes a notification and returns its generated id.
    pub async fn insert(&self, notification: &Notification) -> DbResult<String> {
        let id = Uuid::new_v4().to_string();
        debug!(id = %id, user_id = %notification.user_id, "Inserting notification");

        sqlx::query(
            r#"
            INSERT INTO notifications (id, user_id, message, product_name, created_at, read)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&id)
        .bind(&notification.user_id)
        .bind(&notification.message)
        .bind(&notification.product_name)
        .bind(notification.created_at)
        .bind(notification.read)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    /// Lists a user's notifications, newest first (admin tooling, tests).
    pub async fn list_for_user(&self, user_id: &str) -> DbResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, NotificationRow>(
            r#"
            SELECT user_id, message, product_name, created_at, read
            FROM notifications
            WHERE user_id = ?1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Notification::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_insert_and_list() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.notifications();

        let notification = Notification {
            user_id: "owner-1".to_string(),
            message: "Your product \"Bike\" has been approved and is now live on the marketplace."
                .to_string(),
            product_name: "Bike".to_string(),
            created_at: Utc::now(),
            read: false,
        };

        let id = repo.insert(&notification).await.unwrap();
        assert!(!id.is_empty());

        let listed = repo.list_for_user("owner-1").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].product_name, "Bike");
        assert!(!listed[0].read);

        assert!(repo.list_for_user("someone-else").await.unwrap().is_empty());
    }
}
