//! # Key-Value Repository
//!
//! Local key-value slots. The storefront keeps one slot per signed-in user
//! (`cart_<userId>`) holding the serialized cart.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for the `kv_slots` table.
#[derive(Debug, Clone)]
pub struct KvRepository {
    pool: SqlitePool,
}

impl KvRepository {
    /// Creates a new KvRepository.
    pub fn new(pool: SqlitePool) -> Self {
        KvRepository { pool }
    }

    /// Reads a slot.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_slots WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Writes a slot, replacing any previous value (last write wins).
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, bytes = value.len(), "Writing slot");

        sqlx::query(
            r#"
            INSERT INTO kv_slots (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Erases a slot. Erasing a missing slot is not an error.
    pub async fn remove(&self, key: &str) -> DbResult<()> {
        debug!(key = %key, "Removing slot");

        sqlx::query("DELETE FROM kv_slots WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_set_get_remove() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let kv = db.kv();

        assert_eq!(kv.get("cart_u-1").await.unwrap(), None);

        kv.set("cart_u-1", "[]").await.unwrap();
        kv.set("cart_u-1", "[{\"id\":\"p\"}]").await.unwrap();
        assert_eq!(
            kv.get("cart_u-1").await.unwrap().as_deref(),
            Some("[{\"id\":\"p\"}]")
        );

        kv.remove("cart_u-1").await.unwrap();
        kv.remove("cart_u-1").await.unwrap();
        assert_eq!(kv.get("cart_u-1").await.unwrap(), None);
    }
}
