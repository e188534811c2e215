//! # Product Repository
//!
//! Database operations for marketplace listings.
//!
//! ## Key Operations
//! - Listing (all, by status, by owner)
//! - Insert of new submissions (always `pending`)
//! - Status updates for moderation
//! - Delete
//!
//! ## Row Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products row                         Product                           │
//! │  ────────────                         ───────                           │
//! │  image_urls  '["https://a", ...]' ──► image_urls: Vec<String>          │
//! │  seller_name, seller_email,                                            │
//! │  seller_phone, seller_location ─────► seller_info: SellerInfo          │
//! │  status 'pending'              ─────► ProductStatus::Pending           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use suuq_core::{Category, NewProduct, Product, ProductStatus, SellerInfo};

const SELECT_PRODUCT: &str = r#"
    SELECT
        id, name, description, category, price_cents, image_urls,
        seller_name, seller_email, seller_phone, seller_location,
        status, user_id, user_email, created_at, approved_at, updated_at
    FROM products
"#;

/// A `products` row as stored.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: String,
    name: String,
    description: String,
    category: Category,
    price_cents: i64,
    image_urls: String,
    seller_name: String,
    seller_email: String,
    seller_phone: String,
    seller_location: String,
    status: ProductStatus,
    user_id: String,
    user_email: Option<String>,
    created_at: DateTime<Utc>,
    approved_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> DbResult<Self> {
        let image_urls: Vec<String> = serde_json::from_str(&row.image_urls)
            .map_err(|e| DbError::invalid_data(format!("Product {}", row.id), e))?;

        Ok(Product {
            id: row.id,
            name: row.name,
            description: row.description,
            category: row.category,
            price_cents: row.price_cents,
            image_urls,
            seller_info: SellerInfo {
                name: row.seller_name,
                email: row.seller_email,
                phone: row.seller_phone,
                location: row.seller_location,
            },
            status: row.status,
            user_id: row.user_id,
            user_email: row.user_email,
            created_at: row.created_at,
            approved_at: row.approved_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_products(rows: Vec<ProductRow>) -> DbResult<Vec<Product>> {
    rows.into_iter().map(Product::try_from).collect()
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let pending = repo.list_by_status(ProductStatus::Pending).await?;
/// repo.update_status(&pending[0].id, ProductStatus::Approved, Utc::now()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every product, newest first.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "{SELECT_PRODUCT} ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed products");
        into_products(rows)
    }

    /// Lists products in one moderation status, newest first.
    pub async fn list_by_status(&self, status: ProductStatus) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "{SELECT_PRODUCT} WHERE status = ?1 ORDER BY created_at DESC"
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        into_products(rows)
    }

    /// Lists all products of one owner, regardless of status.
    pub async fn list_by_owner(&self, user_id: &str) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "{SELECT_PRODUCT} WHERE user_id = ?1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        into_products(rows)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_PRODUCT} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    /// Inserts a new submission and returns the stored product.
    ///
    /// The id is generated here (UUID v4) and the status is always `pending`.
    pub async fn insert(&self, new_product: NewProduct) -> DbResult<Product> {
        let id = Uuid::new_v4().to_string();
        debug!(id = %id, user_id = %new_product.user_id, "Inserting product");

        let image_urls = serde_json::to_string(&new_product.image_urls)
            .map_err(|e| DbError::invalid_data("Product", e))?;

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, category, price_cents, image_urls,
                seller_name, seller_email, seller_phone, seller_location,
                status, user_id, user_email, created_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6,
                ?7, ?8, ?9, ?10,
                ?11, ?12, ?13, ?14
            )
            "#,
        )
        .bind(&id)
        .bind(&new_product.name)
        .bind(&new_product.description)
        .bind(new_product.category)
        .bind(new_product.price_cents)
        .bind(&image_urls)
        .bind(&new_product.seller_info.name)
        .bind(&new_product.seller_info.email)
        .bind(&new_product.seller_info.phone)
        .bind(&new_product.seller_info.location)
        .bind(ProductStatus::Pending)
        .bind(&new_product.user_id)
        .bind(&new_product.user_email)
        .bind(new_product.created_at)
        .execute(&self.pool)
        .await?;

        Ok(new_product.into_product(id))
    }

    /// Moves a pending product to `status` and stamps the matching timestamps.
    ///
    /// The write only matches a row that is still `pending`, so a product
    /// resolved by someone else in the meantime is left untouched.
    ///
    /// ## Timestamps
    /// - always: `updated_at = now`
    /// - approved: `approved_at = now`
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    /// * `Err(DbError::StatusConflict)` - Product is no longer pending
    pub async fn update_status(
        &self,
        id: &str,
        status: ProductStatus,
        now: DateTime<Utc>,
    ) -> DbResult<()> {
        debug!(id = %id, status = %status, "Updating product status");

        let approved_at = (status == ProductStatus::Approved).then_some(now);

        let result = sqlx::query(
            r#"
            UPDATE products SET
                status = ?2,
                approved_at = COALESCE(?3, approved_at),
                updated_at = ?4
            WHERE id = ?1 AND status = ?5
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(approved_at)
        .bind(now)
        .bind(ProductStatus::Pending)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            let current: Option<ProductStatus> =
                sqlx::query_scalar("SELECT status FROM products WHERE id = ?1")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;

            return Err(match current {
                Some(current) => DbError::StatusConflict {
                    id: id.to_string(),
                    current,
                },
                None => DbError::not_found("Product", id),
            });
        }

        Ok(())
    }

    /// Deletes a product.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use chrono::Duration;

    fn new_product(name: &str, user_id: &str, age_minutes: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: format!("{name} in good condition"),
            category: Category::Elektaroonig,
            price_cents: 12_500,
            image_urls: vec![
                "https://i.ibb.co/a.jpg".to_string(),
                "https://i.ibb.co/b.jpg".to_string(),
            ],
            seller_info: SellerInfo {
                name: "Amina".to_string(),
                email: "amina@example.com".to_string(),
                phone: "+252617211084".to_string(),
                location: "Hodan".to_string(),
            },
            user_id: user_id.to_string(),
            user_email: Some(format!("{user_id}@example.com")),
            created_at: Utc::now() - Duration::minutes(age_minutes),
        }
    }

    async fn repo() -> ProductRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().products()
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trips_fields() {
        let repo = repo().await;

        let inserted = repo.insert(new_product("Laptop", "u-1", 0)).await.unwrap();
        assert_eq!(inserted.status, ProductStatus::Pending);

        let stored = repo.get_by_id(&inserted.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Laptop");
        assert_eq!(stored.category, Category::Elektaroonig);
        assert_eq!(stored.status, ProductStatus::Pending);
        assert_eq!(stored.image_url(), Some("https://i.ibb.co/a.jpg"));
        assert_eq!(stored.image_urls.len(), 2);
        assert_eq!(stored.seller_info.phone, "+252617211084");
        assert_eq!(stored.user_email.as_deref(), Some("u-1@example.com"));
        assert!(stored.approved_at.is_none());

        assert!(repo.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_listing_orders_newest_first() {
        let repo = repo().await;
        repo.insert(new_product("Old", "u-1", 60)).await.unwrap();
        repo.insert(new_product("New", "u-2", 1)).await.unwrap();

        let all = repo.list_all().await.unwrap();
        let names: Vec<_> = all.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["New", "Old"]);

        assert_eq!(repo.list_by_owner("u-1").await.unwrap().len(), 1);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_update_status_stamps_timestamps() {
        let repo = repo().await;
        let a = repo.insert(new_product("A", "u-1", 0)).await.unwrap();
        let b = repo.insert(new_product("B", "u-1", 0)).await.unwrap();
        let now = Utc::now();

        repo.update_status(&a.id, ProductStatus::Approved, now).await.unwrap();
        repo.update_status(&b.id, ProductStatus::Rejected, now).await.unwrap();

        let a = repo.get_by_id(&a.id).await.unwrap().unwrap();
        assert_eq!(a.status, ProductStatus::Approved);
        assert!(a.approved_at.is_some());
        assert!(a.updated_at.is_some());

        let b = repo.get_by_id(&b.id).await.unwrap().unwrap();
        assert_eq!(b.status, ProductStatus::Rejected);
        assert!(b.approved_at.is_none());

        let approved = repo.list_by_status(ProductStatus::Approved).await.unwrap();
        assert_eq!(approved.len(), 1);
    }

    #[tokio::test]
    async fn test_update_status_only_moves_pending_products() {
        let repo = repo().await;
        let p = repo.insert(new_product("Lamp", "u-1", 0)).await.unwrap();
        repo.update_status(&p.id, ProductStatus::Rejected, Utc::now()).await.unwrap();

        let err = repo
            .update_status(&p.id, ProductStatus::Approved, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::StatusConflict { ref id, current: ProductStatus::Rejected } if *id == p.id
        ));

        let stored = repo.get_by_id(&p.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ProductStatus::Rejected);
        assert!(stored.approved_at.is_none());
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found() {
        let repo = repo().await;

        let err = repo
            .update_status("nope", ProductStatus::Approved, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        assert!(matches!(
            repo.delete("nope").await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo().await;
        let p = repo.insert(new_product("Gone", "u-1", 0)).await.unwrap();

        repo.delete(&p.id).await.unwrap();
        assert!(repo.get_by_id(&p.id).await.unwrap().is_none());
    }
}
