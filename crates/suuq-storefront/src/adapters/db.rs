//! # SQLite Adapters
//!
//! Port implementations on top of the `suuq-db` repositories. Each method is
//! a thin call; `DbError` converts into `StorefrontError` through `?`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use suuq_core::moderation::stale_write;
use suuq_core::{ContactMessage, NewProduct, Notification, Product, ProductStatus};
use suuq_db::{
    AdminRepository, ContactRepository, Database, DbError, KvRepository, NotificationRepository,
    ProductRepository,
};

use crate::error::StorefrontResult;
use crate::ports::{
    AdminDirectory, ContactInbox, ImageHost, KeyValueStore, NotificationSink, Ports, ProductStore,
};

#[async_trait]
impl ProductStore for ProductRepository {
    async fn list_products(&self) -> StorefrontResult<Vec<Product>> {
        Ok(self.list_all().await?)
    }

    async fn get_product(&self, id: &str) -> StorefrontResult<Option<Product>> {
        Ok(self.get_by_id(id).await?)
    }

    async fn insert_product(&self, product: NewProduct) -> StorefrontResult<Product> {
        Ok(self.insert(product).await?)
    }

    async fn update_status(
        &self,
        id: &str,
        status: ProductStatus,
        now: DateTime<Utc>,
    ) -> StorefrontResult<()> {
        match ProductRepository::update_status(self, id, status, now).await {
            Err(DbError::StatusConflict { id, current }) => {
                Err(stale_write(&id, current, status).into())
            }
            other => Ok(other?),
        }
    }

    async fn delete_product(&self, id: &str) -> StorefrontResult<()> {
        Ok(self.delete(id).await?)
    }
}

#[async_trait]
impl NotificationSink for NotificationRepository {
    async fn notify(&self, notification: &Notification) -> StorefrontResult<()> {
        self.insert(notification).await?;
        Ok(())
    }
}

#[async_trait]
impl AdminDirectory for AdminRepository {
    async fn is_admin(&self, user_id: &str) -> StorefrontResult<bool> {
        Ok(AdminRepository::is_admin(self, user_id).await?)
    }
}

#[async_trait]
impl ContactInbox for ContactRepository {
    async fn store(&self, message: &ContactMessage) -> StorefrontResult<()> {
        self.insert(message).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for KvRepository {
    async fn get(&self, key: &str) -> StorefrontResult<Option<String>> {
        Ok(KvRepository::get(self, key).await?)
    }

    async fn set(&self, key: &str, value: &str) -> StorefrontResult<()> {
        Ok(KvRepository::set(self, key, value).await?)
    }

    async fn remove(&self, key: &str) -> StorefrontResult<()> {
        Ok(KvRepository::remove(self, key).await?)
    }
}

impl Ports {
    /// Wires every store port to one SQLite database.
    pub fn from_database(db: &Database, images: Arc<dyn ImageHost>) -> Self {
        Ports {
            products: Arc::new(db.products()),
            notifications: Arc::new(db.notifications()),
            admins: Arc::new(db.admins()),
            contacts: Arc::new(db.contacts()),
            slots: Arc::new(db.kv()),
            images,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryImageHost;
    use suuq_core::{Category, SellerInfo};
    use suuq_db::DbConfig;

    #[tokio::test]
    async fn test_ports_over_sqlite() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let ports = Ports::from_database(&db, Arc::new(MemoryImageHost::new()));

        let product = ports
            .products
            .insert_product(NewProduct {
                name: "Camel Milk".into(),
                description: "Fresh".into(),
                category: Category::Cunto,
                price_cents: 300,
                image_urls: vec!["https://i.ibb.co/x.jpg".into()],
                seller_info: SellerInfo::default(),
                user_id: "u-1".into(),
                user_email: None,
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        ports
            .products
            .update_status(&product.id, ProductStatus::Rejected, Utc::now())
            .await
            .unwrap();
        let stored = ports.products.get_product(&product.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ProductStatus::Rejected);

        let err = ports
            .products
            .update_status(&product.id, ProductStatus::Approved, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::StorefrontError::InvalidTransition {
                from: ProductStatus::Rejected,
                action: suuq_core::ModerationAction::Approve,
                ..
            }
        ));
        let stored = ports.products.get_product(&product.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ProductStatus::Rejected);

        assert!(!ports.admins.is_admin("u-1").await.unwrap());

        ports.slots.set("cart_u-1", "[]").await.unwrap();
        assert_eq!(ports.slots.get("cart_u-1").await.unwrap().as_deref(), Some("[]"));

        let err = ports.products.delete_product("missing").await.unwrap_err();
        assert!(matches!(err, crate::StorefrontError::NotFound { .. }));
    }
}
