//! # Ports
//!
//! Traits for every external collaborator of the storefront.
//!
//! ## Ports and Adapters
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Service                 Port                  Adapters                │
//! │   ───────                 ────                  ────────                │
//! │   Catalog, Moderation,                                                  │
//! │   Submission ──────────► ProductStore ───────► ProductRepository       │
//! │                                          └───► MemoryProductStore      │
//! │   ModerationBoard ─────► NotificationSink ───► NotificationRepository  │
//! │   ModerationBoard ─────► AdminDirectory ─────► AdminRepository         │
//! │   ContactForm ─────────► ContactInbox ───────► ContactRepository       │
//! │   CartStore ───────────► KeyValueStore ──────► KvRepository            │
//! │   SubmissionService ───► ImageHost ──────────► ImgbbHost (reqwest)     │
//! │                                                                         │
//! │   Every port has an in-memory adapter in `adapters::memory`.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use suuq_core::{ContactMessage, NewProduct, Notification, Product, ProductStatus};

use crate::error::StorefrontResult;

/// The `products` collection of the document store.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Every product, any status.
    async fn list_products(&self) -> StorefrontResult<Vec<Product>>;

    async fn get_product(&self, id: &str) -> StorefrontResult<Option<Product>>;

    /// Stores a new submission as `pending` and returns it with its id.
    async fn insert_product(&self, product: NewProduct) -> StorefrontResult<Product>;

    /// Moves a `pending` product to `status` and stamps `updated_at` (and
    /// `approved_at` on approval). A product that is no longer pending is
    /// left as is and reported as `InvalidTransition`.
    async fn update_status(
        &self,
        id: &str,
        status: ProductStatus,
        now: DateTime<Utc>,
    ) -> StorefrontResult<()>;

    async fn delete_product(&self, id: &str) -> StorefrontResult<()>;
}

/// The `notifications` collection. Write-only.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, notification: &Notification) -> StorefrontResult<()>;
}

/// The `admins` collection.
#[async_trait]
pub trait AdminDirectory: Send + Sync {
    async fn is_admin(&self, user_id: &str) -> StorefrontResult<bool>;
}

/// The `contacts` collection.
#[async_trait]
pub trait ContactInbox: Send + Sync {
    async fn store(&self, message: &ContactMessage) -> StorefrontResult<()>;
}

/// Local key-value storage holding string slots.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> StorefrontResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> StorefrontResult<()>;

    async fn remove(&self, key: &str) -> StorefrontResult<()>;
}

/// A re-encoded image ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// The external image host.
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Uploads one image and returns its public URL.
    async fn upload(&self, image: EncodedImage) -> StorefrontResult<String>;
}

/// The full set of collaborators, shared by every service.
#[derive(Clone)]
pub struct Ports {
    pub products: Arc<dyn ProductStore>,
    pub notifications: Arc<dyn NotificationSink>,
    pub admins: Arc<dyn AdminDirectory>,
    pub contacts: Arc<dyn ContactInbox>,
    pub slots: Arc<dyn KeyValueStore>,
    pub images: Arc<dyn ImageHost>,
}
