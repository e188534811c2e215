//! # In-Memory Adapters
//!
//! In-process implementations of every port, for tests and local
//! development. Each one can be told to fail so error paths can be driven
//! without a real collaborator.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use suuq_core::moderation::stale_write;
use suuq_core::{ContactMessage, NewProduct, Notification, Product, ProductStatus};

use crate::error::{StorefrontError, StorefrontResult};
use crate::ports::{
    AdminDirectory, ContactInbox, EncodedImage, ImageHost, KeyValueStore, NotificationSink, Ports,
    ProductStore,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn injected(service: &str) -> StorefrontError {
    StorefrontError::upstream(service, "injected failure")
}

// =============================================================================
// Product Store
// =============================================================================

/// Products kept in a `Vec`, insertion order.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    products: Mutex<Vec<Product>>,
    fail_writes: AtomicBool,
    /// Accept status updates but leave the record unchanged.
    drop_status_updates: AtomicBool,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the given products.
    pub fn with_products(products: Vec<Product>) -> Self {
        MemoryProductStore {
            products: Mutex::new(products),
            ..Self::default()
        }
    }

    /// Makes insert/update/delete fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Makes status updates report success without writing.
    pub fn drop_status_updates(&self, drop: bool) {
        self.drop_status_updates.store(drop, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Vec<Product> {
        lock(&self.products).clone()
    }

    fn check_writes(&self) -> StorefrontResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(injected("database"));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list_products(&self) -> StorefrontResult<Vec<Product>> {
        Ok(self.snapshot())
    }

    async fn get_product(&self, id: &str) -> StorefrontResult<Option<Product>> {
        Ok(lock(&self.products).iter().find(|p| p.id == id).cloned())
    }

    async fn insert_product(&self, product: NewProduct) -> StorefrontResult<Product> {
        self.check_writes()?;
        let product = product.into_product(Uuid::new_v4().to_string());
        lock(&self.products).push(product.clone());
        Ok(product)
    }

    async fn update_status(
        &self,
        id: &str,
        status: ProductStatus,
        now: DateTime<Utc>,
    ) -> StorefrontResult<()> {
        self.check_writes()?;
        let mut products = lock(&self.products);
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StorefrontError::not_found("Product", id))?;

        if product.status != ProductStatus::Pending {
            return Err(stale_write(id, product.status, status).into());
        }
        if !self.drop_status_updates.load(Ordering::SeqCst) {
            suuq_core::moderation::apply(product, status, now);
        }
        Ok(())
    }

    async fn delete_product(&self, id: &str) -> StorefrontResult<()> {
        self.check_writes()?;
        let mut products = lock(&self.products);
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(StorefrontError::not_found("Product", id));
        }
        Ok(())
    }
}

// =============================================================================
// Notification Sink
// =============================================================================

/// Records every notification written.
#[derive(Debug, Default)]
pub struct MemoryNotificationSink {
    sent: Mutex<Vec<Notification>>,
    fail: AtomicBool,
}

impl MemoryNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<Notification> {
        lock(&self.sent).clone()
    }
}

#[async_trait]
impl NotificationSink for MemoryNotificationSink {
    async fn notify(&self, notification: &Notification) -> StorefrontResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(injected("notifications"));
        }
        lock(&self.sent).push(notification.clone());
        Ok(())
    }
}

// =============================================================================
// Admin Directory
// =============================================================================

/// A fixed set of administrator user ids.
#[derive(Debug, Default)]
pub struct MemoryAdminDirectory {
    admins: Mutex<HashSet<String>>,
}

impl MemoryAdminDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_admins<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MemoryAdminDirectory {
            admins: Mutex::new(ids.into_iter().map(Into::into).collect()),
        }
    }

    pub fn grant(&self, user_id: impl Into<String>) {
        lock(&self.admins).insert(user_id.into());
    }
}

#[async_trait]
impl AdminDirectory for MemoryAdminDirectory {
    async fn is_admin(&self, user_id: &str) -> StorefrontResult<bool> {
        Ok(lock(&self.admins).contains(user_id))
    }
}

// =============================================================================
// Contact Inbox
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryContactInbox {
    messages: Mutex<Vec<ContactMessage>>,
    fail: AtomicBool,
}

impl MemoryContactInbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn messages(&self) -> Vec<ContactMessage> {
        lock(&self.messages).clone()
    }
}

#[async_trait]
impl ContactInbox for MemoryContactInbox {
    async fn store(&self, message: &ContactMessage) -> StorefrontResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(injected("contacts"));
        }
        lock(&self.messages).push(message.clone());
        Ok(())
    }
}

// =============================================================================
// Key-Value Store
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    slots: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes set/remove fail (e.g. storage quota exceeded).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Raw slot value, bypassing the port.
    pub fn raw(&self, key: &str) -> Option<String> {
        lock(&self.slots).get(key).cloned()
    }

    /// Writes a slot directly, bypassing the port.
    pub fn put_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        lock(&self.slots).insert(key.into(), value.into());
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> StorefrontResult<Option<String>> {
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: &str) -> StorefrontResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(injected("local storage"));
        }
        lock(&self.slots).insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorefrontResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(injected("local storage"));
        }
        lock(&self.slots).remove(key);
        Ok(())
    }
}

// =============================================================================
// Image Host
// =============================================================================

/// Hands out `https://img.local/<file_name>` URLs.
///
/// Optional per-call delays let tests finish uploads out of order.
#[derive(Debug, Default)]
pub struct MemoryImageHost {
    uploads: Mutex<Vec<EncodedImage>>,
    calls: AtomicUsize,
    /// Fail the call with this zero-based index.
    fail_on: Mutex<Option<usize>>,
    /// Delay per call index, in milliseconds.
    delays_ms: Mutex<Vec<u64>>,
}

impl MemoryImageHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on_call(&self, index: Option<usize>) {
        *lock(&self.fail_on) = index;
    }

    pub fn delays_ms(&self, delays: Vec<u64>) {
        *lock(&self.delays_ms) = delays;
    }

    /// Images that were accepted, in completion order.
    pub fn uploads(&self) -> Vec<EncodedImage> {
        lock(&self.uploads).clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageHost for MemoryImageHost {
    async fn upload(&self, image: EncodedImage) -> StorefrontResult<String> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);

        let delay = lock(&self.delays_ms).get(index).copied().unwrap_or(0);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        if *lock(&self.fail_on) == Some(index) {
            return Err(StorefrontError::upstream("image host", "upload rejected"));
        }

        let url = format!("https://img.local/{}", image.file_name);
        lock(&self.uploads).push(image);
        Ok(url)
    }
}

// =============================================================================
// Wiring
// =============================================================================

/// Handles on the concrete fakes behind a [`Ports`] set.
#[derive(Clone, Default)]
pub struct MemoryPorts {
    pub products: Arc<MemoryProductStore>,
    pub notifications: Arc<MemoryNotificationSink>,
    pub admins: Arc<MemoryAdminDirectory>,
    pub contacts: Arc<MemoryContactInbox>,
    pub slots: Arc<MemoryKeyValueStore>,
    pub images: Arc<MemoryImageHost>,
}

impl MemoryPorts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fakes whose product store starts with `products`.
    pub fn with_products(products: Vec<Product>) -> Self {
        MemoryPorts {
            products: Arc::new(MemoryProductStore::with_products(products)),
            ..Self::default()
        }
    }

    pub fn ports(&self) -> Ports {
        Ports {
            products: self.products.clone(),
            notifications: self.notifications.clone(),
            admins: self.admins.clone(),
            contacts: self.contacts.clone(),
            slots: self.slots.clone(),
            images: self.images.clone(),
        }
    }
}
