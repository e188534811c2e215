//! # Cart Store
//!
//! The signed-in user's cart, kept in memory and mirrored to the
//! `cart_<userId>` slot of the key-value store.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Call                    Cart change              Slot write            │
//! │  ────                    ───────────              ──────────            │
//! │  add(product) ─────────► qty+1 or push ─────────► set(cart_<uid>)      │
//! │  set_quantity(id, n) ──► items[i].qty = n ──────► set(cart_<uid>)      │
//! │  remove(id) ───────────► items.retain(..) ──────► set(cart_<uid>)      │
//! │  clear() ──────────────► items.clear() ─────────► remove(cart_<uid>)   │
//! │  switch_user(s) ───────► load slot of s ────────► (read only)          │
//! │                                                                         │
//! │  Mutations work on a copy. The copy replaces the live cart only after  │
//! │  the slot write succeeded, so a failed write changes nothing.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use suuq_core::{cart_slot_key, Cart, CartItem, Money, Product, Session};

use crate::error::{StorefrontError, StorefrontResult};
use crate::ports::KeyValueStore;

/// Cart contents plus derived totals, for the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub items: Vec<CartItem>,
    pub item_count: usize,
    pub total_quantity: u64,
    pub total_cents: i64,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        CartSummary {
            items: cart.items().to_vec(),
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            total_cents: cart.total().cents(),
        }
    }
}

#[derive(Debug, Default)]
struct CartSession {
    session: Option<Session>,
    cart: Cart,
}

/// Persisted cart of the current session.
///
/// Only one mutation runs at a time; the lock is held across the slot write.
pub struct CartStore {
    slots: Arc<dyn KeyValueStore>,
    inner: Mutex<CartSession>,
}

impl CartStore {
    /// An empty cart with no signed-in user.
    pub fn new(slots: Arc<dyn KeyValueStore>) -> Self {
        CartStore {
            slots,
            inner: Mutex::new(CartSession::default()),
        }
    }

    /// Opens the store for `session`, loading its persisted cart.
    pub async fn open(
        slots: Arc<dyn KeyValueStore>,
        session: Option<Session>,
    ) -> StorefrontResult<Self> {
        let store = Self::new(slots);
        store.switch_user(session).await?;
        Ok(store)
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Switches to another user (or none), replacing the cart with that
    /// user's persisted one.
    ///
    /// A slot that cannot be parsed is treated as an empty cart. If the slot
    /// cannot be read the session still switches, the cart stays empty and
    /// the error is returned.
    pub async fn switch_user(&self, session: Option<Session>) -> StorefrontResult<()> {
        let mut inner = self.inner.lock().await;
        inner.session = session;
        inner.cart = Cart::new();

        let Some(user_id) = inner.session.as_ref().map(|s| s.user_id.clone()) else {
            debug!("Cart cleared for signed-out session");
            return Ok(());
        };

        let key = cart_slot_key(&user_id);
        let Some(raw) = self.slots.get(&key).await? else {
            debug!(user_id = %user_id, "No persisted cart");
            return Ok(());
        };

        match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) => {
                debug!(user_id = %user_id, items = cart.item_count(), "Restored persisted cart");
                inner.cart = cart;
            }
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Discarding unreadable cart slot");
            }
        }

        Ok(())
    }

    /// The current session, if any.
    pub async fn session(&self) -> Option<Session> {
        self.inner.lock().await.session.clone()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a product, or bumps its quantity if it is already in the cart.
    pub async fn add(&self, product: &Product) -> StorefrontResult<CartSummary> {
        let mut inner = self.inner.lock().await;
        if inner.session.is_none() {
            return Err(StorefrontError::Unauthenticated);
        }

        let mut next = inner.cart.clone();
        next.add(product.clone());
        self.commit(&mut inner, next).await?;

        debug!(product_id = %product.id, "Added to cart");
        Ok(CartSummary::from(&inner.cart))
    }

    /// Removes a product. Absent ids are ignored.
    pub async fn remove(&self, product_id: &str) -> StorefrontResult<CartSummary> {
        let mut inner = self.inner.lock().await;
        if inner.cart.get(product_id).is_none() {
            return Ok(CartSummary::from(&inner.cart));
        }

        let mut next = inner.cart.clone();
        next.remove(product_id);
        self.commit(&mut inner, next).await?;

        debug!(product_id = %product_id, "Removed from cart");
        Ok(CartSummary::from(&inner.cart))
    }

    /// Replaces a line's quantity. Quantities below 1 and absent ids are
    /// ignored; quantities above the line limit are a validation error.
    pub async fn set_quantity(
        &self,
        product_id: &str,
        quantity: i64,
    ) -> StorefrontResult<CartSummary> {
        let mut inner = self.inner.lock().await;

        let mut next = inner.cart.clone();
        if next.set_quantity(product_id, quantity)? {
            self.commit(&mut inner, next).await?;
            debug!(product_id = %product_id, quantity, "Cart quantity changed");
        }

        Ok(CartSummary::from(&inner.cart))
    }

    /// Empties the cart and erases its slot.
    pub async fn clear(&self) -> StorefrontResult<()> {
        let mut inner = self.inner.lock().await;

        if let Some(session) = &inner.session {
            self.slots.remove(&cart_slot_key(&session.user_id)).await?;
        }
        inner.cart.clear();

        debug!("Cart cleared");
        Ok(())
    }

    /// Writes `next` to the slot, then makes it the live cart.
    async fn commit(&self, inner: &mut CartSession, next: Cart) -> StorefrontResult<()> {
        if let Some(session) = &inner.session {
            let json = serde_json::to_string(&next)
                .map_err(|e| StorefrontError::upstream("local storage", e))?;
            self.slots
                .set(&cart_slot_key(&session.user_id), &json)
                .await
                .map_err(|e| {
                    warn!(user_id = %session.user_id, error = %e, "Failed to persist cart");
                    e
                })?;
        }

        inner.cart = next;
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub async fn items(&self) -> Vec<CartItem> {
        self.inner.lock().await.cart.items().to_vec()
    }

    /// Sum of price × quantity, derived from the items on every call.
    pub async fn total(&self) -> Money {
        self.inner.lock().await.cart.total()
    }

    /// Number of distinct products.
    pub async fn item_count(&self) -> usize {
        self.inner.lock().await.cart.item_count()
    }

    /// Sum of all quantities (the header badge).
    pub async fn total_quantity(&self) -> u64 {
        self.inner.lock().await.cart.total_quantity()
    }

    pub async fn summary(&self) -> CartSummary {
        CartSummary::from(&self.inner.lock().await.cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryKeyValueStore;
    use chrono::Utc;
    use suuq_core::{Category, ProductStatus, SellerInfo, ValidationError};

    fn product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            description: "desc".into(),
            category: Category::Elektaroonig,
            price_cents,
            image_urls: vec![format!("https://img.local/{}.jpg", id)],
            seller_info: SellerInfo::default(),
            status: ProductStatus::Approved,
            user_id: "seller".into(),
            user_email: None,
            created_at: Utc::now(),
            approved_at: None,
            updated_at: None,
        }
    }

    fn alice() -> Session {
        Session::new("alice", "alice@example.com")
    }

    async fn store_for(session: Option<Session>) -> (Arc<MemoryKeyValueStore>, CartStore) {
        let slots = Arc::new(MemoryKeyValueStore::new());
        let store = CartStore::open(slots.clone(), session).await.unwrap();
        (slots, store)
    }

    #[tokio::test]
    async fn test_add_requires_session() {
        let (slots, store) = store_for(None).await;

        let err = store.add(&product("p1", 1000)).await.unwrap_err();
        assert!(matches!(err, StorefrontError::Unauthenticated));
        assert_eq!(store.item_count().await, 0);
        assert!(slots.raw("cart_alice").is_none());
    }

    #[tokio::test]
    async fn test_add_twice_then_total() {
        let (slots, store) = store_for(Some(alice())).await;

        store.add(&product("p1", 1000)).await.unwrap();
        store.add(&product("p1", 1000)).await.unwrap();
        let summary = store.add(&product("p2", 500)).await.unwrap();

        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.total_quantity, 3);
        assert_eq!(summary.total_cents, 2500);
        assert_eq!(store.total().await.cents(), 2500);

        let persisted: Cart = serde_json::from_str(&slots.raw("cart_alice").unwrap()).unwrap();
        assert_eq!(persisted.total().cents(), 2500);
    }

    #[tokio::test]
    async fn test_set_quantity_ignores_invalid() {
        let (_, store) = store_for(Some(alice())).await;
        store.add(&product("p1", 1000)).await.unwrap();

        store.set_quantity("p1", 0).await.unwrap();
        store.set_quantity("p1", -3).await.unwrap();
        store.set_quantity("missing", 5).await.unwrap();
        assert_eq!(store.total_quantity().await, 1);

        let summary = store.set_quantity("p1", 4).await.unwrap();
        assert_eq!(summary.total_quantity, 4);
        assert_eq!(summary.total_cents, 4000);
    }

    #[tokio::test]
    async fn test_oversized_quantity_is_rejected() {
        let (slots, store) = store_for(Some(alice())).await;
        let price = Money::parse_decimal("100000000").unwrap();
        store.add(&product("p1", price.cents())).await.unwrap();
        let persisted_before = slots.raw("cart_alice");

        let err = store.set_quantity("p1", 5_000_000_000).await.unwrap_err();
        assert!(matches!(
            err,
            StorefrontError::Validation(ValidationError::OutOfRange { .. })
        ));

        let summary = store.summary().await;
        assert_eq!(summary.total_quantity, 1);
        assert_eq!(summary.total_cents, price.cents());
        assert_eq!(slots.raw("cart_alice"), persisted_before);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_cart_unchanged() {
        let (slots, store) = store_for(Some(alice())).await;
        store.add(&product("p1", 1000)).await.unwrap();
        let before = store.summary().await;
        let persisted_before = slots.raw("cart_alice");

        slots.fail_writes(true);
        let err = store.add(&product("p2", 500)).await.unwrap_err();
        assert!(matches!(err, StorefrontError::Upstream { .. }));
        assert!(store.set_quantity("p1", 7).await.is_err());
        assert!(store.remove("p1").await.is_err());
        assert!(store.clear().await.is_err());

        assert_eq!(store.summary().await, before);
        assert_eq!(slots.raw("cart_alice"), persisted_before);
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let (slots, store) = store_for(Some(alice())).await;
        store.add(&product("p1", 1000)).await.unwrap();
        store.add(&product("p2", 500)).await.unwrap();

        store.remove("missing").await.unwrap();
        let summary = store.remove("p1").await.unwrap();
        assert_eq!(summary.item_count, 1);

        store.clear().await.unwrap();
        assert_eq!(store.item_count().await, 0);
        assert!(slots.raw("cart_alice").is_none());
    }

    #[tokio::test]
    async fn test_switch_user_restores_each_cart() {
        let (slots, store) = store_for(Some(alice())).await;
        store.add(&product("p1", 1000)).await.unwrap();

        let bob = Session::new("bob", "bob@example.com");
        store.switch_user(Some(bob.clone())).await.unwrap();
        assert_eq!(store.item_count().await, 0);
        store.add(&product("p2", 500)).await.unwrap();
        store.add(&product("p2", 500)).await.unwrap();

        store.switch_user(Some(alice())).await.unwrap();
        assert_eq!(store.total().await.cents(), 1000);

        store.switch_user(None).await.unwrap();
        assert_eq!(store.item_count().await, 0);
        assert!(store.session().await.is_none());

        store.switch_user(Some(bob)).await.unwrap();
        assert_eq!(store.total_quantity().await, 2);
        assert!(slots.raw("cart_bob").is_some());
    }

    #[tokio::test]
    async fn test_corrupt_slot_loads_empty() {
        let slots = Arc::new(MemoryKeyValueStore::new());
        slots.put_raw("cart_alice", "{not json");

        let store = CartStore::open(slots.clone(), Some(alice())).await.unwrap();
        assert_eq!(store.item_count().await, 0);

        store.add(&product("p1", 1000)).await.unwrap();
        assert!(serde_json::from_str::<Cart>(&slots.raw("cart_alice").unwrap()).is_ok());
    }
}
