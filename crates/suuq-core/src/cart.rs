//! # Cart Module
//!
//! The shopping cart container and its math. Persistence and session
//! handling live in `suuq-storefront`; this module only knows about items.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Operations                                  │
//! │                                                                         │
//! │  Shopper Action            Cart Method              Effect              │
//! │  ──────────────            ───────────              ──────              │
//! │                                                                         │
//! │  "Add to cart" ──────────► add() ─────────────────► push or qty + 1     │
//! │                                                                         │
//! │  Change quantity ────────► set_quantity() ────────► qty = n (1..=999)   │
//! │                                                                         │
//! │  Click remove ───────────► remove() ──────────────► items.retain(..)    │
//! │                                                                         │
//! │  Checkout / empty ───────► clear() ───────────────► items.clear()       │
//! │                                                                         │
//! │  View cart ──────────────► total() ───────────────► Σ price × qty       │
//! │                                                                         │
//! │  The total is never stored; it is derived from the items on each read. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persisted Shape
//! The cart serializes as a plain JSON array of product snapshots, each
//! carrying a `quantity` field next to the product fields (`imageUrl`
//! included). Prices are stored as integer `priceCents`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Cart Item
// =============================================================================

/// An item in the shopping cart.
///
/// ## Design Notes
/// - `product`: frozen copy of the product at the time it was added. Later
///   changes to the stored product do not reach the cart.
/// - `quantity`: always at least 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub product: Product,

    pub quantity: u32,
}

impl CartItem {
    /// Creates a cart item with quantity 1.
    pub fn new(product: Product) -> Self {
        CartItem {
            product,
            quantity: 1,
        }
    }

    /// Product id of this line.
    #[inline]
    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.product.price().saturating_mul(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by product id (adding the same product increases quantity)
/// - Every quantity is between 1 and [`MAX_ITEM_QUANTITY`]
/// - Insertion order is kept
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds a product, or increases its quantity by one if already present.
    /// A line already at [`MAX_ITEM_QUANTITY`] stays there.
    pub fn add(&mut self, product: Product) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity = item.quantity.saturating_add(1).min(MAX_ITEM_QUANTITY);
            return;
        }

        self.items.push(CartItem::new(product));
    }

    /// Removes a product. Does nothing if it is not in the cart.
    pub fn remove(&mut self, product_id: &str) {
        self.items.retain(|i| i.product.id != product_id);
    }

    /// Replaces the quantity of a product already in the cart.
    ///
    /// ## Behavior
    /// - `quantity < 1`: no change (use [`Cart::remove`] to drop a line)
    /// - `quantity > MAX_ITEM_QUANTITY`: [`ValidationError::OutOfRange`], no change
    /// - product not in cart: no change
    ///
    /// Returns `Ok(true)` when the cart changed.
    pub fn set_quantity(
        &mut self,
        product_id: &str,
        quantity: i64,
    ) -> Result<bool, ValidationError> {
        if quantity < 1 {
            return Ok(false);
        }
        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|q| *q <= MAX_ITEM_QUANTITY)
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max: i64::from(MAX_ITEM_QUANTITY),
            })?;

        match self.items.iter_mut().find(|i| i.product.id == product_id) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Looks up the line for a product.
    pub fn get(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }

    /// Returns true if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of `price × quantity` over all lines, saturating at `i64::MAX` cents.
    pub fn total(&self) -> Money {
        self.items
            .iter()
            .map(CartItem::line_total)
            .fold(Money::zero(), Money::saturating_add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
