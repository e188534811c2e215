//! # suuq-core: Pure Business Logic for the Suuq Marketplace
//!
//! This crate holds every marketplace rule as plain functions and value
//! types. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Suuq Architecture                                │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web Frontend (SPA)                           │   │
//! │  │   Browse ──► Product ──► Cart ──► Upload ──► Admin Panel        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  suuq-storefront (services)                     │   │
//! │  │   CartStore, ModerationBoard, SubmissionService, Catalog        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ suuq-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌────────┐ ┌────────┐ ┌────────────┐ ┌────────┐  │   │
//! │  │   │  types  │ │ money  │ │  cart  │ │ moderation │ │catalog │  │   │
//! │  │   └─────────┘ └────────┘ └────────┘ └────────────┘ └────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Notification, Session, etc.)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - Cart container (unique items, derived total)
//! - [`moderation`] - pending → approved/rejected state machine
//! - [`catalog`] - Visibility rules, filtering and sorting
//! - [`validation`] - Form and upload validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use suuq_core::money::Money;
//!
//! let price = Money::parse_decimal("10.50").unwrap();
//! assert_eq!(price.cents(), 1050);
//! assert_eq!((price * 2i64).to_string(), "$21.00");
//! ```

pub mod cart;
pub mod catalog;
pub mod error;
pub mod moderation;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of images attached to one product submission.
pub const MAX_PRODUCT_IMAGES: usize = 3;

/// Largest accepted image file, checked before any processing (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Longest side of an uploaded image after downscaling, in pixels.
pub const MAX_IMAGE_DIMENSION: u32 = 800;

/// JPEG quality used when re-encoding uploads (0-100).
pub const JPEG_QUALITY: u8 = 70;

/// Largest quantity a single cart line can hold.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Minimum number of digits in a seller phone number.
pub const MIN_PHONE_DIGITS: usize = 10;

/// Prefix of the per-user cart slot in local key-value storage.
pub const CART_SLOT_PREFIX: &str = "cart_";

/// Returns the key-value slot holding a user's cart (`cart_<userId>`).
pub fn cart_slot_key(user_id: &str) -> String {
    format!("{}{}", CART_SLOT_PREFIX, user_id)
}
