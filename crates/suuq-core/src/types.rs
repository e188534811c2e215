//! # Domain Types
//!
//! Core domain types used throughout Suuq.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  ProductStatus  │   │  Notification   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (store)     │   │  Pending        │   │  user_id        │       │
//! │  │  category       │   │  Approved       │   │  message        │       │
//! │  │  price_cents    │   │  Rejected       │   │  product_name   │       │
//! │  │  image_urls     │   └─────────────────┘   │  read = false   │       │
//! │  │  seller_info    │                         └─────────────────┘       │
//! │  │  status         │   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  user_id        │   │    Category     │   │    Session      │       │
//! │  └─────────────────┘   │  (8 fixed)      │   │  user_id, email │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product Status
// =============================================================================

/// Moderation status of a product.
///
/// ```text
///               approve
///   ┌─────────┐ ───────► ┌──────────┐
///   │ Pending │          │ Approved │  (terminal)
///   └─────────┘ ───────► └──────────┘
///               reject   ┌──────────┐
///                 └────► │ Rejected │  (terminal)
///                        └──────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// Waiting for administrator review. Every new product starts here.
    #[default]
    Pending,
    /// Visible in public browse and search views.
    Approved,
    /// Hidden from the public; visible to owner and administrators.
    Rejected,
}

impl ProductStatus {
    /// All statuses, in moderation order.
    pub const ALL: [ProductStatus; 3] = [
        ProductStatus::Pending,
        ProductStatus::Approved,
        ProductStatus::Rejected,
    ];

    /// Returns the lowercase wire label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Pending => "pending",
            ProductStatus::Approved => "approved",
            ProductStatus::Rejected => "rejected",
        }
    }

    /// Only approved products are shown in public views.
    #[inline]
    pub const fn is_public(&self) -> bool {
        matches!(self, ProductStatus::Approved)
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(ProductStatus::Pending),
            "approved" => Ok(ProductStatus::Approved),
            "rejected" => Ok(ProductStatus::Rejected),
            _ => Err(ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: ProductStatus::ALL.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Moderation Action
// =============================================================================

/// An administrator decision on a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    Approve,
    Reject,
    Delete,
}

impl ModerationAction {
    /// The action as it reads after it happened ("approved", "rejected").
    pub fn past_tense(&self) -> &'static str {
        match self {
            ModerationAction::Approve => "approved",
            ModerationAction::Reject => "rejected",
            ModerationAction::Delete => "deleted",
        }
    }
}

impl fmt::Display for ModerationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ModerationAction::Approve => "approve",
            ModerationAction::Reject => "reject",
            ModerationAction::Delete => "delete",
        })
    }
}

// =============================================================================
// Category
// =============================================================================

/// Product category. The labels are the storefront's own (Somali) names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum Category {
    /// Electronics
    Elektaroonig,
    /// Clothing
    Dharka,
    /// Home
    Guriga,
    /// Food
    Cunto,
    /// Books
    Buugaag,
    /// Sports
    Ciyaaraha,
    /// Vehicles
    Gaadiid,
    /// Other
    Kale,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 8] = [
        Category::Elektaroonig,
        Category::Dharka,
        Category::Guriga,
        Category::Cunto,
        Category::Buugaag,
        Category::Ciyaaraha,
        Category::Gaadiid,
        Category::Kale,
    ];

    /// Returns the storefront label.
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Elektaroonig => "Elektaroonig",
            Category::Dharka => "Dharka",
            Category::Guriga => "Guriga",
            Category::Cunto => "Cunto",
            Category::Buugaag => "Buugaag",
            Category::Ciyaaraha => "Ciyaaraha",
            Category::Gaadiid => "Gaadiid",
            Category::Kale => "Kale",
        }
    }

    /// Returns the English name (admin tooling, logs).
    pub const fn english_name(&self) -> &'static str {
        match self {
            Category::Elektaroonig => "Electronics",
            Category::Dharka => "Clothing",
            Category::Guriga => "Home",
            Category::Cunto => "Food",
            Category::Buugaag => "Books",
            Category::Ciyaaraha => "Sports",
            Category::Gaadiid => "Vehicles",
            Category::Kale => "Others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                if s.is_empty() {
                    ValidationError::required("category")
                } else {
                    ValidationError::NotAllowed {
                        field: "category".to_string(),
                        allowed: Category::ALL.iter().map(|c| c.label().to_string()).collect(),
                    }
                }
            })
    }
}

// =============================================================================
// Seller Info
// =============================================================================

/// Contact details a seller attaches to a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SellerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
}

// =============================================================================
// Product
// =============================================================================

/// A marketplace listing.
///
/// ## Lifecycle
/// Created by a seller submission (always `Pending`), then changed only by
/// an administrator `approve`/`reject`, or deleted. There is no content
/// update path.
///
/// ## JSON
/// Fields are camelCase. `imageUrl` is written next to `imageUrls` as the
/// primary image and ignored when reading back.
#[derive(Debug, Clone, PartialEq, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque identifier assigned by the backing store.
    pub id: String,

    pub name: String,

    pub description: String,

    pub category: Category,

    /// Price in cents (smallest currency unit), never negative.
    pub price_cents: i64,

    /// Hosted image URLs in selection order; the first is the primary image.
    pub image_urls: Vec<String>,

    pub seller_info: SellerInfo,

    pub status: ProductStatus,

    /// Owner reference, used only for filtering.
    pub user_id: String,

    /// Email of the submitting account.
    pub user_email: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "Option<String>")]
    pub approved_at: Option<DateTime<Utc>>,

    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Serialize for Product {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Product", 14)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("category", &self.category)?;
        state.serialize_field("priceCents", &self.price_cents)?;
        state.serialize_field("imageUrl", &self.image_url())?;
        state.serialize_field("imageUrls", &self.image_urls)?;
        state.serialize_field("sellerInfo", &self.seller_info)?;
        state.serialize_field("status", &self.status)?;
        state.serialize_field("userId", &self.user_id)?;
        state.serialize_field("userEmail", &self.user_email)?;
        state.serialize_field("createdAt", &self.created_at)?;
        state.serialize_field("approvedAt", &self.approved_at)?;
        state.serialize_field("updatedAt", &self.updated_at)?;
        state.end()
    }
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the primary (display) image, always `image_urls[0]`.
    pub fn image_url(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    /// Checks if the product belongs to the given user.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

// =============================================================================
// New Product
// =============================================================================

/// A product about to be created by a seller submission.
///
/// There is no `status` field: the store writes every new
/// product as [`ProductStatus::Pending`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub price_cents: i64,
    pub image_urls: Vec<String>,
    pub seller_info: SellerInfo,
    pub user_id: String,
    pub user_email: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl NewProduct {
    /// Materializes the stored record once the store has assigned an id.
    pub fn into_product(self, id: impl Into<String>) -> Product {
        Product {
            id: id.into(),
            name: self.name,
            description: self.description,
            category: self.category,
            price_cents: self.price_cents,
            image_urls: self.image_urls,
            seller_info: self.seller_info,
            status: ProductStatus::Pending,
            user_id: self.user_id,
            user_email: self.user_email,
            created_at: self.created_at,
            approved_at: None,
            updated_at: None,
        }
    }
}

// =============================================================================
// Product Draft
// =============================================================================

/// Raw upload form input, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    /// Category label as selected in the form.
    pub category: String,
    /// Price as typed (e.g. "12.50").
    pub price: String,
    pub seller_info: SellerInfo,
}

// =============================================================================
// Notification
// =============================================================================

/// A message for a product owner, written when an administrator acts.
/// Write-only from the storefront's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub user_id: String,
    pub message: String,
    pub product_name: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

// =============================================================================
// Contact Message
// =============================================================================

/// A message submitted through the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Session
// =============================================================================

/// An authenticated session as supplied by the authentication service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Opaque user identifier.
    pub user_id: String,
    pub email: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Session {
            user_id: user_id.into(),
            email: email.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_default_is_pending() {
        assert_eq!(ProductStatus::default(), ProductStatus::Pending);
    }

    #[test]
    fn test_status_parsing_and_display() {
        for status in ProductStatus::ALL {
            assert_eq!(status.to_string().parse::<ProductStatus>().unwrap(), status);
        }
        assert!("archived".parse::<ProductStatus>().is_err());
        assert!(ProductStatus::Approved.is_public());
        assert!(!ProductStatus::Pending.is_public());
        assert!(!ProductStatus::Rejected.is_public());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&ProductStatus::Rejected).unwrap();
        assert_eq!(json, "\"rejected\"");
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("Dharka".parse::<Category>().unwrap(), Category::Dharka);
        assert_eq!("gaadiid".parse::<Category>().unwrap(), Category::Gaadiid);
        assert!(matches!(
            "".parse::<Category>(),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            "Toys".parse::<Category>(),
            Err(ValidationError::NotAllowed { .. })
        ));
        assert_eq!(Category::Kale.english_name(), "Others");
    }

    #[test]
    fn test_new_product_is_materialized_pending() {
        let new_product = NewProduct {
            name: "Laptop".to_string(),
            description: "Barely used".to_string(),
            category: Category::Elektaroonig,
            price_cents: 45000,
            image_urls: vec!["https://img/a.jpg".into(), "https://img/b.jpg".into()],
            seller_info: SellerInfo::default(),
            user_id: "u-1".to_string(),
            user_email: Some("u1@example.com".to_string()),
            created_at: Utc::now(),
        };

        let product = new_product.into_product("p-1");
        assert_eq!(product.id, "p-1");
        assert_eq!(product.status, ProductStatus::Pending);
        assert_eq!(product.image_url(), Some("https://img/a.jpg"));
        assert_eq!(product.price().to_string(), "$450.00");
        assert!(product.is_owned_by("u-1"));
        assert!(product.approved_at.is_none());
    }

    #[test]
    fn test_product_json_carries_primary_image() {
        let product = NewProduct {
            name: "Lamp".to_string(),
            description: "Brass".to_string(),
            category: Category::Guriga,
            price_cents: 1999,
            image_urls: vec!["https://img/front.jpg".into(), "https://img/back.jpg".into()],
            seller_info: SellerInfo::default(),
            user_id: "u-1".to_string(),
            user_email: None,
            created_at: Utc::now(),
        }
        .into_product("p-1");

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["imageUrl"], "https://img/front.jpg");
        assert_eq!(json["imageUrls"][1], "https://img/back.jpg");
        assert_eq!(json["priceCents"], 1999);
        assert_eq!(json["sellerInfo"]["name"], "");

        let restored: Product = serde_json::from_value(json).unwrap();
        assert_eq!(restored, product);

        let bare = Product {
            image_urls: vec![],
            ..product
        };
        assert!(serde_json::to_value(&bare).unwrap()["imageUrl"].is_null());
    }
}
