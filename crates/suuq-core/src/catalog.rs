//! # Catalog Module
//!
//! Visibility rules, filters and sort orders for product listings.
//!
//! ## Who Sees What
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Listing Visibility                               │
//! │                                                                         │
//! │   View                 pending     approved     rejected                │
//! │   ────                 ───────     ────────     ────────                │
//! │   Home / browse          ✗            ✓            ✗                    │
//! │   Owner profile          ✓            ✓            ✓   (own only)       │
//! │   Moderation board       ✓            ✓            ✓   (status filter)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Browse Pipeline
//! ```text
//! all products ─► approved only ─► category ─► search ─► price range ─► sort
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Category, Product, ProductStatus};

// =============================================================================
// Filters
// =============================================================================

/// Category selector of the browse page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    One(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::One(c) => *c == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::One)
    }
}

/// Status selector of the moderation board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    All,
    One(ProductStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: ProductStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::One(s) => *s == status,
        }
    }
}

/// The board opens on the review queue.
impl Default for StatusFilter {
    fn default() -> Self {
        StatusFilter::One(ProductStatus::Pending)
    }
}

impl FromStr for StatusFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::One)
    }
}

// =============================================================================
// Sort Order
// =============================================================================

/// Sort order of the browse page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
    /// Most recently created first.
    #[default]
    Newest,
}

impl SortOrder {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortOrder::PriceAsc => "price-asc",
            SortOrder::PriceDesc => "price-desc",
            SortOrder::NameAsc => "name-asc",
            SortOrder::NameDesc => "name-desc",
            SortOrder::Newest => "newest",
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOrder::PriceAsc => a.price_cents.cmp(&b.price_cents),
            SortOrder::PriceDesc => b.price_cents.cmp(&a.price_cents),
            SortOrder::NameAsc => compare_names(&a.name, &b.name),
            SortOrder::NameDesc => compare_names(&b.name, &a.name),
            SortOrder::Newest => b.created_at.cmp(&a.created_at),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown values fall back to [`SortOrder::Newest`], like the browse page.
impl FromStr for SortOrder {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "price-asc" => SortOrder::PriceAsc,
            "price-desc" => SortOrder::PriceDesc,
            "name-asc" => SortOrder::NameAsc,
            "name-desc" => SortOrder::NameDesc,
            _ => SortOrder::Newest,
        })
    }
}

/// Case-insensitive name order, ties broken by exact bytes.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

// =============================================================================
// Listing Query
// =============================================================================

/// Browse page state: filters plus sort order.
///
/// ## Example
/// ```rust
/// use suuq_core::catalog::{ListingQuery, SortOrder};
/// use suuq_core::Money;
///
/// let query = ListingQuery::default()
///     .search("phone")
///     .price_range(Some(Money::from_cents(1000)), None)
///     .sort(SortOrder::PriceAsc);
/// assert_eq!(query.sort, SortOrder::PriceAsc);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ListingQuery {
    pub category: CategoryFilter,
    /// Matched case-insensitively against name and description.
    pub search: String,
    /// Inclusive lower bound.
    pub min_price: Option<Money>,
    /// Inclusive upper bound.
    pub max_price: Option<Money>,
    pub sort: SortOrder,
}

impl ListingQuery {
    pub fn category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn price_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Checks the filters (not the visibility rule) against one product.
    pub fn matches(&self, product: &Product) -> bool {
        if !self.category.matches(product.category) {
            return false;
        }

        let term = self.search.trim().to_lowercase();
        if !term.is_empty()
            && !product.name.to_lowercase().contains(&term)
            && !product.description.to_lowercase().contains(&term)
        {
            return false;
        }

        let price = product.price();
        if self.min_price.is_some_and(|min| price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| price > max) {
            return false;
        }

        true
    }
}

// =============================================================================
// Listings
// =============================================================================

/// Approved products only, in store order (home page).
pub fn featured<'a, I>(products: I) -> Vec<Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    products
        .into_iter()
        .filter(|p| p.status.is_public())
        .cloned()
        .collect()
}

/// Browse page listing: approved only, filtered, then sorted.
///
/// The sort is stable, so equal keys keep store order.
pub fn public_listing<'a, I>(products: I, query: &ListingQuery) -> Vec<Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut listing: Vec<Product> = products
        .into_iter()
        .filter(|p| p.status.is_public() && query.matches(p))
        .cloned()
        .collect();

    listing.sort_by(|a, b| query.sort.compare(a, b));
    listing
}

/// Every product of one owner, regardless of status (profile page).
pub fn owned_by<'a, I>(products: I, user_id: &str) -> Vec<Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    products
        .into_iter()
        .filter(|p| p.is_owned_by(user_id))
        .cloned()
        .collect()
}

/// Moderation board listing for a status filter.
pub fn moderation_view<'a, I>(products: I, filter: StatusFilter) -> Vec<Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    products
        .into_iter()
        .filter(|p| filter.matches(p.status))
        .cloned()
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
