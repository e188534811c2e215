//! # Catalog
//!
//! Read-only product views: home page, browse page, profile page and the
//! product detail page.
//!
//! Every call reads the store afresh; filtering and sorting happen in
//! `suuq_core::catalog`.

use tracing::debug;

use suuq_core::catalog::{self, ListingQuery};
use suuq_core::validation::validate_search_query;
use suuq_core::Product;

use crate::error::StorefrontResult;
use crate::ports::Ports;

pub struct Catalog {
    ports: Ports,
}

impl Catalog {
    pub fn new(ports: &Ports) -> Self {
        Catalog {
            ports: ports.clone(),
        }
    }

    /// All approved products, in store order.
    pub async fn featured(&self) -> StorefrontResult<Vec<Product>> {
        let products = self.ports.products.list_products().await?;
        Ok(catalog::featured(&products))
    }

    /// Approved products matching `query`, sorted by its sort order.
    pub async fn browse(&self, query: &ListingQuery) -> StorefrontResult<Vec<Product>> {
        let search = validate_search_query(&query.search)?;
        let query = query.clone().search(search);

        let products = self.ports.products.list_products().await?;
        let listing = catalog::public_listing(&products, &query);

        debug!(
            category = ?query.category,
            search = %query.search,
            sort = %query.sort,
            results = listing.len(),
            "Catalog browse"
        );
        Ok(listing)
    }

    /// Every product of one owner, in any status.
    pub async fn owned_by(&self, user_id: &str) -> StorefrontResult<Vec<Product>> {
        let products = self.ports.products.list_products().await?;
        Ok(catalog::owned_by(&products, user_id))
    }

    /// One product by id, any status; `None` if it does not exist.
    pub async fn product(&self, id: &str) -> StorefrontResult<Option<Product>> {
        self.ports.products.get_product(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryPorts;
    use crate::error::StorefrontError;
    use chrono::{Duration, Utc};
    use suuq_core::catalog::{CategoryFilter, SortOrder};
    use suuq_core::{Category, Money, ProductStatus, SellerInfo};

    fn product(
        id: &str,
        name: &str,
        category: Category,
        price_cents: i64,
        status: ProductStatus,
        age_days: i64,
    ) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("{} for sale", name),
            category,
            price_cents,
            image_urls: vec![format!("https://img.local/{}.jpg", id)],
            seller_info: SellerInfo::default(),
            status,
            user_id: if id.starts_with('m') { "me".into() } else { "other".into() },
            user_email: None,
            created_at: Utc::now() - Duration::days(age_days),
            approved_at: None,
            updated_at: None,
        }
    }

    fn catalog() -> (MemoryPorts, Catalog) {
        let mem = MemoryPorts::with_products(vec![
            product("a1", "Phone", Category::Elektaroonig, 20000, ProductStatus::Approved, 3),
            product("a2", "shirt", Category::Dharka, 1500, ProductStatus::Approved, 1),
            product("a3", "Radio", Category::Elektaroonig, 4500, ProductStatus::Approved, 2),
            product("m1", "Phone case", Category::Elektaroonig, 500, ProductStatus::Pending, 0),
            product("m2", "Sofa", Category::Guriga, 90000, ProductStatus::Rejected, 5),
        ]);
        let catalog = Catalog::new(&mem.ports());
        (mem, catalog)
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_featured_is_approved_only() {
        let (_, catalog) = catalog();
        assert_eq!(ids(&catalog.featured().await.unwrap()), vec!["a1", "a2", "a3"]);
    }

    #[tokio::test]
    async fn test_browse_default_is_newest_first() {
        let (_, catalog) = catalog();
        let listing = catalog.browse(&ListingQuery::default()).await.unwrap();
        assert_eq!(ids(&listing), vec!["a2", "a3", "a1"]);
    }

    #[tokio::test]
    async fn test_browse_filters_and_sorts() {
        let (_, catalog) = catalog();

        let query = ListingQuery::default()
            .category(CategoryFilter::One(Category::Elektaroonig))
            .sort(SortOrder::PriceAsc);
        assert_eq!(ids(&catalog.browse(&query).await.unwrap()), vec!["a3", "a1"]);

        let query = ListingQuery::default().search("PHONE");
        assert_eq!(ids(&catalog.browse(&query).await.unwrap()), vec!["a1"]);

        let query = ListingQuery::default()
            .price_range(Some(Money::from_cents(1500)), Some(Money::from_cents(4500)))
            .sort(SortOrder::NameAsc);
        assert_eq!(ids(&catalog.browse(&query).await.unwrap()), vec!["a3", "a2"]);
    }

    #[tokio::test]
    async fn test_browse_rejects_long_search() {
        let (_, catalog) = catalog();
        let query = ListingQuery::default().search("x".repeat(101));
        assert!(matches!(
            catalog.browse(&query).await,
            Err(StorefrontError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_owned_by_includes_every_status() {
        let (_, catalog) = catalog();
        assert_eq!(ids(&catalog.owned_by("me").await.unwrap()), vec!["m1", "m2"]);
        assert!(catalog.owned_by("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_product_lookup() {
        let (_, catalog) = catalog();
        assert_eq!(catalog.product("m1").await.unwrap().unwrap().name, "Phone case");
        assert!(catalog.product("missing").await.unwrap().is_none());
    }
}
