//! # Product Catalog Cache
//!
//! The locally held snapshot of active products, fetched once per POS
//! session (and again after each successful checkout) for fast local
//! matching while scanning.
//!
//! ## Consistency Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  refresh() replaces the cache WHOLESALE - no incremental merge.        │
//! │                                                                         │
//! │  + avoids partial-update races                                          │
//! │  - discards entries the resolver backfilled via prepend()              │
//! │                                                                         │
//! │  A fetch failure logs a warning and leaves the cache EMPTY; the UI     │
//! │  shows "no products" and no retry is scheduled automatically.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, warn};

use salepoint_core::Product;

use crate::backend::PosBackend;

/// Default bounded page size for the one-shot catalog fetch.
pub const CATALOG_PAGE_SIZE: i64 = 500;

/// In-memory list of active products with pure read lookups.
#[derive(Debug)]
pub struct CatalogCache {
    products: Vec<Product>,
    page_size: i64,
}

impl Default for CatalogCache {
    fn default() -> Self {
        CatalogCache {
            products: Vec::new(),
            page_size: CATALOG_PAGE_SIZE,
        }
    }
}

impl CatalogCache {
    pub fn new() -> Self {
        CatalogCache::default()
    }

    /// Cache with a non-default fetch page size (deployment-tuned).
    pub fn with_page_size(page_size: i64) -> Self {
        CatalogCache {
            products: Vec::new(),
            page_size,
        }
    }

    /// Replaces the cache with the first page of active products.
    ///
    /// Failures are swallowed to an empty cache: subsequent lookups simply
    /// find nothing until the next refresh.
    pub async fn refresh<B: PosBackend + ?Sized>(&mut self, backend: &B) {
        match backend.list_active_products(1, self.page_size).await {
            Ok(page) => {
                debug!(
                    cached = page.items.len(),
                    total = page.total_count,
                    "catalog cache refreshed"
                );
                self.products = page.items;
            }
            Err(err) => {
                warn!(error = %err, "catalog refresh failed, cache cleared");
                self.products.clear();
            }
        }
    }

    /// The cached products, most recently prepended first.
    #[inline]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Exact id lookup.
    pub fn find_by_id(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Exact trimmed-string barcode lookup.
    pub fn find_by_barcode(&self, code: &str) -> Option<&Product> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        self.products.iter().find(|p| p.barcode_equals(code))
    }

    /// Case-insensitive name-substring lookup.
    pub fn find_by_name_contains(&self, text: &str) -> Vec<&Product> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        self.products.iter().filter(|p| p.name_contains(text)).collect()
    }

    /// The local filter the resolver consults before going remote:
    /// name-contains OR barcode-contains OR exact barcode match.
    pub fn filter_local(&self, query: &str) -> Vec<&Product> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        self.products
            .iter()
            .filter(|p| {
                p.name_contains(query)
                    || p.barcode.as_deref().is_some_and(|b| b.contains(query))
                    || p.barcode_equals(query)
            })
            .collect()
    }

    /// Stock figure for the cart's increase guard; a product missing from
    /// the cache counts as zero available.
    pub fn stock_of(&self, id: i64) -> i64 {
        self.find_by_id(id).map(|p| p.stock_qty).unwrap_or(0)
    }

    /// Prepends a resolver-found product so it participates in later local
    /// lookups this session. Deduplicated by id; lost on the next refresh.
    pub fn prepend(&mut self, product: Product) {
        if self.find_by_id(product.id).is_some() {
            return;
        }
        self.products.insert(0, product);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{product, FakeBackend};

    fn stocked_backend() -> FakeBackend {
        FakeBackend::with_products(vec![
            product(1, "Feeding Bottle 250ml", Some("8901000000001"), 5),
            product(2, "Baby Shampoo", Some("8901000000002"), 10),
            product(3, "Rattle Toy", None, 3),
        ])
    }

    #[tokio::test]
    async fn test_refresh_replaces_wholesale() {
        let backend = stocked_backend();
        let mut cache = CatalogCache::new();

        cache.prepend(product(99, "Stale", None, 1));
        cache.refresh(&backend).await;

        assert_eq!(cache.len(), 3);
        assert!(cache.find_by_id(99).is_none());
    }

    #[tokio::test]
    async fn test_refresh_failure_empties_cache() {
        let mut backend = stocked_backend();
        let mut cache = CatalogCache::new();
        cache.refresh(&backend).await;
        assert!(!cache.is_empty());

        backend.fail_products = true;
        cache.refresh(&backend).await;
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_lookups() {
        let backend = stocked_backend();
        let mut cache = CatalogCache::new();
        cache.refresh(&backend).await;

        assert_eq!(cache.find_by_barcode(" 8901000000001 ").unwrap().id, 1);
        assert!(cache.find_by_barcode("").is_none());
        assert_eq!(cache.find_by_name_contains("BABY").len(), 1);
        assert_eq!(cache.find_by_id(3).unwrap().name, "Rattle Toy");
        assert_eq!(cache.stock_of(2), 10);
        assert_eq!(cache.stock_of(404), 0);
    }

    #[tokio::test]
    async fn test_filter_local_matches_name_or_barcode() {
        let backend = stocked_backend();
        let mut cache = CatalogCache::new();
        cache.refresh(&backend).await;

        // name substring
        assert_eq!(cache.filter_local("bottle").len(), 1);
        // barcode substring
        assert_eq!(cache.filter_local("000000002").len(), 1);
        // full barcode
        assert_eq!(cache.filter_local("8901000000001")[0].id, 1);
        // blank query matches nothing
        assert!(cache.filter_local("  ").is_empty());
    }

    #[test]
    fn test_prepend_dedupes_by_id() {
        let mut cache = CatalogCache::new();
        cache.prepend(product(1, "A", None, 1));
        cache.prepend(product(1, "A again", None, 1));
        cache.prepend(product(2, "B", None, 1));

        assert_eq!(cache.len(), 2);
        // newest prepend sits first
        assert_eq!(cache.products()[0].id, 2);
    }
}
