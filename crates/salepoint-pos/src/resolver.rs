//! # Product Resolver
//!
//! Turns a free-text scan/search query into zero or one product, preferring
//! already-cached data.
//!
//! ## Lookup Pipeline (first success wins)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Catalog cache: exact barcode match                                  │
//! │  2. Catalog cache: first entry of the local filter                      │
//! │     (name-contains OR barcode-contains OR exact barcode)                │
//! │  3. Remote: search by barcode AND by name, concurrently; merge          │
//! │     (dedup by id, barcode result preferred as representative) and       │
//! │     pick by documented priority:                                        │
//! │        exact barcode  >  exact case-insensitive name  >  first merged   │
//! │  4. A remote hit that was not cached is PREPENDED to the cache so it    │
//! │     participates in later local lookups this session                    │
//! │  5. Nothing anywhere -> None ("no product found")                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The priority order in step 3 is deliberate and test-covered rather than an
//! accident of array-find order.

use tracing::debug;

use salepoint_client::ClientResult;
use salepoint_core::Product;

use crate::backend::PosBackend;
use crate::catalog::CatalogCache;

/// Resolves a scan/search query against the cache, then the backend.
///
/// `Ok(None)` means every strategy was exhausted; a remote failure
/// propagates as a recoverable error and leaves the cache untouched.
pub async fn resolve<B: PosBackend + ?Sized>(
    query: &str,
    catalog: &mut CatalogCache,
    backend: &B,
) -> ClientResult<Option<Product>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(None);
    }

    // 1. Exact barcode hit in the cache
    if let Some(found) = catalog.find_by_barcode(query) {
        debug!(product_id = found.id, "resolved from cache by barcode");
        return Ok(Some(found.clone()));
    }

    // 2. First entry of the locally filtered set
    if let Some(found) = catalog.filter_local(query).first() {
        debug!(product_id = found.id, "resolved from cache by local filter");
        return Ok(Some((*found).clone()));
    }

    // 3. Two concurrent remote searches, merged and disambiguated
    let (by_barcode, by_name) = tokio::join!(
        backend.search_products_by_barcode(query),
        backend.search_products_by_name(query),
    );
    let merged = merge_remote(by_barcode?, by_name?);
    let Some(found) = pick(&merged, query).cloned() else {
        debug!(query = %query, "no product found");
        return Ok(None);
    };

    // 4. Backfill the cache so repeat scans stay local this session
    if catalog.find_by_id(found.id).is_none() {
        catalog.prepend(found.clone());
    }

    debug!(product_id = found.id, "resolved remotely");
    Ok(Some(found))
}

/// Merges the two remote result sets, de-duplicating by product id. When a
/// product appears in both, the barcode-search instance is kept as the
/// representative.
fn merge_remote(by_barcode: Vec<Product>, by_name: Vec<Product>) -> Vec<Product> {
    let mut merged = by_barcode;
    for candidate in by_name {
        if !merged.iter().any(|p| p.id == candidate.id) {
            merged.push(candidate);
        }
    }
    merged
}

/// Documented disambiguation priority:
/// exact barcode > exact case-insensitive name > first merged result.
fn pick<'a>(merged: &'a [Product], query: &str) -> Option<&'a Product> {
    let query = query.trim();
    merged
        .iter()
        .find(|p| p.barcode_equals(query))
        .or_else(|| {
            merged
                .iter()
                .find(|p| p.name.trim().to_lowercase() == query.to_lowercase())
        })
        .or_else(|| merged.first())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{product, FakeBackend};

    async fn primed_cache(backend: &FakeBackend) -> CatalogCache {
        let mut cache = CatalogCache::new();
        cache.refresh(backend).await;
        cache
    }

    #[tokio::test]
    async fn test_cached_barcode_hit_issues_no_remote_search() {
        let backend = FakeBackend::with_products(vec![product(
            1,
            "Feeding Bottle 250ml",
            Some("8901000000001"),
            5,
        )]);
        let mut cache = primed_cache(&backend).await;

        // Idempotence: resolving the same exact-barcode query twice stays local
        for _ in 0..2 {
            let found = resolve("8901000000001", &mut cache, &backend)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(found.id, 1);
        }
        assert_eq!(backend.remote_searches(), 0);
    }

    #[tokio::test]
    async fn test_local_filter_used_before_remote() {
        let backend = FakeBackend::with_products(vec![
            product(1, "Feeding Bottle 250ml", Some("8901000000001"), 5),
            product(2, "Bottle Brush", Some("8901000000002"), 5),
        ]);
        let mut cache = primed_cache(&backend).await;

        let found = resolve("bottle", &mut cache, &backend)
            .await
            .unwrap()
            .unwrap();
        // first entry of the filtered set
        assert_eq!(found.id, 1);
        assert_eq!(backend.remote_searches(), 0);
    }

    #[tokio::test]
    async fn test_remote_fallback_backfills_cache() {
        let backend = FakeBackend::with_products(vec![product(
            7,
            "Rare Import",
            Some("8901000000007"),
            2,
        )]);
        // empty cache: the product is only known remotely
        let mut cache = CatalogCache::new();

        let found = resolve("8901000000007", &mut cache, &backend)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, 7);
        assert_eq!(backend.remote_searches(), 2);
        assert!(cache.find_by_id(7).is_some());

        // Second scan of the same code is now a cache hit
        resolve("8901000000007", &mut cache, &backend)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(backend.remote_searches(), 2);
    }

    #[tokio::test]
    async fn test_nothing_found_anywhere() {
        let backend = FakeBackend::with_products(vec![]);
        let mut cache = CatalogCache::new();

        let found = resolve("8901000000001", &mut cache, &backend).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_blank_query_short_circuits() {
        let backend = FakeBackend::with_products(vec![]);
        let mut cache = CatalogCache::new();

        assert!(resolve("   ", &mut cache, &backend).await.unwrap().is_none());
        assert_eq!(backend.remote_searches(), 0);
    }

    #[test]
    fn test_merge_prefers_barcode_instance() {
        // Same id in both result sets; the barcode instance carries fresher
        // stock and must win
        let mut from_barcode = product(1, "Feeding Bottle", Some("890"), 9);
        from_barcode.stock_qty = 9;
        let mut from_name = product(1, "Feeding Bottle", Some("890"), 1);
        from_name.stock_qty = 1;

        let merged = merge_remote(vec![from_barcode], vec![from_name]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].stock_qty, 9);
    }

    #[test]
    fn test_pick_priority_order() {
        let exact_code = product(1, "Alpha", Some("12345"), 5);
        let exact_name = product(2, "12345", None, 5);
        let other = product(3, "Something 12345-ish", None, 5);

        // exact barcode beats everything
        let merged = vec![other.clone(), exact_name.clone(), exact_code.clone()];
        assert_eq!(pick(&merged, "12345").unwrap().id, 1);

        // then exact case-insensitive name
        let merged = vec![other.clone(), exact_name.clone()];
        assert_eq!(pick(&merged, "12345").unwrap().id, 2);

        // then the first merged result
        let merged = vec![other.clone()];
        assert_eq!(pick(&merged, "12345").unwrap().id, 3);

        assert!(pick(&[], "12345").is_none());
    }
}
