//! # Category Index
//!
//! Active categories for the category-browse view. Same wholesale-replace,
//! swallow-to-empty policy as the catalog cache.

use tracing::{debug, warn};

use salepoint_core::Category;

use crate::backend::PosBackend;

/// In-memory list of active categories.
#[derive(Debug, Default)]
pub struct CategoryIndex {
    categories: Vec<Category>,
}

impl CategoryIndex {
    pub fn new() -> Self {
        CategoryIndex::default()
    }

    /// Fetches all categories (the backend seam already filters to active)
    /// and replaces the index wholesale. Failures swallow to empty.
    pub async fn refresh<B: PosBackend + ?Sized>(&mut self, backend: &B) {
        match backend.list_categories().await {
            Ok(categories) => {
                debug!(count = categories.len(), "category index refreshed");
                self.categories = categories;
            }
            Err(err) => {
                warn!(error = %err, "category refresh failed, index cleared");
                self.categories.clear();
            }
        }
    }

    #[inline]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Case-insensitive name-substring lookup, same semantics as the
    /// catalog's name search.
    pub fn find_by_name_contains(&self, text: &str) -> Vec<&Category> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.categories
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeBackend;

    fn backend_with_categories() -> FakeBackend {
        FakeBackend {
            categories: vec![
                Category {
                    id: 1,
                    name: "Feeding Items".to_string(),
                    is_active: true,
                },
                Category {
                    id: 2,
                    name: "Toys".to_string(),
                    is_active: true,
                },
            ],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_refresh_and_search() {
        let backend = backend_with_categories();
        let mut index = CategoryIndex::new();
        index.refresh(&backend).await;

        assert_eq!(index.len(), 2);
        assert_eq!(index.find_by_name_contains("feed").len(), 1);
        assert_eq!(index.find_by_name_contains("TOY")[0].id, 2);
        assert!(index.find_by_name_contains("  ").is_empty());
    }

    #[tokio::test]
    async fn test_refresh_failure_empties_index() {
        let mut backend = backend_with_categories();
        let mut index = CategoryIndex::new();
        index.refresh(&backend).await;
        assert!(!index.is_empty());

        backend.fail_categories = true;
        index.refresh(&backend).await;
        assert!(index.is_empty());
    }
}
