//! # Backend Seam
//!
//! The POS session talks to exactly one trait. Production wires it to the
//! REST client; tests wire it to in-memory fakes. This keeps every cart,
//! resolver and checkout behavior testable without a network.

use async_trait::async_trait;

use salepoint_client::{
    CategoryApi, ClientResult, HttpClient, ProductApi, ProductPage, SalesApi,
};
use salepoint_core::{Category, Product, SaleDraft, SavedSale};

/// The external collaborators the POS session core consumes.
///
/// Contracts (mirroring the backend's REST surface):
/// - every call is fallible and recoverable; callers decide the fallback
/// - `create_sale` decrements stock server-side on success
#[async_trait]
pub trait PosBackend: Send + Sync {
    /// One page of active products, for the catalog cache.
    async fn list_active_products(&self, page: i64, page_size: i64) -> ClientResult<ProductPage>;

    /// Active products matching a barcode exactly.
    async fn search_products_by_barcode(&self, code: &str) -> ClientResult<Vec<Product>>;

    /// Active products matching a name substring.
    async fn search_products_by_name(&self, text: &str) -> ClientResult<Vec<Product>>;

    /// All active categories.
    async fn list_categories(&self) -> ClientResult<Vec<Category>>;

    /// Submits a sale; the server decrements stock per line item.
    async fn create_sale(&self, draft: &SaleDraft) -> ClientResult<SavedSale>;
}

// =============================================================================
// REST Implementation
// =============================================================================

/// Production backend: the three REST API surfaces over one HTTP client.
#[derive(Debug, Clone)]
pub struct RestBackend {
    products: ProductApi,
    categories: CategoryApi,
    sales: SalesApi,
}

impl RestBackend {
    pub fn new(http: HttpClient) -> Self {
        RestBackend {
            products: ProductApi::new(http.clone()),
            categories: CategoryApi::new(http.clone()),
            sales: SalesApi::new(http),
        }
    }
}

#[async_trait]
impl PosBackend for RestBackend {
    async fn list_active_products(&self, page: i64, page_size: i64) -> ClientResult<ProductPage> {
        self.products.list_active(page, page_size).await
    }

    async fn search_products_by_barcode(&self, code: &str) -> ClientResult<Vec<Product>> {
        self.products.search_by_barcode(code).await
    }

    async fn search_products_by_name(&self, text: &str) -> ClientResult<Vec<Product>> {
        self.products.search_by_name(text).await
    }

    async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        self.categories.list_active().await
    }

    async fn create_sale(&self, draft: &SaleDraft) -> ClientResult<SavedSale> {
        self.sales.create(draft).await
    }
}
