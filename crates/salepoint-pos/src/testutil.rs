//! Shared test fixtures: an in-memory backend and product builders.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use salepoint_client::{ClientError, ClientResult, ProductPage};
use salepoint_core::{Category, Product, SaleDraft, SavedSale};

use crate::backend::PosBackend;

/// In-memory stand-in for the REST backend. Stock decrements on
/// `create_sale` the way the real server does.
#[derive(Default)]
pub struct FakeBackend {
    pub products: Mutex<Vec<Product>>,
    pub categories: Vec<Category>,
    pub fail_products: bool,
    pub fail_categories: bool,
    pub fail_sales: bool,
    pub remote_search_calls: AtomicUsize,
    pub saved_drafts: Mutex<Vec<SaleDraft>>,
}

impl FakeBackend {
    pub fn with_products(products: Vec<Product>) -> Self {
        FakeBackend {
            products: Mutex::new(products),
            ..Default::default()
        }
    }

    pub fn remote_searches(&self) -> usize {
        self.remote_search_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PosBackend for FakeBackend {
    async fn list_active_products(&self, _page: i64, _page_size: i64) -> ClientResult<ProductPage> {
        if self.fail_products {
            return Err(ClientError::Backend("catalog unavailable".to_string()));
        }
        let items: Vec<Product> = self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.is_active)
            .cloned()
            .collect();
        let total_count = items.len() as i64;
        Ok(ProductPage { items, total_count })
    }

    async fn search_products_by_barcode(&self, code: &str) -> ClientResult<Vec<Product>> {
        self.remote_search_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.is_active && p.barcode_equals(code))
            .cloned()
            .collect())
    }

    async fn search_products_by_name(&self, text: &str) -> ClientResult<Vec<Product>> {
        self.remote_search_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.is_active && p.name_contains(text))
            .cloned()
            .collect())
    }

    async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        if self.fail_categories {
            return Err(ClientError::Backend("categories unavailable".to_string()));
        }
        Ok(self.categories.clone())
    }

    async fn create_sale(&self, draft: &SaleDraft) -> ClientResult<SavedSale> {
        if self.fail_sales {
            return Err(ClientError::Backend("Sale could not be saved".to_string()));
        }

        // Server-side stock decrement per line item
        let mut products = self.products.lock().unwrap();
        for item in &draft.items {
            if let Some(p) = products.iter_mut().find(|p| p.id == item.product_id) {
                p.stock_qty -= item.quantity;
            }
        }

        self.saved_drafts.lock().unwrap().push(draft.clone());
        Ok(SavedSale {
            id: self.saved_drafts.lock().unwrap().len() as i64,
            invoice_no: draft.invoice_no.clone(),
            total_cents: draft.total_cents(),
            created_at: None,
        })
    }
}

/// Product fixture with sensible defaults.
pub fn product(id: i64, name: &str, barcode: Option<&str>, stock_qty: i64) -> Product {
    Product {
        id,
        name: name.to_string(),
        barcode: barcode.map(|b| b.to_string()),
        category_id: Some(1),
        category: "Toys".to_string(),
        stock_qty,
        price_cents: 10_000,
        discount_bps: 1_000,
        low_stock: 2,
        is_active: true,
    }
}
