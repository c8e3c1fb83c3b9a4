//! # POS Session
//!
//! The facade a UI surface drives. Owns the cart ledger, both caches, and
//! the checkout coordinator; every entry point returns either a [`Notice`]
//! (something to show the cashier) or a [`PosError`] (something went wrong
//! underneath).
//!
//! ## Why
//! "Insufficient stock" and "no product found" are everyday outcomes at a
//! till, not failures. Modeling them as a `Notice` value keeps the `?`
//! operator reserved for the cases where the backend actually misbehaved.

use std::fmt;

use tracing::info;

use salepoint_core::{Cart, Category, CoreError, PaymentMethod, Product};

use crate::backend::PosBackend;
use crate::catalog::CatalogCache;
use crate::categories::CategoryIndex;
use crate::checkout::{CheckoutCoordinator, Receipt};
use crate::error::{PosError, PosResult};
use crate::resolver;

// =============================================================================
// Notice
// =============================================================================

/// A user-facing outcome of a session operation. Transient, never persisted.
#[derive(Debug, Clone)]
pub enum Notice {
    /// A product landed in (or merged into) the ledger.
    Added { name: String, quantity: i64 },
    /// A line's quantity changed without hitting zero.
    QuantityChanged { name: String, quantity: i64 },
    /// A line left the ledger.
    Removed { name: String },
    /// No strategy resolved the query to a product.
    NotFound { query: String },
    /// The ledger would exceed last-known stock.
    InsufficientStock { name: String, available: i64 },
    /// The ledger is at its line cap.
    CartFull { max: usize },
    /// A single line would exceed the per-line quantity cap.
    QuantityCapped { max: i64 },
    /// The targeted line is not in the ledger.
    LineMissing,
    /// The whole ledger was discarded.
    CartCleared,
    /// Checkout was requested on an empty ledger.
    NothingToCheckout,
    /// A submission is already in flight.
    CheckoutAlreadyRunning,
    /// The sale saved; the receipt is ready to print.
    SaleCompleted(Receipt),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Added { name, quantity } => write!(f, "Added {} (x{})", name, quantity),
            Notice::QuantityChanged { name, quantity } => {
                write!(f, "{} now x{}", name, quantity)
            }
            Notice::Removed { name } => write!(f, "Removed {}", name),
            Notice::NotFound { query } => write!(f, "No product found for '{}'", query),
            Notice::InsufficientStock { name, available } => {
                write!(f, "Insufficient stock for {}: only {} available", name, available)
            }
            Notice::CartFull { max } => write!(f, "Cart is full ({} lines max)", max),
            Notice::QuantityCapped { max } => {
                write!(f, "Quantity limit is {} per line", max)
            }
            Notice::LineMissing => write!(f, "That item is not in the cart"),
            Notice::CartCleared => write!(f, "Cart cleared"),
            Notice::NothingToCheckout => write!(f, "Cart is empty"),
            Notice::CheckoutAlreadyRunning => write!(f, "Checkout already in progress"),
            Notice::SaleCompleted(receipt) => {
                write!(f, "Sale saved as {}", receipt.invoice_no)
            }
        }
    }
}

/// Ledger-rule violations read as notices, not errors.
fn notice_from_core(err: CoreError) -> Notice {
    match err {
        CoreError::InsufficientStock { name, available, .. } => {
            Notice::InsufficientStock { name, available }
        }
        CoreError::CartTooLarge { max } => Notice::CartFull { max },
        CoreError::QuantityTooLarge { max, .. } => Notice::QuantityCapped { max },
        CoreError::LineNotFound(_) => Notice::LineMissing,
        CoreError::EmptyCart => Notice::NothingToCheckout,
    }
}

// =============================================================================
// POS Session
// =============================================================================

/// One cashier-facing session: cart + caches + coordinator over a backend.
pub struct PosSession<B: PosBackend> {
    backend: B,
    cart: Cart,
    catalog: CatalogCache,
    categories: CategoryIndex,
    coordinator: CheckoutCoordinator,
}

impl<B: PosBackend> PosSession<B> {
    pub fn new(backend: B) -> Self {
        PosSession {
            backend,
            cart: Cart::new(),
            catalog: CatalogCache::new(),
            categories: CategoryIndex::new(),
            coordinator: CheckoutCoordinator::new(),
        }
    }

    /// Session with a non-default catalog fetch page size.
    pub fn with_catalog_page_size(backend: B, page_size: i64) -> Self {
        let mut session = PosSession::new(backend);
        session.catalog = CatalogCache::with_page_size(page_size);
        session
    }

    /// Primes both caches. Refresh failures degrade to empty caches, so
    /// this never errors.
    pub async fn start(&mut self) {
        self.catalog.refresh(&self.backend).await;
        self.categories.refresh(&self.backend).await;
        info!(
            products = self.catalog.len(),
            categories = self.categories.len(),
            "session started"
        );
    }

    // -------------------------------------------------------------------------
    // Cart mutations
    // -------------------------------------------------------------------------

    /// Resolves a scan/search query and adds one unit of the hit.
    pub async fn scan(&mut self, query: &str) -> PosResult<Notice> {
        let resolved = resolver::resolve(query, &mut self.catalog, &self.backend).await?;
        let Some(found) = resolved else {
            return Ok(Notice::NotFound {
                query: query.trim().to_string(),
            });
        };
        Ok(self.add_resolved(&found, 1))
    }

    /// Adds one unit of an already-displayed product (e.g. tapped from the
    /// catalog grid). Cache-only; an unknown id is a `NotFound` notice.
    pub fn add_product(&mut self, product_id: i64) -> Notice {
        let Some(found) = self.catalog.find_by_id(product_id).cloned() else {
            return Notice::NotFound {
                query: product_id.to_string(),
            };
        };
        self.add_resolved(&found, 1)
    }

    fn add_resolved(&mut self, product: &Product, quantity: i64) -> Notice {
        match self.cart.add_line(product, quantity) {
            Ok(()) => Notice::Added {
                name: product.name.clone(),
                quantity: self.cart.quantity_of(product.id),
            },
            Err(err) => notice_from_core(err),
        }
    }

    /// Adjusts a line by `delta` (negative to decrease). Reaching zero
    /// removes the line.
    pub fn update_quantity(&mut self, product_id: i64, delta: i64) -> Notice {
        let Some(name) = self
            .cart
            .lines()
            .iter()
            .find(|l| l.product_id == product_id)
            .map(|l| l.name.clone())
        else {
            return Notice::LineMissing;
        };

        let stock = self.catalog.stock_of(product_id);
        match self.cart.update_quantity(product_id, delta, stock) {
            Ok(()) => {
                let quantity = self.cart.quantity_of(product_id);
                if quantity == 0 {
                    Notice::Removed { name }
                } else {
                    Notice::QuantityChanged { name, quantity }
                }
            }
            Err(err) => notice_from_core(err),
        }
    }

    /// Drops a line outright.
    pub fn remove_line(&mut self, product_id: i64) -> Notice {
        let Some(name) = self
            .cart
            .lines()
            .iter()
            .find(|l| l.product_id == product_id)
            .map(|l| l.name.clone())
        else {
            return Notice::LineMissing;
        };
        self.cart.remove_line(product_id);
        Notice::Removed { name }
    }

    pub fn clear_cart(&mut self) -> Notice {
        self.cart.clear();
        Notice::CartCleared
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    pub fn payment_method(&self) -> PaymentMethod {
        self.coordinator.payment_method()
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.coordinator.set_payment_method(method);
    }

    /// Submits the ledger. Empty-cart and re-entrant attempts come back as
    /// notices; a backend rejection propagates as an error with the ledger
    /// intact.
    pub async fn checkout(&mut self) -> PosResult<Notice> {
        match self
            .coordinator
            .submit(&mut self.cart, &mut self.catalog, &self.backend)
            .await
        {
            Ok(Some(receipt)) => Ok(Notice::SaleCompleted(receipt)),
            Ok(None) => Ok(Notice::CheckoutAlreadyRunning),
            Err(PosError::Cart(CoreError::EmptyCart)) => Ok(Notice::NothingToCheckout),
            Err(err) => Err(err),
        }
    }

    // -------------------------------------------------------------------------
    // Read accessors for the UI layer
    // -------------------------------------------------------------------------

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn catalog(&self) -> &CatalogCache {
        &self.catalog
    }

    pub fn categories(&self) -> &[Category] {
        self.categories.categories()
    }

    pub fn find_categories(&self, text: &str) -> Vec<&Category> {
        self.categories.find_by_name_contains(text)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
