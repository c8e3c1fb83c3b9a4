//! # Checkout Coordinator
//!
//! Submits the current ledger as a sale and reconciles state afterward.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │        ┌──────┐   submit()   ┌─────────┐   success    ┌──────┐         │
//! │        │ Idle │─────────────►│ Placing │─────────────►│ Idle │         │
//! │        └──────┘              └─────────┘              └──────┘         │
//! │            ▲                      │                                     │
//! │            │       failure        │                                     │
//! │            └──────────────────────┘                                     │
//! │                                                                         │
//! │  Preconditions for entering Placing:                                    │
//! │    - ledger is non-empty                                                │
//! │    - not already Placing (re-entrant submissions are a no-op)          │
//! │                                                                         │
//! │  On success: receipt snapshot, clear ledger, reset payment method,     │
//! │              refresh catalog (server decremented stock)                 │
//! │  On failure: surface message, ledger INTACT, back to Idle              │
//! │                                                                         │
//! │  No automatic retry. No offline queue. No in-flight cancellation.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

use salepoint_core::{
    generate_invoice_no, Cart, CoreError, Money, PaymentMethod, SaleDraft,
};

use crate::backend::PosBackend;
use crate::catalog::CatalogCache;
use crate::error::PosResult;

// =============================================================================
// Receipt
// =============================================================================

/// One line on the printed receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

/// A formatted-receipt snapshot of the just-submitted ledger, taken before
/// the ledger is cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Backend id of the saved sale.
    pub sale_id: i64,
    pub invoice_no: String,
    pub payment_method: PaymentMethod,
    pub timestamp: DateTime<Utc>,
    pub lines: Vec<ReceiptLine>,
    pub subtotal_cents: i64,
    pub total_cents: i64,
}

/// Plain-text rendering for printing surfaces.
impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Invoice {}", self.invoice_no)?;
        writeln!(f, "{}", self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(f, "--------------------------------------")?;
        for line in &self.lines {
            writeln!(
                f,
                "{:<24} x{:<3} {:>8}",
                line.name,
                line.quantity,
                Money::from_cents(line.line_total_cents).to_string()
            )?;
        }
        writeln!(f, "--------------------------------------")?;
        writeln!(f, "TOTAL {:>32}", Money::from_cents(self.total_cents).to_string())?;
        write!(f, "Paid by {}", self.payment_method.as_str())
    }
}

// =============================================================================
// Checkout Coordinator
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckoutState {
    Idle,
    Placing,
}

/// Validates the cart, submits the sale, reconciles afterward.
#[derive(Debug)]
pub struct CheckoutCoordinator {
    state: CheckoutState,
    payment_method: PaymentMethod,
}

impl Default for CheckoutCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutCoordinator {
    pub fn new() -> Self {
        CheckoutCoordinator {
            state: CheckoutState::Idle,
            payment_method: PaymentMethod::default(),
        }
    }

    /// The payment method the next submission will carry.
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    /// Whether a submission is currently in flight.
    pub fn is_placing(&self) -> bool {
        self.state == CheckoutState::Placing
    }

    /// Submits the ledger as a sale.
    ///
    /// ## Returns
    /// - `Ok(Some(receipt))` - sale saved; ledger cleared, payment method
    ///   reset to the default, catalog refreshed
    /// - `Ok(None)` - a submission was already in flight; this one is a no-op
    /// - `Err(_)` - empty cart, or the backend rejected the sale; the ledger
    ///   is left intact so the cashier can retry or edit
    pub async fn submit<B: PosBackend + ?Sized>(
        &mut self,
        cart: &mut Cart,
        catalog: &mut CatalogCache,
        backend: &B,
    ) -> PosResult<Option<Receipt>> {
        // Re-entrant guard: blocked, not queued, not an error
        if self.state == CheckoutState::Placing {
            return Ok(None);
        }
        if cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        self.state = CheckoutState::Placing;

        let draft = SaleDraft {
            invoice_no: generate_invoice_no(),
            payment_method: self.payment_method,
            items: cart.sale_items(),
        };

        let saved = match backend.create_sale(&draft).await {
            Ok(saved) => saved,
            Err(err) => {
                warn!(invoice_no = %draft.invoice_no, error = %err, "sale submission failed");
                self.state = CheckoutState::Idle;
                return Err(err.into());
            }
        };

        // Snapshot the ledger for the printed receipt before clearing it
        let receipt = Receipt {
            sale_id: saved.id,
            invoice_no: draft.invoice_no.clone(),
            payment_method: self.payment_method,
            timestamp: Utc::now(),
            lines: cart
                .lines()
                .iter()
                .map(|l| ReceiptLine {
                    name: l.name.clone(),
                    quantity: l.quantity,
                    unit_price_cents: l.unit_price_cents,
                    line_total_cents: l.line_total_cents(),
                })
                .collect(),
            subtotal_cents: cart.subtotal_cents(),
            total_cents: cart.total_cents(),
        };

        info!(
            sale_id = saved.id,
            invoice_no = %draft.invoice_no,
            total = receipt.total_cents,
            lines = receipt.lines.len(),
            "sale completed"
        );

        cart.clear();
        self.payment_method = PaymentMethod::default();
        // The server decremented stock; make the next displayed counts match
        catalog.refresh(backend).await;
        self.state = CheckoutState::Idle;

        Ok(Some(receipt))
    }

    #[cfg(test)]
    fn force_placing(&mut self) {
        self.state = CheckoutState::Placing;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PosError;
    use crate::testutil::{product, FakeBackend};

    async fn primed(backend: &FakeBackend) -> (Cart, CatalogCache) {
        let mut catalog = CatalogCache::new();
        catalog.refresh(backend).await;
        (Cart::new(), catalog)
    }

    #[tokio::test]
    async fn test_successful_checkout_reconciles_state() {
        let backend = FakeBackend::with_products(vec![product(
            1,
            "Feeding Bottle 250ml",
            Some("8901000000001"),
            5,
        )]);
        let (mut cart, mut catalog) = primed(&backend).await;
        let p = catalog.find_by_id(1).unwrap().clone();
        cart.add_line(&p, 2).unwrap();

        let mut coordinator = CheckoutCoordinator::new();
        coordinator.set_payment_method(PaymentMethod::Card);

        let receipt = coordinator
            .submit(&mut cart, &mut catalog, &backend)
            .await
            .unwrap()
            .unwrap();

        // Payload mirrored the ledger: unit price 100.00 at 10% off = 90.00
        let drafts = backend.saved_drafts.lock().unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].payment_method, PaymentMethod::Card);
        assert_eq!(drafts[0].items.len(), 1);
        assert_eq!(drafts[0].items[0].product_id, 1);
        assert_eq!(drafts[0].items[0].quantity, 2);
        assert_eq!(drafts[0].items[0].unit_price_cents, 9_000);
        assert_eq!(drafts[0].items[0].discount_cents, 0);
        drop(drafts);

        // Receipt snapshots the pre-clear ledger
        assert_eq!(receipt.lines.len(), 1);
        assert_eq!(receipt.total_cents, 18_000);
        assert_eq!(receipt.payment_method, PaymentMethod::Card);

        // Ledger cleared, payment method reset, catalog reflects the
        // server-side decrement
        assert!(cart.is_empty());
        assert_eq!(coordinator.payment_method(), PaymentMethod::Cash);
        assert_eq!(catalog.stock_of(1), 3);
        assert!(!coordinator.is_placing());
    }

    #[tokio::test]
    async fn test_failed_checkout_preserves_ledger() {
        let mut backend = FakeBackend::with_products(vec![product(
            1,
            "Feeding Bottle 250ml",
            Some("8901000000001"),
            5,
        )]);
        backend.fail_sales = true;
        let (mut cart, mut catalog) = primed(&backend).await;
        let p = catalog.find_by_id(1).unwrap().clone();
        cart.add_line(&p, 2).unwrap();

        let mut coordinator = CheckoutCoordinator::new();
        let err = coordinator
            .submit(&mut cart, &mut catalog, &backend)
            .await
            .unwrap_err();

        assert!(matches!(err, PosError::Backend(_)));
        assert_eq!(err.to_string(), "Sale could not be saved");
        // Ledger intact for retry/edit, coordinator back to Idle
        assert_eq!(cart.line_count(), 1);
        assert!(!coordinator.is_placing());

        // Explicit retry succeeds once the backend recovers
        backend.fail_sales = false;
        let receipt = coordinator
            .submit(&mut cart, &mut catalog, &backend)
            .await
            .unwrap();
        assert!(receipt.is_some());
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected() {
        let backend = FakeBackend::with_products(vec![]);
        let (mut cart, mut catalog) = primed(&backend).await;

        let mut coordinator = CheckoutCoordinator::new();
        let err = coordinator
            .submit(&mut cart, &mut catalog, &backend)
            .await
            .unwrap_err();

        assert!(matches!(err, PosError::Cart(CoreError::EmptyCart)));
        assert!(backend.saved_drafts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reentrant_submission_is_a_noop() {
        let backend = FakeBackend::with_products(vec![product(1, "A", None, 5)]);
        let (mut cart, mut catalog) = primed(&backend).await;
        let p = catalog.find_by_id(1).unwrap().clone();
        cart.add_line(&p, 1).unwrap();

        let mut coordinator = CheckoutCoordinator::new();
        coordinator.force_placing();

        let outcome = coordinator
            .submit(&mut cart, &mut catalog, &backend)
            .await
            .unwrap();

        assert!(outcome.is_none());
        assert!(backend.saved_drafts.lock().unwrap().is_empty());
        assert_eq!(cart.line_count(), 1);
    }

    #[tokio::test]
    async fn test_receipt_rendering() {
        let backend = FakeBackend::with_products(vec![product(
            1,
            "Feeding Bottle 250ml",
            Some("8901000000001"),
            5,
        )]);
        let (mut cart, mut catalog) = primed(&backend).await;
        let p = catalog.find_by_id(1).unwrap().clone();
        cart.add_line(&p, 2).unwrap();

        let mut coordinator = CheckoutCoordinator::new();
        let receipt = coordinator
            .submit(&mut cart, &mut catalog, &backend)
            .await
            .unwrap()
            .unwrap();

        let text = receipt.to_string();
        assert!(text.contains(&receipt.invoice_no));
        assert!(text.contains("Feeding Bottle 250ml"));
        assert!(text.contains("x2"));
        assert!(text.contains("180.00"));
        assert!(text.contains("Paid by CASH"));
    }
}
