//! # Cart Ledger
//!
//! The authoritative in-memory representation of the current, not-yet-submitted
//! sale. Session-scoped and never persisted: losing the ledger on process exit
//! is accepted behavior, not a bug.
//!
//! ## Invariants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Ledger Invariants                             │
//! │                                                                         │
//! │  1. At most one line per product (repeat adds merge into the line)     │
//! │  2. Line quantity is always > 0 (reduced-to-zero lines are removed)    │
//! │  3. line_total is DERIVED (unit price × quantity), never stored        │
//! │  4. Quantity never exceeds the product's last-known stock at the       │
//! │     moment of mutation (soft guard against the local snapshot)         │
//! │  5. Unit price is frozen at add-time; later catalog price changes      │
//! │     do not retroactively reprice lines in this session                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, SaleItem};
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One product's aggregated quantity/price within the ledger.
///
/// ## Design Notes
/// - `name` and `barcode` are denormalized snapshots taken at add-time so the
///   cart displays consistent data even if the catalog refreshes mid-session.
/// - `unit_price_cents` is the post-discount price, computed once when the
///   line is created and frozen from then on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: i64,
    pub name: String,
    pub barcode: Option<String>,
    /// Unit price after discount, in cents (frozen at add-time).
    pub unit_price_cents: i64,
    /// Always positive; a line at zero is removed from the ledger instead.
    pub quantity: i64,
}

impl CartLine {
    fn from_product(product: &Product, quantity: i64) -> Self {
        CartLine {
            product_id: product.id,
            name: product.name.clone(),
            barcode: product.barcode.clone(),
            unit_price_cents: product.final_unit_price().cents(),
            quantity,
        }
    }

    /// The line total, always `unit_price × quantity`. Derived on demand so
    /// it can never drift from the invariant.
    #[inline]
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }

    /// Line total as Money, for display.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents())
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The cart ledger: an ordered collection of lines keyed by product id.
///
/// The ledger is the single source of truth for the in-progress sale; no
/// other component holds a competing copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Read access to the lines, in insertion order.
    #[inline]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Quantity currently in the cart for a product (0 when absent).
    pub fn quantity_of(&self, product_id: i64) -> i64 {
        self.lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    /// Adds a product to the cart, merging into an existing line when present.
    ///
    /// ## Stock Guard
    /// The in-cart quantity plus `quantity` must not exceed the product's
    /// last-known stock. On rejection the ledger is left unchanged.
    ///
    /// ## Errors
    /// - [`CoreError::InsufficientStock`] when the guard trips
    /// - [`CoreError::QuantityTooLarge`] / [`CoreError::CartTooLarge`] at the
    ///   runaway-cart caps
    pub fn add_line(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        let in_cart = self.quantity_of(product.id);
        // Saturating: an absurd quantity lands on the caps below instead of
        // overflowing
        let requested = in_cart.saturating_add(quantity);

        if requested > product.stock_qty {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock_qty,
                requested,
            });
        }

        if requested > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested,
                max: MAX_LINE_QUANTITY,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = requested;
            return Ok(());
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.lines.push(CartLine::from_product(product, quantity));
        Ok(())
    }

    /// Adjusts a line's quantity by a signed delta.
    ///
    /// ## Behavior
    /// - New quantity is `max(0, current + delta)`; at zero the line is removed
    /// - For increases, `current_stock` is the stock figure re-read from the
    ///   catalog cache by the caller (NOT the snapshot on the line); the guard
    ///   rejects increases past it
    /// - Decreases never consult stock
    pub fn update_quantity(
        &mut self,
        product_id: i64,
        delta: i64,
        current_stock: i64,
    ) -> CoreResult<()> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id)
            .ok_or(CoreError::LineNotFound(product_id))?;

        let new_quantity = line.quantity.saturating_add(delta).max(0);

        if delta > 0 {
            if new_quantity > current_stock {
                return Err(CoreError::InsufficientStock {
                    name: line.name.clone(),
                    available: current_stock,
                    requested: new_quantity,
                });
            }
            if new_quantity > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_quantity,
                    max: MAX_LINE_QUANTITY,
                });
            }
        }

        if new_quantity == 0 {
            self.lines.retain(|l| l.product_id != product_id);
        } else {
            line.quantity = new_quantity;
        }

        Ok(())
    }

    /// Removes a product's line unconditionally. Removing an absent line is
    /// a no-op.
    pub fn remove_line(&mut self, product_id: i64) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Empties the ledger. Used after a successful checkout.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of all line totals in cents.
    pub fn subtotal_cents(&self) -> i64 {
        self.lines.iter().map(|l| l.line_total_cents()).sum()
    }

    /// Grand total in cents. Currently equals the subtotal: no tax or
    /// additional-charge composition in this core.
    #[inline]
    pub fn total_cents(&self) -> i64 {
        self.subtotal_cents()
    }

    /// Grand total as Money, for display.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents())
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Checks if the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Builds the sale items for submission, one per ledger line. The
    /// discount is already folded into the frozen unit price, so
    /// `discount_cents` is zero.
    pub fn sale_items(&self) -> Vec<SaleItem> {
        self.lines
            .iter()
            .map(|l| SaleItem {
                product_id: l.product_id,
                quantity: l.quantity,
                unit_price_cents: l.unit_price_cents,
                discount_cents: 0,
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
