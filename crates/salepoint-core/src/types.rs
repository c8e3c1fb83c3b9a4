//! # Domain Types
//!
//! Core domain types used throughout Salepoint.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    SaleDraft    │   │    Category     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  invoice_no     │   │  id (i64)       │       │
//! │  │  barcode        │   │  payment_method │   │  name           │       │
//! │  │  price_cents    │   │  items          │   │  is_active      │       │
//! │  │  stock_qty      │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  Product is CANONICAL: every tolerated backend irregularity            │
//! │  (barCode/barcode, decimal prices, missing stock) is normalized        │
//! │  by the client crate's DTO adapter before a Product is constructed.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// `stock_qty` is authoritative on the server: it is only ever decremented by
/// the server as a side effect of a completed sale. This core reads it for
/// cart validation and never mutates it locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier assigned by the backend.
    pub id: i64,

    /// Display name shown to the cashier and on the receipt.
    pub name: String,

    /// Barcode (EAN-13, UPC-A, etc.). Trimmed; never `Some("")`.
    pub barcode: Option<String>,

    /// Category reference.
    pub category_id: Option<i64>,

    /// Category display name (denormalized by the backend).
    pub category: String,

    /// Current stock count, last known from the server.
    pub stock_qty: i64,

    /// Unit sale price in cents, before discount.
    pub price_cents: i64,

    /// Discount in basis points (1000 = 10%), applied to the unit price.
    pub discount_bps: u32,

    /// Threshold at or below which the product counts as low-stock.
    pub low_stock: i64,

    /// Whether the product is active (soft delete on the backend).
    pub is_active: bool,
}

impl Product {
    /// Returns the list price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Unit price after the product's percentage discount, rounded half-up
    /// to the cent. This is the price a cart line freezes at add-time.
    #[inline]
    pub fn final_unit_price(&self) -> Money {
        self.price().discounted_by_bps(self.discount_bps)
    }

    /// Whether the product is at or below its low-stock threshold.
    /// Display-only in this core.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock_qty <= self.low_stock
    }

    /// Case-insensitive name match against a query substring.
    pub fn name_contains(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }

    /// Exact barcode match against a trimmed query.
    pub fn barcode_equals(&self, query: &str) -> bool {
        self.barcode.as_deref() == Some(query.trim())
    }
}

// =============================================================================
// Category
// =============================================================================

/// A product category, used by the category-browse view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer pays for a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on an external terminal.
    Card,
    /// Mobile wallet payment.
    Mobile,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl PaymentMethod {
    /// Wire name used by the sales backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Card => "CARD",
            PaymentMethod::Mobile => "MOBILE",
        }
    }
}

// =============================================================================
// Sale Draft
// =============================================================================

/// One line of a sale submission.
///
/// `unit_price_cents` is the discounted price frozen on the cart line;
/// `discount_cents` is therefore zero (the discount is already folded into
/// the unit price, matching the backend's expectations).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub discount_cents: i64,
}

/// A sale ready for submission, built from the full cart ledger at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDraft {
    pub invoice_no: String,
    pub payment_method: PaymentMethod,
    pub items: Vec<SaleItem>,
}

impl SaleDraft {
    /// Total of all line amounts in cents.
    pub fn total_cents(&self) -> i64 {
        self.items
            .iter()
            .map(|i| i.unit_price_cents * i.quantity)
            .sum()
    }
}

/// A sale as echoed back by the backend after a successful save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSale {
    pub id: i64,
    pub invoice_no: String,
    pub total_cents: i64,
    pub created_at: Option<DateTime<Utc>>,
}

/// Generates a client-side invoice number: current date plus a time-based
/// suffix. Not guaranteed globally unique, but practically unique per
/// session tick; the backend id is the real identity of the saved sale.
pub fn generate_invoice_no() -> String {
    let now = Utc::now();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    format!("INV-{}-{:04}", now.format("%Y%m%d"), nanos % 10_000)
}

// =============================================================================
// Unit Tests
// =============================================================================
