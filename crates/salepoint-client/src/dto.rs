//! Backend DTO shapes and the normalization adapter
//!
//! The backend is duck-typed: `barCode` vs `barcode`, numeric barcodes,
//! decimal prices, optional stock fields, nested category objects. ALL of
//! that tolerance lives here, in one place. The canonical
//! [`salepoint_core::Product`] stays strict; nothing outside this module
//! ever sees a raw DTO.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use salepoint_core::{Category, Product, SaleDraft, SavedSale};

// =============================================================================
// Decimal <-> Cents Conversion
// =============================================================================
// The backend speaks JSON decimals; the core speaks integer cents. These two
// functions are the only float/money crossings in the workspace.

/// Converts a backend decimal amount to integer cents, rounding half away
/// from zero (`99.995` -> `10000`).
pub fn cents_from_decimal(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Converts integer cents back to the backend's decimal representation.
pub fn decimal_from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Converts a percentage (0-100, possibly fractional) to basis points,
/// clamped to the valid 0-10000 range.
pub fn bps_from_percent(percent: f64) -> u32 {
    ((percent * 100.0).round().clamp(0.0, 10_000.0)) as u32
}

// =============================================================================
// Product DTO
// =============================================================================

/// Nested category reference as the product routes return it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRefDto {
    #[serde(default)]
    pub category_name: Option<String>,
}

/// A product as any backend route returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,

    #[serde(default)]
    pub product_name: Option<String>,

    /// Inconsistently named and typed upstream: `barCode` or `barcode`,
    /// string or number.
    #[serde(default, alias = "barcode")]
    pub bar_code: Option<serde_json::Value>,

    #[serde(default)]
    pub category_id: Option<i64>,

    #[serde(default)]
    pub category: Option<CategoryRefDto>,

    #[serde(default)]
    pub stock_qty: Option<i64>,

    #[serde(default)]
    pub selling_price: Option<f64>,

    #[serde(default)]
    pub discount_percentage: Option<f64>,

    #[serde(default)]
    pub min_stock_level: Option<i64>,

    #[serde(default)]
    pub is_active: Option<bool>,
}

impl ProductDto {
    /// Normalizes to the canonical product type.
    pub fn into_product(self) -> Product {
        Product {
            id: self.id,
            name: self.product_name.unwrap_or_default(),
            barcode: normalize_barcode(self.bar_code),
            category_id: self.category_id,
            category: self
                .category
                .and_then(|c| c.category_name)
                .unwrap_or_default(),
            stock_qty: self.stock_qty.unwrap_or(0),
            price_cents: cents_from_decimal(self.selling_price.unwrap_or(0.0)),
            discount_bps: bps_from_percent(self.discount_percentage.unwrap_or(0.0)),
            low_stock: self.min_stock_level.unwrap_or(0),
            is_active: self.is_active.unwrap_or(true),
        }
    }
}

/// Trims the raw barcode and maps empty/null to `None`. Numeric barcodes are
/// stringified (some rows were imported that way).
fn normalize_barcode(raw: Option<serde_json::Value>) -> Option<String> {
    let text = match raw? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// =============================================================================
// Paginated Response
// =============================================================================

/// The paginated wrapper inside `responseDto` for list routes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDto<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: i64,
    #[serde(default)]
    pub total_pages: i64,
    #[serde(default)]
    pub page_number: i64,
    #[serde(default)]
    pub page_size: i64,
}

// =============================================================================
// Category DTO
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: i64,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl CategoryDto {
    pub fn into_category(self) -> Category {
        Category {
            id: self.id,
            name: self.category_name.unwrap_or_default(),
            is_active: self.is_active.unwrap_or(true),
        }
    }
}

// =============================================================================
// Sale DTOs
// =============================================================================

/// One sale line in the save payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemRequestDto {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
    pub discount_amount: f64,
}

/// The `sales/save` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequestDto {
    pub invoice_no: String,
    pub payment_method: &'static str,
    pub total_amount: f64,
    pub items: Vec<SaleItemRequestDto>,
}

impl SaleRequestDto {
    /// Builds the wire payload from a checkout draft.
    pub fn from_draft(draft: &SaleDraft) -> Self {
        SaleRequestDto {
            invoice_no: draft.invoice_no.clone(),
            payment_method: draft.payment_method.as_str(),
            total_amount: decimal_from_cents(draft.total_cents()),
            items: draft
                .items
                .iter()
                .map(|i| SaleItemRequestDto {
                    product_id: i.product_id,
                    quantity: i.quantity,
                    unit_price: decimal_from_cents(i.unit_price_cents),
                    discount_amount: decimal_from_cents(i.discount_cents),
                })
                .collect(),
        }
    }
}

/// The saved sale as `sales/save` echoes it back.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSaleDto {
    pub id: i64,
    #[serde(default)]
    pub invoice_no: Option<String>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl SavedSaleDto {
    pub fn into_saved_sale(self) -> SavedSale {
        SavedSale {
            id: self.id,
            invoice_no: self.invoice_no.unwrap_or_default(),
            total_cents: cents_from_decimal(self.total_amount.unwrap_or(0.0)),
            created_at: self.created_at,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
