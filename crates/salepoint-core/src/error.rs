//! # Error Types
//!
//! Domain-specific error types for salepoint-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  salepoint-core errors (this file)                                      │
//! │  └── CoreError       - Cart/business rule violations                    │
//! │                                                                         │
//! │  salepoint-client errors (separate crate)                               │
//! │  └── ClientError     - HTTP / backend envelope failures                 │
//! │                                                                         │
//! │  salepoint-pos errors (separate crate)                                  │
//! │  └── PosError        - What the UI surface sees                         │
//! │                                                                         │
//! │  Flow: CoreError ─┐                                                     │
//! │                   ├──► PosError ──► user-facing message                 │
//! │  ClientError ─────┘                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, counts, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. None of them is fatal:
/// every one degrades to a visible message while the cart ledger stays in its
/// pre-operation state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Requested cart quantity would exceed the last-known stock figure.
    ///
    /// ## When This Occurs
    /// - Adding a product whose in-cart quantity + requested quantity exceeds
    ///   stock
    /// - Increasing a line beyond the catalog's current stock count
    ///
    /// This is a soft client-side guard against the local stock snapshot,
    /// not a server-side reservation.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// The product has no line in the cart.
    #[error("Product {0} is not in the cart")]
    LineNotFound(i64),

    /// Cart has exceeded the maximum allowed number of lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds the maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Checkout was attempted with an empty cart.
    #[error("Cart is empty")]
    EmptyCart,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Feeding Bottle 250ml".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Feeding Bottle 250ml: available 3, requested 5"
        );

        let err = CoreError::LineNotFound(42);
        assert_eq!(err.to_string(), "Product 42 is not in the cart");
    }
}
