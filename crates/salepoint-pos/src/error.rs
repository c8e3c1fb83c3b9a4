//! # Session Error Type
//!
//! What a UI surface sees when an operation cannot complete. Both sources
//! are recoverable: the cart ledger is always left in its pre-operation
//! state, and no variant terminates the session.

use thiserror::Error;

use salepoint_client::ClientError;
use salepoint_core::CoreError;

/// Error surfaced by the POS session.
#[derive(Debug, Error)]
pub enum PosError {
    /// A cart business rule rejected the operation.
    #[error(transparent)]
    Cart(#[from] CoreError),

    /// The backend call failed (network or envelope failure).
    #[error(transparent)]
    Backend(#[from] ClientError),
}

/// Result type for session operations.
pub type PosResult<T> = Result<T, PosError>;
