//! # salepoint-pos: The POS Session Core
//!
//! Everything between "cashier scanned something" and "sale saved on the
//! backend" lives in this crate:
//!
//! - [`catalog::CatalogCache`] - locally held snapshot of active products
//! - [`categories::CategoryIndex`] - active categories for the browse view
//! - [`resolver`] - scan/search query -> zero or one product
//! - [`checkout::CheckoutCoordinator`] - submits the ledger as a sale
//! - [`session::PosSession`] - ties the pieces together for a UI surface
//!
//! ## Concurrency Model
//! Single-threaded, cooperative, event-driven: the owning surface drives one
//! operation at a time and awaits every network call before the next
//! dependent step. No background task mutates the cart; the catalog cache is
//! eventually consistent with the server and refreshed wholesale rather than
//! patched incrementally. Two concurrent sessions against the same backend
//! can independently oversell stock - the client-side guard only consults
//! its own snapshot, by design.
//!
//! ## Failure Model
//! No error here is fatal. Catalog/category refresh failures degrade to an
//! empty cache and a log line; resolver and checkout failures surface a
//! message while the cart ledger stays exactly as it was.

pub mod backend;
pub mod catalog;
pub mod categories;
pub mod checkout;
pub mod error;
pub mod resolver;
pub mod session;

pub use backend::{PosBackend, RestBackend};
pub use catalog::{CatalogCache, CATALOG_PAGE_SIZE};
pub use categories::CategoryIndex;
pub use checkout::{CheckoutCoordinator, Receipt, ReceiptLine};
pub use error::{PosError, PosResult};
pub use session::{Notice, PosSession};

#[cfg(test)]
pub(crate) mod testutil;
