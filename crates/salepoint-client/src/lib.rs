//! Salepoint Client - HTTP client for the remote POS backend
//!
//! Provides network-based HTTP calls to the Product, Category and Sales APIs.
//!
//! Every response travels in the backend's uniform envelope
//! `{ status, errorCode, errorDescription, responseDto }`; decoding and
//! failure mapping happen once, in [`http::HttpClient`]. Backend DTO
//! irregularities are absorbed once, in [`dto`]. The rest of the workspace
//! only ever sees canonical `salepoint-core` types.

pub mod category;
pub mod config;
pub mod dto;
pub mod error;
pub mod http;
pub mod product;
pub mod sales;
pub mod session;

pub use category::CategoryApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use product::{ProductApi, ProductPage};
pub use sales::SalesApi;
pub use session::Session;
