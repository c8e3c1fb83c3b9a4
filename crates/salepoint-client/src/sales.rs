//! Sales API
//!
//! Routes:
//! - `POST sales/save`
//!
//! Saving a sale decrements stock on the server as a side effect; the caller
//! is expected to refresh its catalog snapshot afterwards.

use tracing::info;

use salepoint_core::{SaleDraft, SavedSale};

use crate::dto::{SaleRequestDto, SavedSaleDto};
use crate::error::ClientResult;
use crate::http::HttpClient;

/// Client surface for the sales routes.
#[derive(Debug, Clone)]
pub struct SalesApi {
    http: HttpClient,
}

impl SalesApi {
    pub fn new(http: HttpClient) -> Self {
        SalesApi { http }
    }

    /// Submits a sale built from the full cart ledger.
    pub async fn create(&self, draft: &SaleDraft) -> ClientResult<SavedSale> {
        let payload = SaleRequestDto::from_draft(draft);
        let dto: SavedSaleDto = self.http.post("sales/save", &payload).await?;
        let saved = dto.into_saved_sale();

        info!(
            sale_id = saved.id,
            invoice_no = %draft.invoice_no,
            items = draft.items.len(),
            "sale saved"
        );

        Ok(saved)
    }
}
