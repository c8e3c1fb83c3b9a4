//! Category API
//!
//! Routes:
//! - `GET productCategory/getAll`
//!
//! The backend returns every category; filtering to active rows happens
//! client-side, matching the category-browse view's contract.

use salepoint_core::Category;

use crate::dto::CategoryDto;
use crate::error::ClientResult;
use crate::http::HttpClient;

/// Client surface for the category routes.
#[derive(Debug, Clone)]
pub struct CategoryApi {
    http: HttpClient,
}

impl CategoryApi {
    pub fn new(http: HttpClient) -> Self {
        CategoryApi { http }
    }

    /// Fetches all categories and keeps only the active ones.
    pub async fn list_active(&self) -> ClientResult<Vec<Category>> {
        let dtos: Vec<CategoryDto> = self.http.get("productCategory/getAll", &[]).await?;
        Ok(dtos
            .into_iter()
            .map(CategoryDto::into_category)
            .filter(|c| c.is_active)
            .collect())
    }
}
