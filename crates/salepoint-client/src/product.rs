//! Product API - all catalog data from the backend
//!
//! Routes:
//! - `GET product/getAllPaginated?pageNumber&pageSize&isActive=true`
//! - `GET product/search?barCode=…` / `?productName=…` (active only)
//! - `GET product/getById?id=…`

use tracing::debug;

use salepoint_core::Product;

use crate::dto::{PageDto, ProductDto};
use crate::error::ClientResult;
use crate::http::HttpClient;

/// One page of active products.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub total_count: i64,
}

/// Client surface for the product routes.
#[derive(Debug, Clone)]
pub struct ProductApi {
    http: HttpClient,
}

impl ProductApi {
    pub fn new(http: HttpClient) -> Self {
        ProductApi { http }
    }

    /// Fetches one page of active products.
    pub async fn list_active(&self, page: i64, page_size: i64) -> ClientResult<ProductPage> {
        let page_dto: PageDto<ProductDto> = self
            .http
            .get(
                "product/getAllPaginated",
                &[
                    ("pageNumber", page.to_string()),
                    ("pageSize", page_size.to_string()),
                    ("isActive", "true".to_string()),
                ],
            )
            .await?;

        debug!(
            fetched = page_dto.content.len(),
            total = page_dto.total_elements,
            "listed active products"
        );

        Ok(ProductPage {
            items: page_dto
                .content
                .into_iter()
                .map(ProductDto::into_product)
                .collect(),
            total_count: page_dto.total_elements,
        })
    }

    /// Searches active products by exact barcode.
    pub async fn search_by_barcode(&self, code: &str) -> ClientResult<Vec<Product>> {
        self.search(&[
            ("barCode", code.trim().to_string()),
            ("isActive", "true".to_string()),
        ])
        .await
    }

    /// Searches active products by name.
    pub async fn search_by_name(&self, text: &str) -> ClientResult<Vec<Product>> {
        self.search(&[
            ("productName", text.trim().to_string()),
            ("isActive", "true".to_string()),
        ])
        .await
    }

    async fn search(&self, query: &[(&str, String)]) -> ClientResult<Vec<Product>> {
        let dtos: Vec<ProductDto> = self.http.get("product/search", query).await?;
        Ok(dtos.into_iter().map(ProductDto::into_product).collect())
    }

    /// Fetches a single product by backend id.
    pub async fn get_by_id(&self, id: i64) -> ClientResult<Product> {
        let dto: ProductDto = self
            .http
            .get("product/getById", &[("id", id.to_string())])
            .await?;
        Ok(dto.into_product())
    }
}
