use murti_core::{ProductId, StockStatus};
use serde_json::Value;
use tracing::instrument;

use super::envelope::{ApiResponse, handle_response};
use super::page::{Page, into_page};
use super::query::QueryParams;
use crate::api::Body;
use crate::error::ApiError;
use crate::types::{InventoryAdjustment, InventoryItem, InventoryQuery, StockMovement};

service! {
    /// Stock overview, adjustments and the movement log.
    InventoryService
}

impl InventoryService {
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn overview(&self, query: &InventoryQuery) -> Result<Page<InventoryItem>, ApiError> {
        let path = QueryParams::new()
            .opt("page", query.page)
            .opt("limit", query.limit)
            .opt("search", query.search.as_deref())
            .opt("category", query.category.as_ref())
            .opt("stockStatus", query.stock_status.as_ref().map(StockStatus::as_str))
            .apply("/inventory");

        let response: ApiResponse<Value> = self.client.get(&path).await?;
        into_page(handle_response(response)?, "products")
    }

    /// Products at or below `threshold` (the backend's default when unset).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn low_stock(&self, threshold: Option<u32>) -> Result<Vec<InventoryItem>, ApiError> {
        let path = QueryParams::new()
            .opt("threshold", threshold)
            .apply("/inventory/low-stock");

        let response: ApiResponse<Value> = self.client.get(&path).await?;
        Ok(into_page(handle_response(response)?, "products")?.items)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(product_id = %adjustment.product_id))]
    pub async fn adjust(&self, adjustment: &InventoryAdjustment) -> Result<InventoryItem, ApiError> {
        let response: ApiResponse<InventoryItem> = self
            .client
            .post("/inventory/adjust", Some(Body::json(adjustment)?))
            .await?;
        handle_response(response)
    }

    /// Stock movements, newest first, optionally for a single product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn movements(
        &self,
        product_id: Option<&ProductId>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Page<StockMovement>, ApiError> {
        let path = QueryParams::new()
            .opt("productId", product_id)
            .opt("page", page)
            .opt("limit", limit)
            .apply("/inventory/movements");

        let response: ApiResponse<Value> = self.client.get(&path).await?;
        into_page(handle_response(response)?, "movements")
    }
}
