use serde_json::Value;
use tracing::instrument;

use super::envelope::{ApiResponse, handle_response};
use super::page::into_page;
use super::query::QueryParams;
use crate::error::ApiError;
use crate::types::{CustomerReport, InventoryReport, ReportRange, SalesReport, TopProduct};

service! {
    /// Analytics for the reports screen.
    ReportService
}

fn range_params(range: &ReportRange) -> QueryParams {
    QueryParams::new()
        .opt("startDate", range.start_date)
        .opt("endDate", range.end_date)
        .opt("groupBy", range.group_by)
}

impl ReportService {
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn sales(&self, range: &ReportRange) -> Result<SalesReport, ApiError> {
        let path = range_params(range).apply("/reports/sales");
        let response: ApiResponse<SalesReport> = self.client.get(&path).await?;
        handle_response(response)
    }

    /// Best sellers by units sold.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn top_products(
        &self,
        range: &ReportRange,
        limit: Option<u32>,
    ) -> Result<Vec<TopProduct>, ApiError> {
        let path = range_params(range)
            .opt("limit", limit)
            .apply("/reports/products/top");
        let response: ApiResponse<Value> = self.client.get(&path).await?;
        Ok(into_page(handle_response(response)?, "products")?.items)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn inventory(&self) -> Result<InventoryReport, ApiError> {
        let response: ApiResponse<InventoryReport> = self.client.get("/reports/inventory").await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn customers(&self, range: &ReportRange) -> Result<CustomerReport, ApiError> {
        let path = range_params(range).apply("/reports/customers");
        let response: ApiResponse<CustomerReport> = self.client.get(&path).await?;
        handle_response(response)
    }
}
