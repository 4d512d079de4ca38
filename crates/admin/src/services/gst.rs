use chrono::NaiveDate;
use serde_json::Value;
use tracing::instrument;

use super::envelope::{ApiResponse, handle_response};
use super::page::into_page;
use super::query::QueryParams;
use crate::api::Body;
use crate::error::ApiError;
use crate::types::{GstBreakdown, GstCalculationRequest, GstRate, GstReport, GstSettings};

service! {
    /// GST registration, slabs, calculation and returns data.
    GstService
}

impl GstService {
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn settings(&self) -> Result<GstSettings, ApiError> {
        let response: ApiResponse<GstSettings> = self.client.get("/gst/settings").await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip_all)]
    pub async fn update_settings(&self, settings: &GstSettings) -> Result<GstSettings, ApiError> {
        let response: ApiResponse<GstSettings> = self
            .client
            .put("/gst/settings", Some(Body::json(settings)?))
            .await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn rates(&self) -> Result<Vec<GstRate>, ApiError> {
        let response: ApiResponse<Value> = self.client.get("/gst/rates").await?;
        Ok(into_page(handle_response(response)?, "rates")?.items)
    }

    /// Split an amount into CGST/SGST or IGST.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn calculate(&self, request: &GstCalculationRequest) -> Result<GstBreakdown, ApiError> {
        let response: ApiResponse<GstBreakdown> = self
            .client
            .post("/gst/calculate", Some(Body::json(request)?))
            .await?;
        handle_response(response)
    }

    /// Tax collected between two dates, inclusive.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn report(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<GstReport, ApiError> {
        let path = QueryParams::new()
            .opt("startDate", from)
            .opt("endDate", to)
            .apply("/gst/reports");
        let response: ApiResponse<GstReport> = self.client.get(&path).await?;
        handle_response(response)
    }
}
