//! Invoices and estimates.

use murti_core::{EstimateId, InvoiceId, InvoiceStatus, OrderId};
use serde_json::Value;
use tracing::instrument;

use super::envelope::{ApiResponse, handle_empty_response, handle_response};
use super::page::{Page, into_page};
use super::query::{QueryParams, segment};
use crate::api::Body;
use crate::error::ApiError;
use crate::types::{
    Estimate, EstimateInput, EstimateQuery, Invoice, InvoiceQuery, InvoiceStatusUpdate,
};

service! {
    /// Tax invoices generated from orders, and estimates that convert into them.
    InvoiceService
}

fn invoice_path(id: &InvoiceId) -> String {
    format!("/invoices/{}", segment(id.as_str()))
}

fn estimate_path(id: &EstimateId) -> String {
    format!("/invoices/estimates/{}", segment(id.as_str()))
}

impl InvoiceService {
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &InvoiceQuery) -> Result<Page<Invoice>, ApiError> {
        let path = QueryParams::new()
            .opt("page", query.page)
            .opt("limit", query.limit)
            .opt("search", query.search.as_deref())
            .opt("status", query.status)
            .opt("startDate", query.start_date)
            .opt("endDate", query.end_date)
            .apply("/invoices");

        let response: ApiResponse<Value> = self.client.get(&path).await?;
        into_page(handle_response(response)?, "invoices")
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(invoice_id = %id))]
    pub async fn get(&self, id: &InvoiceId) -> Result<Invoice, ApiError> {
        let response: ApiResponse<Invoice> = self.client.get(&invoice_path(id)).await?;
        handle_response(response)
    }

    /// Issue the invoice for an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn generate_for_order(&self, order_id: &OrderId) -> Result<Invoice, ApiError> {
        let path = format!("/invoices/generate/{}", segment(order_id.as_str()));
        let response: ApiResponse<Invoice> = self.client.post(&path, None).await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(invoice_id = %id, status = %status))]
    pub async fn update_status(&self, id: &InvoiceId, status: InvoiceStatus) -> Result<Invoice, ApiError> {
        let path = format!("{}/status", invoice_path(id));
        let body = Body::json(&InvoiceStatusUpdate { status })?;
        let response: ApiResponse<Invoice> = self.client.patch(&path, Some(body)).await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(invoice_id = %id))]
    pub async fn delete(&self, id: &InvoiceId) -> Result<(), ApiError> {
        let response: ApiResponse<Value> = self.client.delete(&invoice_path(id)).await?;
        handle_empty_response(response)
    }

    // =========================================================================
    // Estimates
    // =========================================================================

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn list_estimates(&self, query: &EstimateQuery) -> Result<Page<Estimate>, ApiError> {
        let path = QueryParams::new()
            .opt("page", query.page)
            .opt("limit", query.limit)
            .opt("search", query.search.as_deref())
            .opt("status", query.status)
            .apply("/invoices/estimates");

        let response: ApiResponse<Value> = self.client.get(&path).await?;
        into_page(handle_response(response)?, "estimates")
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(estimate_id = %id))]
    pub async fn get_estimate(&self, id: &EstimateId) -> Result<Estimate, ApiError> {
        let response: ApiResponse<Estimate> = self.client.get(&estimate_path(id)).await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self, input), fields(lines = input.items.len()))]
    pub async fn create_estimate(&self, input: &EstimateInput) -> Result<Estimate, ApiError> {
        let response: ApiResponse<Estimate> = self
            .client
            .post("/invoices/estimates", Some(Body::json(input)?))
            .await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self, input), fields(estimate_id = %id))]
    pub async fn update_estimate(
        &self,
        id: &EstimateId,
        input: &EstimateInput,
    ) -> Result<Estimate, ApiError> {
        let response: ApiResponse<Estimate> = self
            .client
            .put(&estimate_path(id), Some(Body::json(input)?))
            .await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(estimate_id = %id))]
    pub async fn delete_estimate(&self, id: &EstimateId) -> Result<(), ApiError> {
        let response: ApiResponse<Value> = self.client.delete(&estimate_path(id)).await?;
        handle_empty_response(response)
    }

    /// Turn an accepted estimate into an invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(estimate_id = %id))]
    pub async fn convert_estimate(&self, id: &EstimateId) -> Result<Invoice, ApiError> {
        let path = format!("{}/convert", estimate_path(id));
        let response: ApiResponse<Invoice> = self.client.post(&path, None).await?;
        handle_response(response)
    }
}
