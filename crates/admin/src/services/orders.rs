//! Admin order management.

use murti_core::{OrderId, OrderStatus, PaymentStatus};
use serde_json::Value;
use tracing::instrument;

use super::envelope::{ApiResponse, handle_response};
use super::page::{Page, into_page};
use super::query::{QueryParams, segment};
use crate::api::Body;
use crate::error::ApiError;
use crate::types::{
    CancelRequest, DeliveryAssignment, Order, OrderQuery, OrderStats, PaymentStatusUpdate,
    StatusUpdate,
};

service! {
    /// Order listing, status changes, delivery assignment and cancellation.
    OrderService
}

fn order_path(id: &OrderId) -> String {
    format!("/orders/admin/{}", segment(id.as_str()))
}

impl OrderService {
    /// Get a page of orders across all customers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &OrderQuery) -> Result<Page<Order>, ApiError> {
        let path = QueryParams::new()
            .opt("page", query.page)
            .opt("limit", query.limit)
            .opt("status", query.status)
            .opt("paymentStatus", query.payment_status)
            .opt("search", query.search.as_deref())
            .opt("startDate", query.start_date)
            .opt("endDate", query.end_date)
            .apply("/orders/admin/all");

        let response: ApiResponse<Value> = self.client.get(&path).await?;
        into_page(handle_response(response)?, "orders")
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get(&self, id: &OrderId) -> Result<Order, ApiError> {
        let response: ApiResponse<Order> = self.client.get(&order_path(id)).await?;
        handle_response(response)
    }

    /// Move an order to a new status, optionally with a note for the history.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self, note), fields(order_id = %id, status = %status))]
    pub async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        note: Option<&str>,
    ) -> Result<Order, ApiError> {
        let body = Body::json(&StatusUpdate {
            status,
            note: note.map(str::to_owned),
        })?;
        let path = format!("{}/status", order_path(id));
        let response: ApiResponse<Order> = self.client.patch(&path, Some(body)).await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(order_id = %id, payment_status = %payment_status))]
    pub async fn update_payment_status(
        &self,
        id: &OrderId,
        payment_status: PaymentStatus,
    ) -> Result<Order, ApiError> {
        let body = Body::json(&PaymentStatusUpdate { payment_status })?;
        let path = format!("{}/payment-status", order_path(id));
        let response: ApiResponse<Order> = self.client.patch(&path, Some(body)).await?;
        handle_response(response)
    }

    /// Assign a delivery partner or courier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn assign_delivery(
        &self,
        id: &OrderId,
        assignment: &DeliveryAssignment,
    ) -> Result<Order, ApiError> {
        let path = format!("{}/delivery", order_path(id));
        let response: ApiResponse<Order> =
            self.client.patch(&path, Some(Body::json(assignment)?)).await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn cancel(&self, id: &OrderId, reason: Option<&str>) -> Result<Order, ApiError> {
        let body = Body::json(&CancelRequest {
            reason: reason.map(str::to_owned),
        })?;
        let path = format!("{}/cancel", order_path(id));
        let response: ApiResponse<Order> = self.client.patch(&path, Some(body)).await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<OrderStats, ApiError> {
        let response: ApiResponse<OrderStats> = self.client.get("/orders/admin/stats").await?;
        handle_response(response)
    }
}
