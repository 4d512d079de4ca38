use murti_core::{PurchaseOrderId, PurchaseOrderStatus};
use serde_json::Value;
use tracing::instrument;

use super::envelope::{ApiResponse, handle_empty_response, handle_response};
use super::page::{Page, into_page};
use super::query::{QueryParams, segment};
use crate::api::Body;
use crate::error::ApiError;
use crate::types::{
    PurchaseOrder, PurchaseOrderInput, PurchaseOrderQuery, PurchaseOrderStatusUpdate,
    ReceiveRequest, ReceivedItem,
};

service! {
    /// Purchase orders raised with suppliers and goods receipt.
    PurchaseOrderService
}

fn purchase_order_path(id: &PurchaseOrderId) -> String {
    format!("/purchase-orders/{}", segment(id.as_str()))
}

impl PurchaseOrderService {
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &PurchaseOrderQuery) -> Result<Page<PurchaseOrder>, ApiError> {
        let path = QueryParams::new()
            .opt("page", query.page)
            .opt("limit", query.limit)
            .opt("status", query.status)
            .opt("supplier", query.supplier.as_ref())
            .apply("/purchase-orders");

        let response: ApiResponse<Value> = self.client.get(&path).await?;
        into_page(handle_response(response)?, "purchaseOrders")
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(purchase_order_id = %id))]
    pub async fn get(&self, id: &PurchaseOrderId) -> Result<PurchaseOrder, ApiError> {
        let response: ApiResponse<PurchaseOrder> =
            self.client.get(&purchase_order_path(id)).await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self, input), fields(supplier_id = %input.supplier, lines = input.items.len()))]
    pub async fn create(&self, input: &PurchaseOrderInput) -> Result<PurchaseOrder, ApiError> {
        let response: ApiResponse<PurchaseOrder> = self
            .client
            .post("/purchase-orders", Some(Body::json(input)?))
            .await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(purchase_order_id = %id, status = %status))]
    pub async fn update_status(
        &self,
        id: &PurchaseOrderId,
        status: PurchaseOrderStatus,
    ) -> Result<PurchaseOrder, ApiError> {
        let path = format!("{}/status", purchase_order_path(id));
        let body = Body::json(&PurchaseOrderStatusUpdate { status })?;
        let response: ApiResponse<PurchaseOrder> = self.client.patch(&path, Some(body)).await?;
        handle_response(response)
    }

    /// Record goods received. The backend adds the quantities to stock.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self, items), fields(purchase_order_id = %id, lines = items.len()))]
    pub async fn receive(
        &self,
        id: &PurchaseOrderId,
        items: Vec<ReceivedItem>,
    ) -> Result<PurchaseOrder, ApiError> {
        let path = format!("{}/receive", purchase_order_path(id));
        let body = Body::json(&ReceiveRequest { items })?;
        let response: ApiResponse<PurchaseOrder> = self.client.post(&path, Some(body)).await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(purchase_order_id = %id))]
    pub async fn delete(&self, id: &PurchaseOrderId) -> Result<(), ApiError> {
        let response: ApiResponse<Value> = self.client.delete(&purchase_order_path(id)).await?;
        handle_empty_response(response)
    }
}
