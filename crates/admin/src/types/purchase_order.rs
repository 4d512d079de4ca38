use chrono::{DateTime, NaiveDate, Utc};
use murti_core::{ProductId, PurchaseOrderId, PurchaseOrderStatus, SupplierId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ProductSummary, Reference, SupplierSummary};

/// A line on a purchase order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderLine {
    #[serde(default)]
    pub product: Option<Reference<ProductId, ProductSummary>>,
    #[serde(default)]
    pub name: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub received_quantity: u32,
    #[serde(default)]
    pub unit_cost: Decimal,
}

impl PurchaseOrderLine {
    /// Units still to be received.
    #[must_use]
    pub const fn outstanding(&self) -> u32 {
        self.quantity.saturating_sub(self.received_quantity)
    }
}

/// A purchase order raised with a supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    #[serde(rename = "_id", alias = "id")]
    pub id: PurchaseOrderId,
    #[serde(default)]
    pub po_number: Option<String>,
    #[serde(default)]
    pub supplier: Option<Reference<SupplierId, SupplierSummary>>,
    #[serde(default)]
    pub items: Vec<PurchaseOrderLine>,
    #[serde(default)]
    pub status: PurchaseOrderStatus,
    #[serde(default)]
    pub subtotal: Decimal,
    #[serde(default)]
    pub tax: Decimal,
    #[serde(default, alias = "totalAmount")]
    pub total: Decimal,
    #[serde(default)]
    pub expected_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl PurchaseOrder {
    /// Whether every line has been received in full.
    #[must_use]
    pub fn is_fully_received(&self) -> bool {
        self.items.iter().all(|line| line.outstanding() == 0)
    }
}

/// Filters for `GET /purchase-orders`.
#[derive(Debug, Clone, Default)]
pub struct PurchaseOrderQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<PurchaseOrderStatus>,
    pub supplier: Option<SupplierId>,
}

/// A line of a new purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderLineInput {
    pub product: ProductId,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_cost: Decimal,
}

/// Body of `POST /purchase-orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderInput {
    pub supplier: SupplierId,
    pub items: Vec<PurchaseOrderLineInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of `PATCH /purchase-orders/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PurchaseOrderStatusUpdate {
    pub status: PurchaseOrderStatus,
}

/// Units of one product received against a purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedItem {
    pub product: ProductId,
    pub received_quantity: u32,
}

/// Body of `POST /purchase-orders/{id}/receive`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiveRequest {
    pub items: Vec<ReceivedItem>,
}
