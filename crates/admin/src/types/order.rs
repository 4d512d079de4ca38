//! Order shapes for the admin order screens.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use murti_core::{DeliveryMethod, OrderId, OrderStatus, PaymentStatus, ProductId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Address, ProductSummary, Reference, UserSummary};

/// A line on an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub product: Option<Reference<ProductId, ProductSummary>>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub price: Decimal,
    pub quantity: u32,
}

impl OrderItem {
    /// Price times quantity, or `None` if the product overflows `Decimal`.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Delivery details attached to an order once it is assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeliveryInfo {
    pub method: Option<DeliveryMethod>,
    #[serde(alias = "deliveryPartner")]
    pub partner: Option<Reference<UserId, UserSummary>>,
    pub tracking_number: Option<String>,
    pub courier_name: Option<String>,
    pub estimated_delivery: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
}

/// One entry of an order's status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub status: OrderStatus,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default, alias = "timestamp", alias = "changedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", alias = "id")]
    pub id: OrderId,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub user: Option<Reference<UserId, UserSummary>>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub shipping_address: Address,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub subtotal: Decimal,
    #[serde(default)]
    pub tax: Decimal,
    #[serde(default)]
    pub shipping_cost: Decimal,
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default, alias = "totalAmount")]
    pub total: Decimal,
    #[serde(default)]
    pub coupon_code: Option<String>,
    #[serde(default)]
    pub delivery: Option<DeliveryInfo>,
    #[serde(default)]
    pub status_history: Vec<StatusChange>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

/// Order as embedded in invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: OrderId,
    #[serde(default)]
    pub order_number: Option<String>,
}

/// Filters for `GET /orders/admin/all`.
#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub search: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Body of the order status endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Body of `PATCH /orders/admin/{id}/payment-status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusUpdate {
    pub payment_status: PaymentStatus,
}

/// Body of `PATCH /orders/admin/{id}/delivery`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAssignment {
    pub method: DeliveryMethod,
    #[serde(rename = "deliveryPartner", skip_serializing_if = "Option::is_none")]
    pub partner: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courier_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<NaiveDate>,
}

impl DeliveryAssignment {
    /// Hand the order to one of the store's delivery partners.
    #[must_use]
    pub const fn in_house(partner: UserId) -> Self {
        Self {
            method: DeliveryMethod::InHouse,
            partner: Some(partner),
            tracking_number: None,
            courier_name: None,
            estimated_delivery: None,
        }
    }

    /// Ship the order with a third-party courier.
    #[must_use]
    pub fn courier(courier_name: impl Into<String>, tracking_number: impl Into<String>) -> Self {
        Self {
            method: DeliveryMethod::Courier,
            partner: None,
            tracking_number: Some(tracking_number.into()),
            courier_name: Some(courier_name.into()),
            estimated_delivery: None,
        }
    }
}

/// Body of `PATCH /orders/admin/{id}/cancel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Aggregates from `GET /orders/admin/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderStats {
    pub total_orders: u64,
    pub today_orders: u64,
    pub total_revenue: Decimal,
    pub average_order_value: Decimal,
    #[serde(alias = "statusCounts")]
    pub by_status: BTreeMap<String, u64>,
}
