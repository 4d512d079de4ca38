use chrono::{DateTime, Utc};
use murti_core::{CategoryId, ProductId, StockOperation, StockStatus, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CategorySummary, ProductSummary, Reference, UserSummary};

/// A product's stock position as listed by `GET /inventory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(rename = "_id", alias = "id")]
    pub product: ProductId,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub category: Option<Reference<CategoryId, CategorySummary>>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub low_stock_threshold: Option<u32>,
    #[serde(default)]
    pub price: Option<Decimal>,
}

impl InventoryItem {
    #[must_use]
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::from_quantity(self.stock, self.low_stock_threshold)
    }

    /// Stock valued at the selling price, or `None` on `Decimal` overflow.
    /// An item without a price is worth zero.
    #[must_use]
    pub fn stock_value(&self) -> Option<Decimal> {
        self.price
            .unwrap_or(Decimal::ZERO)
            .checked_mul(Decimal::from(self.stock))
    }
}

/// Filters for `GET /inventory`.
#[derive(Debug, Clone, Default)]
pub struct InventoryQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub category: Option<CategoryId>,
    pub stock_status: Option<StockStatus>,
}

/// Body of `POST /inventory/adjust`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryAdjustment {
    pub product_id: ProductId,
    pub quantity: u32,
    pub operation: StockOperation,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// One recorded change to a product's stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub product: Option<Reference<ProductId, ProductSummary>>,
    /// Movement kind as recorded by the backend (`in`, `out`, `adjustment`, ...).
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub quantity: i64,
    #[serde(default)]
    pub previous_stock: Option<u32>,
    #[serde(default)]
    pub new_stock: Option<u32>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub created_by: Option<Reference<UserId, UserSummary>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inventory_item_value_and_status() {
        let item: InventoryItem = serde_json::from_value(json!({
            "_id": "p1",
            "name": "Brass Nandi",
            "stock": 25,
            "price": 800
        }))
        .unwrap();
        assert_eq!(item.stock_status(), StockStatus::InStock);
        assert_eq!(item.stock_value(), Some(Decimal::new(20_000, 0)));
    }

    #[test]
    fn test_stock_value_overflow_is_none() {
        let item: InventoryItem = serde_json::from_value(json!({
            "_id": "p1",
            "name": "Brass Nandi",
            "stock": 3
        }))
        .unwrap();
        assert_eq!(item.stock_value(), Some(Decimal::ZERO));

        let item = InventoryItem {
            price: Some(Decimal::MAX),
            ..item
        };
        assert_eq!(item.stock_value(), None);
    }

    #[test]
    fn test_adjustment_body() {
        let body = serde_json::to_value(InventoryAdjustment {
            product_id: ProductId::new("p1"),
            quantity: 3,
            operation: StockOperation::Subtract,
            reason: "damaged in transit".to_string(),
            reference: None,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"productId": "p1", "quantity": 3, "operation": "subtract", "reason": "damaged in transit"})
        );
    }

    #[test]
    fn test_movement_type_field() {
        let movement: StockMovement = serde_json::from_value(json!({
            "_id": "m1",
            "product": "p1",
            "type": "out",
            "quantity": -2,
            "previousStock": 10,
            "newStock": 8
        }))
        .unwrap();
        assert_eq!(movement.kind.as_deref(), Some("out"));
        assert_eq!(movement.quantity, -2);
    }
}
