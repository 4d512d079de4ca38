//! Product catalogue shapes.

use chrono::{DateTime, Utc};
use murti_core::{CategoryId, ImageId, ProductId, StockOperation, StockStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Reference, StatusFilter, default_true};

/// Category as embedded in a product when the relation is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Product as embedded in orders, movements and purchase orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
}

/// A product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<ImageId>,
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// A catalogue product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    /// Maximum retail price shown struck through next to `price`.
    #[serde(default)]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub category: Option<Reference<CategoryId, CategorySummary>>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub low_stock_threshold: Option<u32>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub weight: Option<Decimal>,
    #[serde(default)]
    pub gst_rate: Option<Decimal>,
    #[serde(default)]
    pub hsn_code: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Availability bucket for the current stock level.
    #[must_use]
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::from_quantity(self.stock, self.low_stock_threshold)
    }

    /// The image flagged as primary, or the first one.
    #[must_use]
    pub fn primary_image(&self) -> Option<&ProductImage> {
        self.images
            .iter()
            .find(|image| image.is_primary)
            .or_else(|| self.images.first())
    }
}

/// Filters for `GET /products`.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub category: Option<CategoryId>,
    pub status: Option<StatusFilter>,
    pub featured: Option<bool>,
    /// Sort key understood by the backend, e.g. `-createdAt` or `price`.
    pub sort: Option<String>,
}

/// Body for creating a product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub original_price: Option<Decimal>,
    pub category: CategoryId,
    pub stock: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_stock_threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub gst_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsn_code: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

impl ProductInput {
    /// Minimal product with the required fields set.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Decimal, category: CategoryId, stock: u32) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
            original_price: None,
            category,
            stock,
            low_stock_threshold: None,
            sku: None,
            material: None,
            dimensions: None,
            gst_rate: None,
            hsn_code: None,
            tags: Vec::new(),
            is_active: None,
            is_featured: None,
        }
    }
}

/// Body for updating a product. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub original_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_stock_threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub gst_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsn_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Body of `PATCH /products/{id}/inventory`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockUpdate {
    pub quantity: u32,
    pub operation: StockOperation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl StockUpdate {
    /// Increase stock by `quantity`.
    #[must_use]
    pub const fn add(quantity: u32) -> Self {
        Self {
            quantity,
            operation: StockOperation::Add,
            reason: None,
        }
    }

    /// Decrease stock by `quantity`.
    #[must_use]
    pub const fn subtract(quantity: u32) -> Self {
        Self {
            quantity,
            operation: StockOperation::Subtract,
            reason: None,
        }
    }

    /// Replace stock with `quantity`.
    #[must_use]
    pub const fn set(quantity: u32) -> Self {
        Self {
            quantity,
            operation: StockOperation::Set,
            reason: None,
        }
    }

    /// Attach a reason recorded in the stock movement log.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_from_backend_json() {
        let product: Product = serde_json::from_value(json!({
            "_id": "p1",
            "name": "Brass Ganesha",
            "price": 1499,
            "category": {"_id": "c1", "name": "Brass Idols"},
            "images": [
                {"url": "/uploads/a.jpg"},
                {"_id": "i2", "url": "/uploads/b.jpg", "isPrimary": true}
            ],
            "stock": 4,
            "isFeatured": true
        }))
        .unwrap();

        assert_eq!(product.id, ProductId::new("p1"));
        assert_eq!(product.price, Decimal::new(1499, 0));
        assert!(product.is_active);
        assert!(product.is_featured);
        assert_eq!(product.stock_status(), StockStatus::LowStock);
        assert_eq!(product.primary_image().unwrap().url, "/uploads/b.jpg");
        assert_eq!(
            product.category.as_ref().unwrap().populated().unwrap().name,
            "Brass Idols"
        );
    }

    #[test]
    fn test_product_with_unpopulated_category() {
        let product: Product = serde_json::from_value(json!({
            "id": "p2",
            "name": "Marble Krishna",
            "price": "2500.50",
            "category": "c9",
            "stock": 0,
            "lowStockThreshold": 2
        }))
        .unwrap();

        assert_eq!(product.category, Some(Reference::Id(CategoryId::new("c9"))));
        assert_eq!(product.price, Decimal::new(250_050, 2));
        assert_eq!(product.stock_status(), StockStatus::OutOfStock);
    }

    #[test]
    fn test_product_input_sends_numbers_and_skips_unset() {
        let input = ProductInput::new("Ganesha", Decimal::new(1499, 0), CategoryId::new("c1"), 10);
        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(
            body,
            json!({"name": "Ganesha", "price": 1499.0, "category": "c1", "stock": 10})
        );
    }

    #[test]
    fn test_product_update_only_sends_set_fields() {
        let update = ProductUpdate {
            name: Some("Renamed".to_string()),
            ..ProductUpdate::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"name": "Renamed"}));
    }

    #[test]
    fn test_stock_update_serialization() {
        let body = serde_json::to_value(StockUpdate::add(5).with_reason("restock")).unwrap();
        assert_eq!(body, json!({"quantity": 5, "operation": "add", "reason": "restock"}));
    }
}
