use chrono::{DateTime, Utc};
use murti_core::{CouponId, DiscountType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{StatusFilter, default_true};

/// A discount coupon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(rename = "_id", alias = "id")]
    pub id: CouponId,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    #[serde(default)]
    pub min_order_amount: Option<Decimal>,
    #[serde(default)]
    pub max_discount: Option<Decimal>,
    #[serde(default)]
    pub usage_limit: Option<u32>,
    #[serde(default)]
    pub used_count: u32,
    #[serde(default)]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Coupon {
    /// Whether the usage limit has been reached.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.usage_limit.is_some_and(|limit| self.used_count >= limit)
    }
}

/// Filters for `GET /coupons`.
#[derive(Debug, Clone, Default)]
pub struct CouponQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub status: Option<StatusFilter>,
}

/// Body for creating or replacing a coupon.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponInput {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub discount_type: DiscountType,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_value: Decimal,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub min_order_amount: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub max_discount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl CouponInput {
    /// A coupon with only the required fields set.
    #[must_use]
    pub fn new(code: impl Into<String>, discount_type: DiscountType, discount_value: Decimal) -> Self {
        Self {
            code: code.into(),
            description: None,
            discount_type,
            discount_value,
            min_order_amount: None,
            max_discount: None,
            usage_limit: None,
            valid_from: None,
            valid_until: None,
            is_active: None,
        }
    }
}

/// Body of `POST /coupons/validate`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponValidationRequest<'a> {
    pub code: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    pub order_amount: Decimal,
}

/// Outcome of a coupon check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponValidation {
    #[serde(default = "default_true", alias = "isValid")]
    pub valid: bool,
    #[serde(default, alias = "discountAmount")]
    pub discount: Decimal,
    #[serde(default)]
    pub final_amount: Option<Decimal>,
    #[serde(default)]
    pub coupon: Option<Coupon>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coupon_exhaustion() {
        let mut coupon: Coupon = serde_json::from_value(json!({
            "_id": "cp1",
            "code": "DIWALI10",
            "discountType": "percentage",
            "discountValue": 10,
            "usageLimit": 2,
            "usedCount": 1
        }))
        .unwrap();
        assert!(!coupon.is_exhausted());
        coupon.used_count = 2;
        assert!(coupon.is_exhausted());
    }

    #[test]
    fn test_validation_request_body() {
        let body = serde_json::to_value(CouponValidationRequest {
            code: "DIWALI10",
            order_amount: Decimal::new(2500, 0),
        })
        .unwrap();
        assert_eq!(body, json!({"code": "DIWALI10", "orderAmount": 2500.0}));
    }

    #[test]
    fn test_validation_result_aliases() {
        let result: CouponValidation =
            serde_json::from_value(json!({"discountAmount": 250, "finalAmount": 2250})).unwrap();
        assert!(result.valid);
        assert_eq!(result.discount, Decimal::new(250, 0));
    }
}
