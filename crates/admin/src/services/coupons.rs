use murti_core::CouponId;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::instrument;

use super::envelope::{ApiResponse, handle_empty_response, handle_response};
use super::page::{Page, into_page};
use super::query::{QueryParams, segment};
use crate::api::Body;
use crate::error::ApiError;
use crate::types::{Coupon, CouponInput, CouponQuery, CouponValidation, CouponValidationRequest};

service! {
    /// Coupon CRUD and checkout validation.
    CouponService
}

fn coupon_path(id: &CouponId) -> String {
    format!("/coupons/{}", segment(id.as_str()))
}

impl CouponService {
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &CouponQuery) -> Result<Page<Coupon>, ApiError> {
        let path = QueryParams::new()
            .opt("page", query.page)
            .opt("limit", query.limit)
            .opt("search", query.search.as_deref())
            .opt("status", query.status)
            .apply("/coupons");

        let response: ApiResponse<Value> = self.client.get(&path).await?;
        into_page(handle_response(response)?, "coupons")
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(coupon_id = %id))]
    pub async fn get(&self, id: &CouponId) -> Result<Coupon, ApiError> {
        let response: ApiResponse<Coupon> = self.client.get(&coupon_path(id)).await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self, input), fields(code = %input.code))]
    pub async fn create(&self, input: &CouponInput) -> Result<Coupon, ApiError> {
        let response: ApiResponse<Coupon> =
            self.client.post("/coupons", Some(Body::json(input)?)).await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self, input), fields(coupon_id = %id))]
    pub async fn update(&self, id: &CouponId, input: &CouponInput) -> Result<Coupon, ApiError> {
        let response: ApiResponse<Coupon> = self
            .client
            .put(&coupon_path(id), Some(Body::json(input)?))
            .await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(coupon_id = %id))]
    pub async fn delete(&self, id: &CouponId) -> Result<(), ApiError> {
        let response: ApiResponse<Value> = self.client.delete(&coupon_path(id)).await?;
        handle_empty_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(coupon_id = %id))]
    pub async fn toggle_status(&self, id: &CouponId) -> Result<Coupon, ApiError> {
        let path = format!("{}/toggle-status", coupon_path(id));
        let response: ApiResponse<Coupon> = self.client.patch(&path, None).await?;
        handle_response(response)
    }

    /// Check a code against an order amount.
    ///
    /// An invalid or expired code usually comes back as a failed envelope,
    /// i.e. `ApiError::Envelope` carrying the backend's reason.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(order_amount = %order_amount))]
    pub async fn validate(&self, code: &str, order_amount: Decimal) -> Result<CouponValidation, ApiError> {
        let body = Body::json(&CouponValidationRequest { code, order_amount })?;
        let response: ApiResponse<CouponValidation> =
            self.client.post("/coupons/validate", Some(body)).await?;
        handle_response(response)
    }
}
