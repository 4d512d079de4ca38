//! Users and coupons.

use murti_admin::AdminApi;
use murti_admin::types::{CouponQuery, UserQuery};
use murti_core::{UserId, UserRole, format_inr};
use rust_decimal::Decimal;

use crate::error::CliError;
use crate::output::print_json;

pub async fn list_users(api: &AdminApi, query: &UserQuery) -> Result<(), CliError> {
    print_json(&api.users().list(query).await?)
}

pub async fn update_role(api: &AdminApi, id: &UserId, role: UserRole) -> Result<(), CliError> {
    print_json(&api.users().update_role(id, role).await?)
}

pub async fn list_coupons(api: &AdminApi, query: &CouponQuery) -> Result<(), CliError> {
    print_json(&api.coupons().list(query).await?)
}

pub async fn validate_coupon(api: &AdminApi, code: &str, amount: Decimal) -> Result<(), CliError> {
    let validation = api.coupons().validate(code, amount).await?;
    tracing::info!(
        code,
        discount = %format_inr(validation.discount),
        "Coupon checked"
    );
    print_json(&validation)
}
