//! Customer and staff accounts as seen by the management screens.

use chrono::{DateTime, Utc};
use murti_core::{UserId, UserRole};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Order, StatusFilter, default_true};

/// A user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order_count: Option<u32>,
    #[serde(default)]
    pub total_spent: Option<Decimal>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// User as embedded in orders and movements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Filters for `GET /admin/management/users`.
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<StatusFilter>,
}

/// Body of the role change endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleUpdate {
    pub role: UserRole,
}

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_orders: u64,
    pub total_products: u64,
    pub total_revenue: Decimal,
    pub pending_orders: u64,
    pub low_stock_products: u64,
    pub recent_orders: Vec<Order>,
}
