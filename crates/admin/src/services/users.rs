//! Account management, the admin dashboard and delivery partners.

use murti_core::{OrderId, OrderStatus, UserId, UserRole};
use serde_json::Value;
use tracing::instrument;

use super::envelope::{ApiResponse, handle_empty_response, handle_response};
use super::page::{Page, into_page};
use super::query::{QueryParams, segment};
use crate::api::Body;
use crate::error::ApiError;
use crate::types::{DashboardStats, Order, RoleUpdate, StatusUpdate, User, UserQuery};

const BASE: &str = "/admin/management";

service! {
    /// The `/admin/management` surface.
    UserService
}

fn user_path(id: &UserId) -> String {
    format!("{BASE}/users/{}", segment(id.as_str()))
}

impl UserService {
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &UserQuery) -> Result<Page<User>, ApiError> {
        let path = QueryParams::new()
            .opt("page", query.page)
            .opt("limit", query.limit)
            .opt("search", query.search.as_deref())
            .opt("role", query.role)
            .opt("status", query.status)
            .apply(&format!("{BASE}/users"));

        let response: ApiResponse<Value> = self.client.get(&path).await?;
        into_page(handle_response(response)?, "users")
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get(&self, id: &UserId) -> Result<User, ApiError> {
        let response: ApiResponse<User> = self.client.get(&user_path(id)).await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(user_id = %id, role = %role))]
    pub async fn update_role(&self, id: &UserId, role: UserRole) -> Result<User, ApiError> {
        let path = format!("{}/role", user_path(id));
        let response: ApiResponse<User> = self
            .client
            .patch(&path, Some(Body::json(&RoleUpdate { role })?))
            .await?;
        handle_response(response)
    }

    /// Activate or deactivate an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn toggle_status(&self, id: &UserId) -> Result<User, ApiError> {
        let path = format!("{}/toggle-status", user_path(id));
        let response: ApiResponse<User> = self.client.patch(&path, None).await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete(&self, id: &UserId) -> Result<(), ApiError> {
        let response: ApiResponse<Value> = self.client.delete(&user_path(id)).await?;
        handle_empty_response(response)
    }

    /// Change an order's status through the management surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self, note), fields(order_id = %id, status = %status))]
    pub async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        note: Option<&str>,
    ) -> Result<Order, ApiError> {
        let body = Body::json(&StatusUpdate {
            status,
            note: note.map(str::to_owned),
        })?;
        let path = format!("{BASE}/orders/{}/status", segment(id.as_str()));
        let response: ApiResponse<Order> = self.client.patch(&path, Some(body)).await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> Result<DashboardStats, ApiError> {
        let response: ApiResponse<DashboardStats> =
            self.client.get(&format!("{BASE}/dashboard")).await?;
        handle_response(response)
    }

    /// Active delivery partners, for assigning in-house deliveries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn delivery_partners(&self) -> Result<Vec<User>, ApiError> {
        let response: ApiResponse<Value> =
            self.client.get(&format!("{BASE}/delivery-partners")).await?;
        Ok(into_page(handle_response(response)?, "deliveryPartners")?.items)
    }
}
