use murti_core::SupplierId;
use serde_json::Value;
use tracing::instrument;

use super::envelope::{ApiResponse, handle_empty_response, handle_response};
use super::page::{Page, into_page};
use super::query::{QueryParams, segment};
use crate::api::Body;
use crate::error::ApiError;
use crate::types::{Supplier, SupplierInput, SupplierQuery};

service! {
    /// Supplier CRUD.
    SupplierService
}

fn supplier_path(id: &SupplierId) -> String {
    format!("/suppliers/{}", segment(id.as_str()))
}

impl SupplierService {
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &SupplierQuery) -> Result<Page<Supplier>, ApiError> {
        let path = QueryParams::new()
            .opt("page", query.page)
            .opt("limit", query.limit)
            .opt("search", query.search.as_deref())
            .opt("status", query.status)
            .apply("/suppliers");

        let response: ApiResponse<Value> = self.client.get(&path).await?;
        into_page(handle_response(response)?, "suppliers")
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(supplier_id = %id))]
    pub async fn get(&self, id: &SupplierId) -> Result<Supplier, ApiError> {
        let response: ApiResponse<Supplier> = self.client.get(&supplier_path(id)).await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: &SupplierInput) -> Result<Supplier, ApiError> {
        let response: ApiResponse<Supplier> =
            self.client.post("/suppliers", Some(Body::json(input)?)).await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self, input), fields(supplier_id = %id))]
    pub async fn update(&self, id: &SupplierId, input: &SupplierInput) -> Result<Supplier, ApiError> {
        let response: ApiResponse<Supplier> = self
            .client
            .put(&supplier_path(id), Some(Body::json(input)?))
            .await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(supplier_id = %id))]
    pub async fn delete(&self, id: &SupplierId) -> Result<(), ApiError> {
        let response: ApiResponse<Value> = self.client.delete(&supplier_path(id)).await?;
        handle_empty_response(response)
    }
}
