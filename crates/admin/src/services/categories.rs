use murti_core::CategoryId;
use reqwest::multipart::Form;
use serde_json::Value;
use tracing::instrument;

use super::envelope::{ApiResponse, handle_empty_response, handle_response};
use super::page::{Page, into_page};
use super::query::{QueryParams, segment};
use crate::api::{Body, FileUpload, form_from_fields};
use crate::error::ApiError;
use crate::types::{Category, CategoryInput, CategoryQuery};

service! {
    /// Category CRUD.
    CategoryService
}

fn category_path(id: &CategoryId) -> String {
    format!("/categories/{}", segment(id.as_str()))
}

impl CategoryService {
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &CategoryQuery) -> Result<Page<Category>, ApiError> {
        let path = QueryParams::new()
            .opt("page", query.page)
            .opt("limit", query.limit)
            .opt("search", query.search.as_deref())
            .opt("status", query.status)
            .apply("/categories");

        let response: ApiResponse<Value> = self.client.get(&path).await?;
        into_page(handle_response(response)?, "categories")
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn get(&self, id: &CategoryId) -> Result<Category, ApiError> {
        let response: ApiResponse<Category> = self.client.get(&category_path(id)).await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn create(&self, input: &CategoryInput) -> Result<Category, ApiError> {
        let response: ApiResponse<Category> = self
            .client
            .post("/categories", Some(Body::json(input)?))
            .await?;
        handle_response(response)
    }

    /// Create a category with a cover image.
    ///
    /// # Errors
    ///
    /// Returns an error if the form cannot be built, the request fails or
    /// the envelope reports failure.
    #[instrument(skip(self, image))]
    pub async fn create_with_image(
        &self,
        input: &CategoryInput,
        image: FileUpload,
    ) -> Result<Category, ApiError> {
        let form = form_from_fields(input, vec![image])?;
        self.create_multipart(form).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self, form))]
    pub async fn create_multipart(&self, form: Form) -> Result<Category, ApiError> {
        let response: ApiResponse<Category> = self
            .client
            .post("/categories", Some(Body::multipart(form)))
            .await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn update(&self, id: &CategoryId, input: &CategoryInput) -> Result<Category, ApiError> {
        let response: ApiResponse<Category> = self
            .client
            .put(&category_path(id), Some(Body::json(input)?))
            .await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete(&self, id: &CategoryId) -> Result<(), ApiError> {
        let response: ApiResponse<Value> = self.client.delete(&category_path(id)).await?;
        handle_empty_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn toggle_status(&self, id: &CategoryId) -> Result<Category, ApiError> {
        let path = format!("{}/toggle-status", category_path(id));
        let response: ApiResponse<Category> = self.client.patch(&path, None).await?;
        handle_response(response)
    }
}
