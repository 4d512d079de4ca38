//! Product catalogue operations.

use murti_core::{ImageId, ProductId};
use reqwest::multipart::Form;
use serde_json::Value;
use tracing::instrument;

use super::envelope::{ApiResponse, handle_empty_response, handle_response};
use super::page::{Page, into_page};
use super::query::{QueryParams, segment};
use crate::api::{Body, FileUpload, form_from_fields};
use crate::error::ApiError;
use crate::types::{Product, ProductInput, ProductQuery, ProductUpdate, StockUpdate};

service! {
    /// Product CRUD, status toggles, stock and images.
    ProductService
}

fn product_path(id: &ProductId) -> String {
    format!("/products/{}", segment(id.as_str()))
}

impl ProductService {
    /// Get a page of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &ProductQuery) -> Result<Page<Product>, ApiError> {
        let path = QueryParams::new()
            .opt("page", query.page)
            .opt("limit", query.limit)
            .opt("search", query.search.as_deref())
            .opt("category", query.category.as_ref())
            .opt("status", query.status)
            .opt("featured", query.featured)
            .opt("sort", query.sort.as_deref())
            .apply("/products");

        let response: ApiResponse<Value> = self.client.get(&path).await?;
        into_page(handle_response(response)?, "products")
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get(&self, id: &ProductId) -> Result<Product, ApiError> {
        let response: ApiResponse<Product> = self.client.get(&product_path(id)).await?;
        handle_response(response)
    }

    /// Create a product from a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: &ProductInput) -> Result<Product, ApiError> {
        let response: ApiResponse<Product> =
            self.client.post("/products", Some(Body::json(input)?)).await?;
        handle_response(response)
    }

    /// Create a product from a prepared multipart form.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self, form))]
    pub async fn create_multipart(&self, form: Form) -> Result<Product, ApiError> {
        let response: ApiResponse<Product> =
            self.client.post("/products", Some(Body::multipart(form))).await?;
        handle_response(response)
    }

    /// Create a product together with its images in one multipart request.
    ///
    /// # Errors
    ///
    /// Returns an error if the form cannot be built, the request fails or
    /// the envelope reports failure.
    pub async fn create_with_images(
        &self,
        input: &ProductInput,
        images: Vec<FileUpload>,
    ) -> Result<Product, ApiError> {
        self.create_multipart(form_from_fields(input, images)?).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self, update), fields(product_id = %id))]
    pub async fn update(&self, id: &ProductId, update: &ProductUpdate) -> Result<Product, ApiError> {
        let response: ApiResponse<Product> = self
            .client
            .put(&product_path(id), Some(Body::json(update)?))
            .await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete(&self, id: &ProductId) -> Result<(), ApiError> {
        let response: ApiResponse<Value> = self.client.delete(&product_path(id)).await?;
        handle_empty_response(response)
    }

    /// Flip the product between active and inactive.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn toggle_status(&self, id: &ProductId) -> Result<Product, ApiError> {
        let path = format!("{}/toggle-status", product_path(id));
        let response: ApiResponse<Product> = self.client.patch(&path, None).await?;
        handle_response(response)
    }

    /// Flip the product's featured flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn toggle_featured(&self, id: &ProductId) -> Result<Product, ApiError> {
        let path = format!("{}/toggle-featured", product_path(id));
        let response: ApiResponse<Product> = self.client.patch(&path, None).await?;
        handle_response(response)
    }

    /// Add to, subtract from or overwrite the stock level.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn update_stock(&self, id: &ProductId, update: &StockUpdate) -> Result<Product, ApiError> {
        let path = format!("{}/inventory", product_path(id));
        let response: ApiResponse<Product> =
            self.client.patch(&path, Some(Body::json(update)?)).await?;
        handle_response(response)
    }

    /// Attach images to an existing product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self, form), fields(product_id = %id))]
    pub async fn upload_images(&self, id: &ProductId, form: Form) -> Result<Product, ApiError> {
        let path = format!("{}/images", product_path(id));
        let response: ApiResponse<Product> =
            self.client.post(&path, Some(Body::multipart(form))).await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self), fields(product_id = %id, image_id = %image_id))]
    pub async fn delete_image(&self, id: &ProductId, image_id: &ImageId) -> Result<Product, ApiError> {
        let path = format!("{}/images/{}", product_path(id), segment(image_id.as_str()));
        let response: ApiResponse<Product> = self.client.delete(&path).await?;
        handle_response(response)
    }
}
