//! Business settings, one `PUT` per section.

use reqwest::multipart::Form;
use serde::Serialize;
use tracing::instrument;

use super::envelope::{ApiResponse, handle_response};
use crate::api::Body;
use crate::error::ApiError;
use crate::types::{
    BusinessSettings, CompanySettings, DeliverySettings, InvoiceSettings, PaymentSettings,
    TaxSettings, UploadedLogo,
};

const BASE: &str = "/admin/business-settings";

service! {
    /// Read and update the store's business settings.
    SettingsService
}

impl SettingsService {
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn get(&self) -> Result<BusinessSettings, ApiError> {
        let response: ApiResponse<BusinessSettings> = self.client.get(BASE).await?;
        handle_response(response)
    }

    async fn put_section<T: Serialize + Sync>(
        &self,
        section: &str,
        value: &T,
    ) -> Result<BusinessSettings, ApiError> {
        let path = format!("{BASE}/{section}");
        let response: ApiResponse<BusinessSettings> =
            self.client.put(&path, Some(Body::json(value)?)).await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip_all)]
    pub async fn update_company(&self, company: &CompanySettings) -> Result<BusinessSettings, ApiError> {
        self.put_section("company", company).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip_all)]
    pub async fn update_tax(&self, tax: &TaxSettings) -> Result<BusinessSettings, ApiError> {
        self.put_section("tax", tax).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip_all)]
    pub async fn update_delivery(
        &self,
        delivery: &DeliverySettings,
    ) -> Result<BusinessSettings, ApiError> {
        self.put_section("delivery", delivery).await
    }

    /// Bank and UPI details are sent as entered; they are not masked here.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip_all)]
    pub async fn update_payment(&self, payment: &PaymentSettings) -> Result<BusinessSettings, ApiError> {
        self.put_section("payment", payment).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip_all)]
    pub async fn update_invoice(&self, invoice: &InvoiceSettings) -> Result<BusinessSettings, ApiError> {
        self.put_section("invoice", invoice).await
    }

    /// Upload the company logo. The form should carry the file under `logo`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip_all)]
    pub async fn upload_logo(&self, form: Form) -> Result<UploadedLogo, ApiError> {
        let response: ApiResponse<UploadedLogo> = self
            .client
            .post(&format!("{BASE}/logo"), Some(Body::multipart(form)))
            .await?;
        handle_response(response)
    }
}
