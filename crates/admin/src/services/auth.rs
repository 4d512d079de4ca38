//! Admin sign-in and profile management.

use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use super::envelope::{ApiResponse, handle_empty_response, handle_response};
use crate::api::Body;
use crate::error::ApiError;
use crate::types::{LoginRequest, LoginResponse, PasswordChange, Profile, ProfileUpdate};

service! {
    /// Login, logout and the signed-in profile.
    AuthService
}

impl AuthService {
    /// Sign in and store the issued token for every later request.
    ///
    /// The token is written under both the current and the legacy key. A
    /// response without a token leaves the store untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the envelope reports failure
    /// or the token cannot be stored.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<LoginResponse, ApiError> {
        let body = Body::json(&LoginRequest {
            email,
            password: password.expose_secret(),
        })?;

        let response: ApiResponse<LoginResponse> =
            self.client.post("/auth/login", Some(body)).await?;
        let login = handle_response(response)?;

        if let Some(token) = login.token() {
            self.client.set_token(token)?;
            tracing::info!("Signed in");
        } else {
            tracing::warn!("Login succeeded without a token");
        }

        Ok(login)
    }

    /// Forget the stored token. No request is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store cannot be written.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), ApiError> {
        self.client.clear_token()?;
        tracing::info!("Signed out");
        Ok(())
    }

    /// Whether a token is stored. The backend is not consulted.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store cannot be read.
    pub fn is_authenticated(&self) -> Result<bool, ApiError> {
        self.client.has_token()
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<Profile, ApiError> {
        let response: ApiResponse<Profile> = self.client.get("/auth/profile").await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip(self))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile, ApiError> {
        let response: ApiResponse<Profile> = self
            .client
            .put("/auth/profile", Some(Body::json(update)?))
            .await?;
        handle_response(response)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports failure.
    #[instrument(skip_all)]
    pub async fn change_password(
        &self,
        current_password: &SecretString,
        new_password: &SecretString,
    ) -> Result<(), ApiError> {
        let body = Body::json(&PasswordChange {
            current_password: current_password.expose_secret(),
            new_password: new_password.expose_secret(),
        })?;
        let response: ApiResponse<serde_json::Value> =
            self.client.put("/auth/change-password", Some(body)).await?;
        handle_empty_response(response)
    }
}
