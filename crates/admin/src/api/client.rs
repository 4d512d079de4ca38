//! HTTP client with auth header injection, timeout and error normalization.
//!
//! Every call to the store backend goes through [`ApiClient`]. It appends the
//! endpoint path to the configured base URL, attaches `Authorization: Bearer`
//! when the token store has a token, and turns the response into either the
//! decoded body or an [`ApiError`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::instrument;

use super::body::Body;
use super::token::{MemoryTokenStore, TokenStore};
use crate::config::ClientConfig;
use crate::error::ApiError;

/// HTTP client for the store REST API.
///
/// Cheap to clone; clones share the connection pool and the token store.
/// Calls are independent of each other: no retries, caching, queueing or
/// de-duplication happen here.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a client that reads its bearer token from `tokens`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the underlying HTTP client cannot be
    /// built (e.g. the TLS backend fails to initialize).
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                timeout: config.timeout,
                tokens,
            }),
        })
    }

    /// Create a client with its own empty in-memory token store.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::new`].
    pub fn with_memory_store(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::new(config, Arc::new(MemoryTokenStore::new()))
    }

    /// Base URL every endpoint path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Timeout applied to every request.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// The token store consulted on every request.
    #[must_use]
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.inner.tokens
    }

    /// Store a token for subsequent requests.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::TokenStore` if the store cannot be written.
    pub fn set_token(&self, token: &SecretString) -> Result<(), ApiError> {
        self.inner.tokens.set(token)?;
        Ok(())
    }

    /// Remove the stored token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::TokenStore` if the store cannot be written.
    pub fn clear_token(&self) -> Result<(), ApiError> {
        self.inner.tokens.clear()?;
        Ok(())
    }

    /// Whether a token is currently stored. Says nothing about its validity.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::TokenStore` if the store cannot be read.
    pub fn has_token(&self) -> Result<bool, ApiError> {
        Ok(self.inner.tokens.get()?.is_some())
    }

    // =========================================================================
    // Verbs
    // =========================================================================

    /// Send a GET request to a relative API path.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Timeout`, `ApiError::Http`, `ApiError::Transport`
    /// or `ApiError::Decode`; see [`ApiError`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, None).await
    }

    /// Send a POST request with an optional body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<Body>,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, path, body).await
    }

    /// Send a PUT request with an optional body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<Body>,
    ) -> Result<T, ApiError> {
        self.request(Method::PUT, path, body).await
    }

    /// Send a PATCH request with an optional body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<Body>,
    ) -> Result<T, ApiError> {
        self.request(Method::PATCH, path, body).await
    }

    /// Send a DELETE request to a relative API path.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, None).await
    }

    // =========================================================================
    // Execution
    // =========================================================================

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.inner.base_url)
        } else {
            format!("{}/{path}", self.inner.base_url)
        }
    }

    #[instrument(skip(self, body), fields(method = %method, path = %path))]
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Body>,
    ) -> Result<T, ApiError> {
        let mut builder = self.inner.client.request(method, self.url(path));

        if let Some(token) = self.inner.tokens.get()? {
            builder = builder.bearer_auth(token.expose_secret());
        }

        builder = match body {
            Some(Body::Json(value)) => builder.json(&value),
            // No explicit Content-Type: reqwest sets multipart/form-data with the boundary
            Some(Body::Multipart(form)) => builder.multipart(form),
            None => builder,
        };

        let started = Instant::now();
        let exchange = async {
            let response = builder.send().await?;
            let status = response.status();
            let bytes = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, bytes))
        };

        // Dropping the exchange future on expiry aborts the in-flight request.
        let (status, bytes) = match tokio::time::timeout(self.inner.timeout, exchange).await {
            Ok(Ok(settled)) => settled,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Request failed in transport");
                return Err(ApiError::Transport(e));
            }
            Err(_) => {
                tracing::warn!(timeout = ?self.inner.timeout, "Request timed out");
                return Err(ApiError::Timeout(self.inner.timeout));
            }
        };

        tracing::debug!(
            status = status.as_u16(),
            elapsed = ?started.elapsed(),
            "Request settled"
        );

        decode_response(status, &bytes)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

/// Turn a settled response into the decoded body or an error.
fn decode_response<T: DeserializeOwned>(status: StatusCode, bytes: &[u8]) -> Result<T, ApiError> {
    if !status.is_success() {
        // Best effort: an unreadable error body counts as an empty object
        let body = serde_json::from_slice::<serde_json::Value>(bytes)
            .unwrap_or_else(|_| serde_json::Value::Object(serde_json::Map::new()));
        let err = ApiError::from_status(status, &body);
        tracing::warn!(status = status.as_u16(), error = %err, "Backend returned an error status");
        return Err(err);
    }

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_value(serde_json::Value::Null)?);
    }

    Ok(serde_json::from_slice(bytes)?)
}
