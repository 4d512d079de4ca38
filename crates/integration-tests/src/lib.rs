//! Integration test harness for the Murti admin client.
//!
//! [`StubBackend`] is an in-process axum server standing in for the store
//! REST API. Tests register canned responses per method and path, point a
//! client at [`StubBackend::base_url`], then inspect exactly what the client
//! sent.
//!
//! ```rust,ignore
//! let backend = StubBackend::builder()
//!     .route(Method::GET, "/products", StubResponse::ok(json!([])))
//!     .start()
//!     .await?;
//! let api = backend.api(None)?;
//! api.products().list(&ProductQuery::default()).await?;
//! assert_eq!(backend.last_request().map(|r| r.path), Some("/api/products".into()));
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::Router;
use axum::body::{Bytes, to_bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use murti_admin::{AdminApi, ApiError, ClientConfig, MemoryTokenStore, TokenStore};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Path prefix every stub route is mounted under, mirroring the real API.
pub const API_PREFIX: &str = "/api";

/// A canned response for one method and path.
#[derive(Debug, Clone)]
pub struct StubResponse {
    status: StatusCode,
    body: String,
    delay: Duration,
}

impl StubResponse {
    /// A JSON body with the given status.
    #[must_use]
    pub fn json(status: StatusCode, body: &Value) -> Self {
        Self::raw(status, body.to_string())
    }

    /// A successful envelope wrapping `data`.
    #[must_use]
    pub fn ok(data: Value) -> Self {
        Self::json(StatusCode::OK, &json!({ "success": true, "data": data }))
    }

    /// A body sent verbatim.
    #[must_use]
    pub fn raw(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    /// Hold the response back for `delay` before answering.
    #[must_use]
    pub const fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// What the client sent for one request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path including the `/api` prefix.
    pub path: String,
    /// Raw query string, without the leading `?`.
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[must_use]
    pub fn authorization(&self) -> Option<&str> {
        self.header(header::AUTHORIZATION.as_str())
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header(header::CONTENT_TYPE.as_str())
    }

    /// The body parsed as JSON, or `null` when it is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

type Routes = HashMap<(Method, String), StubResponse>;

#[derive(Clone)]
struct Shared {
    routes: Arc<Routes>,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Collects routes before the server starts.
#[derive(Debug, Default)]
pub struct StubBackendBuilder {
    routes: Routes,
}

impl StubBackendBuilder {
    /// Answer `method path` with `response`. `path` is relative to `/api`.
    #[must_use]
    pub fn route(mut self, method: Method, path: &str, response: StubResponse) -> Self {
        self.routes
            .insert((method, format!("{API_PREFIX}{path}")), response);
        self
    }

    /// Bind an ephemeral local port and start serving.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start(self) -> std::io::Result<StubBackend> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let shared = Shared {
            routes: Arc::new(self.routes),
            recorded: Arc::new(Mutex::new(Vec::new())),
        };
        let recorded = Arc::clone(&shared.recorded);
        let app = Router::new().fallback(handle).with_state(shared);

        let task = tokio::spawn(async move {
            // Only ends when aborted on drop
            let _ = axum::serve(listener, app).await;
        });

        Ok(StubBackend {
            base_url: format!("http://{addr}{API_PREFIX}"),
            recorded,
            task,
        })
    }
}

/// A running stub backend. The server stops when this is dropped.
pub struct StubBackend {
    base_url: String,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
    task: JoinHandle<()>,
}

impl StubBackend {
    #[must_use]
    pub fn builder() -> StubBackendBuilder {
        StubBackendBuilder::default()
    }

    /// Base URL including the `/api` prefix.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Client configuration pointing at this backend.
    #[must_use]
    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            ..ClientConfig::default()
        }
    }

    /// An API handle with an in-memory token store, optionally pre-seeded.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn api(&self, token: Option<&str>) -> Result<AdminApi, ApiError> {
        let store: Arc<dyn TokenStore> = Arc::new(
            token.map_or_else(MemoryTokenStore::new, MemoryTokenStore::with_token),
        );
        AdminApi::connect(&self.config(), store)
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests().pop()
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn handle(State(shared): State<Shared>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, usize::MAX).await.unwrap_or_default();
    let path = parts.uri.path().to_string();
    let canned = shared.routes.get(&(parts.method.clone(), path.clone())).cloned();

    shared
        .recorded
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(RecordedRequest {
            method: parts.method,
            path,
            query: parts.uri.query().map(str::to_owned),
            headers: parts.headers,
            body,
        });

    let Some(canned) = canned else {
        return (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            json!({ "success": false, "message": "Route not found" }).to_string(),
        )
            .into_response();
    };

    if !canned.delay.is_zero() {
        tokio::time::sleep(canned.delay).await;
    }

    (
        canned.status,
        [(header::CONTENT_TYPE, "application/json")],
        canned.body,
    )
        .into_response()
}
