//! Transport behaviour of the HTTP client against the stub backend.
//!
//! Covers header injection, body encoding, status mapping and the request
//! timeout. Service-specific paths live in the other test files.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::{Method, StatusCode};
use murti_admin::{AdminApi, ApiError, MemoryTokenStore};
use murti_integration_tests::{StubBackend, StubResponse};
use serde_json::{Value, json};

async fn backend_with(routes: &[(Method, &str, StubResponse)]) -> StubBackend {
    routes
        .iter()
        .fold(StubBackend::builder(), |builder, (method, path, response)| {
            builder.route(method.clone(), path, response.clone())
        })
        .start()
        .await
        .expect("stub backend should bind")
}

// =============================================================================
// Headers
// =============================================================================

#[tokio::test]
async fn test_bearer_token_sent_on_every_verb() {
    let ok = StubResponse::ok(json!({}));
    let backend = backend_with(&[
        (Method::GET, "/ping", ok.clone()),
        (Method::POST, "/ping", ok.clone()),
        (Method::PUT, "/ping", ok.clone()),
        (Method::PATCH, "/ping", ok.clone()),
        (Method::DELETE, "/ping", ok),
    ])
    .await;
    let api = backend.api(Some("secret-token")).expect("client");
    let client = api.client();

    let _: Value = client.get("/ping").await.expect("get");
    let _: Value = client.post("/ping", None).await.expect("post");
    let _: Value = client.put("/ping", None).await.expect("put");
    let _: Value = client.patch("/ping", None).await.expect("patch");
    let _: Value = client.delete("/ping").await.expect("delete");

    let requests = backend.requests();
    assert_eq!(requests.len(), 5);
    for request in &requests {
        assert_eq!(
            request.authorization(),
            Some("Bearer secret-token"),
            "{} should carry the token",
            request.method
        );
    }
}

#[tokio::test]
async fn test_no_authorization_header_on_any_verb_without_token() {
    let ok = StubResponse::ok(json!({}));
    let backend = backend_with(&[
        (Method::GET, "/ping", ok.clone()),
        (Method::POST, "/ping", ok.clone()),
        (Method::PUT, "/ping", ok.clone()),
        (Method::PATCH, "/ping", ok.clone()),
        (Method::DELETE, "/ping", ok),
    ])
    .await;
    let api = backend.api(None).expect("client");
    let client = api.client();

    let _: Value = client.get("/ping").await.expect("get");
    let _: Value = client.post("/ping", None).await.expect("post");
    let _: Value = client.put("/ping", None).await.expect("put");
    let _: Value = client.patch("/ping", None).await.expect("patch");
    let _: Value = client.delete("/ping").await.expect("delete");

    let requests = backend.requests();
    let methods: Vec<_> = requests.iter().map(|r| r.method.clone()).collect();
    assert_eq!(
        methods,
        [Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE]
    );
    for request in &requests {
        assert_eq!(
            request.authorization(),
            None,
            "{} should be sent without a token",
            request.method
        );
    }
}

#[tokio::test]
async fn test_json_body_sets_content_type() {
    let backend = backend_with(&[(Method::POST, "/echo", StubResponse::ok(json!({})))]).await;
    let api = backend.api(None).expect("client");

    let body = murti_admin::Body::json(&json!({"name": "Ganesha"})).expect("body");
    let _: Value = api.client().post("/echo", Some(body)).await.expect("post");

    let request = backend.last_request().expect("request recorded");
    assert_eq!(request.content_type(), Some("application/json"));
    assert_eq!(request.json(), json!({"name": "Ganesha"}));
}

// =============================================================================
// Status and body mapping
// =============================================================================

#[tokio::test]
async fn test_error_status_uses_backend_message() {
    let backend = backend_with(&[(
        Method::GET,
        "/products/missing",
        StubResponse::json(
            StatusCode::NOT_FOUND,
            &json!({"success": false, "message": "Product not found"}),
        ),
    )])
    .await;
    let api = backend.api(None).expect("client");

    let err = api
        .client()
        .get::<Value>("/products/missing")
        .await
        .expect_err("404 should fail");

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(err.to_string(), "Product not found");
}

#[tokio::test]
async fn test_error_status_with_unreadable_body_falls_back() {
    let backend = backend_with(&[(
        Method::GET,
        "/broken",
        StubResponse::raw(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
    )])
    .await;
    let api = backend.api(None).expect("client");

    let err = api
        .client()
        .get::<Value>("/broken")
        .await
        .expect_err("500 should fail");

    assert_eq!(err.to_string(), "HTTP error! status: 500");
}

#[tokio::test]
async fn test_empty_success_body_decodes_as_null() {
    let backend = backend_with(&[(Method::DELETE, "/things/1", StubResponse::raw(StatusCode::OK, ""))]).await;
    let api = backend.api(None).expect("client");

    let value: Value = api.client().delete("/things/1").await.expect("delete");
    assert_eq!(value, Value::Null);
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let backend = backend_with(&[(Method::GET, "/garbled", StubResponse::raw(StatusCode::OK, "{not json"))]).await;
    let api = backend.api(None).expect("client");

    let err = api
        .client()
        .get::<Value>("/garbled")
        .await
        .expect_err("garbled body should fail");

    assert!(matches!(err, ApiError::Decode(_)));
}

// =============================================================================
// Timeout
// =============================================================================

#[tokio::test]
async fn test_slow_backend_times_out() {
    let backend = backend_with(&[(
        Method::GET,
        "/slow",
        StubResponse::ok(json!({})).delayed(Duration::from_secs(5)),
    )])
    .await;
    let timeout = Duration::from_millis(200);
    let config = backend.config().with_timeout(timeout);
    let api = AdminApi::connect(&config, Arc::new(MemoryTokenStore::new())).expect("client");

    let started = Instant::now();
    let err = api
        .client()
        .get::<Value>("/slow")
        .await
        .expect_err("slow request should time out");
    let elapsed = started.elapsed();

    assert!(err.is_timeout(), "expected timeout, got {err:?}");
    assert!(elapsed >= timeout);
    assert!(elapsed < Duration::from_secs(5), "request was not aborted");
}

#[tokio::test]
async fn test_fast_backend_within_timeout() {
    let backend = backend_with(&[(
        Method::GET,
        "/quick",
        StubResponse::ok(json!({"pong": true})).delayed(Duration::from_millis(20)),
    )])
    .await;
    let config = backend.config().with_timeout(Duration::from_secs(2));
    let api = AdminApi::connect(&config, Arc::new(MemoryTokenStore::new())).expect("client");

    let value: Value = api.client().get("/quick").await.expect("get");
    assert_eq!(value.pointer("/data/pong"), Some(&json!(true)));
}
