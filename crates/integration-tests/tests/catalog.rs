//! Product and category services against the stub backend.

use axum::http::{Method, StatusCode};
use murti_admin::FileUpload;
use murti_admin::types::{CategoryQuery, ProductInput, ProductQuery, StatusFilter, StockUpdate};
use murti_core::{CategoryId, ProductId, StockStatus};
use murti_integration_tests::{StubBackend, StubResponse};
use rust_decimal::Decimal;
use serde_json::{Value, json};

fn product_json(id: &str, name: &str, stock: u32) -> Value {
    json!({
        "_id": id,
        "name": name,
        "price": 2499,
        "stock": stock,
        "category": {"_id": "c1", "name": "Brass Idols"},
        "isActive": true,
        "isFeatured": false
    })
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_product_list_sends_query_and_reads_pagination() {
    let backend = StubBackend::builder()
        .route(
            Method::GET,
            "/products",
            StubResponse::ok(json!({
                "products": [product_json("p1", "Brass Ganesha", 12)],
                "pagination": {"totalPages": 5, "currentPage": 2, "total": 96}
            })),
        )
        .start()
        .await
        .expect("stub backend should bind");
    let api = backend.api(Some("t")).expect("client");

    let query = ProductQuery {
        page: Some(2),
        limit: Some(20),
        search: Some("idol".to_string()),
        ..ProductQuery::default()
    };
    let page = api.products().list(&query).await.expect("list");

    let request = backend.last_request().expect("request recorded");
    assert_eq!(request.path, "/api/products");
    assert_eq!(request.query.as_deref(), Some("page=2&limit=20&search=idol"));

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.pagination.total_pages, 5);
    assert_eq!(page.pagination.current_page, 2);
    assert_eq!(page.pagination.total, 96);
}

#[tokio::test]
async fn test_product_list_without_pagination_is_single_page() {
    let backend = StubBackend::builder()
        .route(
            Method::GET,
            "/products",
            StubResponse::ok(json!([
                product_json("p1", "Brass Ganesha", 12),
                product_json("p2", "Marble Lakshmi", 0)
            ])),
        )
        .start()
        .await
        .expect("stub backend should bind");
    let api = backend.api(None).expect("client");

    let page = api
        .products()
        .list(&ProductQuery::default())
        .await
        .expect("list");

    let request = backend.last_request().expect("request recorded");
    assert_eq!(request.query, None, "empty query should add no '?'");
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.pagination.total_pages, 1);
    assert_eq!(page.pagination.current_page, 1);
    assert_eq!(page.pagination.total, 2);
    assert!(!page.pagination.has_next());
}

#[tokio::test]
async fn test_product_list_encodes_filters() {
    let backend = StubBackend::builder()
        .route(Method::GET, "/products", StubResponse::ok(json!({"products": []})))
        .start()
        .await
        .expect("stub backend should bind");
    let api = backend.api(None).expect("client");

    let query = ProductQuery {
        search: Some("shiva & parvati".to_string()),
        status: Some(StatusFilter::Inactive),
        featured: Some(true),
        ..ProductQuery::default()
    };
    let page = api.products().list(&query).await.expect("list");

    let request = backend.last_request().expect("request recorded");
    assert_eq!(
        request.query.as_deref(),
        Some("search=shiva%20%26%20parvati&status=inactive&featured=true")
    );
    assert!(page.items.is_empty());
}

// =============================================================================
// Mutations
// =============================================================================

#[tokio::test]
async fn test_create_product_with_image_is_multipart() {
    let backend = StubBackend::builder()
        .route(
            Method::POST,
            "/products",
            StubResponse::ok(product_json("p9", "Brass Ganesha", 5)),
        )
        .start()
        .await
        .expect("stub backend should bind");
    let api = backend.api(Some("t")).expect("client");

    let input = ProductInput::new("Brass Ganesha", Decimal::new(2499, 0), CategoryId::new("c1"), 5);
    let image = FileUpload::new("images", "ganesha.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF]);
    let product = api
        .products()
        .create_with_images(&input, vec![image])
        .await
        .expect("create");

    assert_eq!(product.id, ProductId::new("p9"));

    let request = backend.last_request().expect("request recorded");
    let content_type = request.content_type().expect("content type");
    assert!(
        content_type.starts_with("multipart/form-data; boundary="),
        "unexpected content type {content_type}"
    );
    let body = request.body_text();
    assert!(body.contains(r#"name="name""#));
    assert!(body.contains("Brass Ganesha"));
    assert!(body.contains(r#"name="images"; filename="ganesha.jpg""#));
    assert_eq!(request.authorization(), Some("Bearer t"));
}

#[tokio::test]
async fn test_toggle_status_without_token_is_unauthorized() {
    let backend = StubBackend::builder()
        .route(
            Method::PATCH,
            "/products/p1/toggle-status",
            StubResponse::json(
                StatusCode::UNAUTHORIZED,
                &json!({"success": false, "message": "Unauthorized"}),
            ),
        )
        .start()
        .await
        .expect("stub backend should bind");
    let api = backend.api(None).expect("client");

    let err = api
        .products()
        .toggle_status(&ProductId::new("p1"))
        .await
        .expect_err("401 should fail");

    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Unauthorized");
    let request = backend.last_request().expect("request still sent");
    assert_eq!(request.authorization(), None);
}

#[tokio::test]
async fn test_stock_update_body() {
    let backend = StubBackend::builder()
        .route(
            Method::PATCH,
            "/products/p1/inventory",
            StubResponse::ok(product_json("p1", "Brass Ganesha", 3)),
        )
        .start()
        .await
        .expect("stub backend should bind");
    let api = backend.api(Some("t")).expect("client");

    let product = api
        .products()
        .update_stock(
            &ProductId::new("p1"),
            &StockUpdate::subtract(2).with_reason("damaged in transit"),
        )
        .await
        .expect("update stock");

    assert_eq!(product.stock_status(), StockStatus::LowStock);
    let request = backend.last_request().expect("request recorded");
    assert_eq!(
        request.json(),
        json!({"quantity": 2, "operation": "subtract", "reason": "damaged in transit"})
    );
}

#[tokio::test]
async fn test_failed_envelope_surfaces_message() {
    let backend = StubBackend::builder()
        .route(
            Method::DELETE,
            "/products/p1",
            StubResponse::json(
                StatusCode::OK,
                &json!({"success": false, "message": "Product has open orders"}),
            ),
        )
        .start()
        .await
        .expect("stub backend should bind");
    let api = backend.api(Some("t")).expect("client");

    let err = api
        .products()
        .delete(&ProductId::new("p1"))
        .await
        .expect_err("failed envelope");

    assert_eq!(err.to_string(), "Product has open orders");
}

#[tokio::test]
async fn test_category_list_reads_categories_key() {
    let backend = StubBackend::builder()
        .route(
            Method::GET,
            "/categories",
            StubResponse::ok(json!({
                "categories": [
                    {"_id": "c1", "name": "Brass Idols", "slug": "brass-idols"},
                    {"_id": "c2", "name": "Marble Idols", "parent": "c1"}
                ]
            })),
        )
        .start()
        .await
        .expect("stub backend should bind");
    let api = backend.api(None).expect("client");

    let page = api
        .categories()
        .list(&CategoryQuery::default())
        .await
        .expect("list");

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.pagination.total, 2);
}
