//! Orders, coupons, reports and the other back-office services.

use axum::http::Method;
use chrono::NaiveDate;
use murti_admin::types::{DeliveryAssignment, GroupBy, InventoryQuery, OrderQuery, ReportRange};
use murti_core::{OrderId, OrderStatus, PaymentStatus, StockStatus, UserId};
use murti_integration_tests::{StubBackend, StubResponse};
use rust_decimal::Decimal;
use serde_json::{Value, json};

fn order_json(status: &str) -> Value {
    json!({
        "_id": "o1",
        "orderNumber": "MUR-1001",
        "items": [{"product": "p1", "name": "Brass Ganesha", "quantity": 2, "price": 1250}],
        "status": status,
        "paymentStatus": "paid",
        "totalAmount": 2500
    })
}

async fn backend(method: Method, path: &str, response: StubResponse) -> StubBackend {
    StubBackend::builder()
        .route(method, path, response)
        .start()
        .await
        .expect("stub backend should bind")
}

// =============================================================================
// Orders
// =============================================================================

#[tokio::test]
async fn test_order_list_filters() {
    let backend = backend(
        Method::GET,
        "/orders/admin/all",
        StubResponse::ok(json!({
            "orders": [order_json("pending")],
            "pagination": {"pages": 3, "page": 1, "total": 41}
        })),
    )
    .await;
    let api = backend.api(Some("t")).expect("client");

    let query = OrderQuery {
        status: Some(OrderStatus::OutForDelivery),
        payment_status: Some(PaymentStatus::Paid),
        start_date: NaiveDate::from_ymd_opt(2026, 1, 1),
        ..OrderQuery::default()
    };
    let page = api.orders().list(&query).await.expect("list");

    let request = backend.last_request().expect("request recorded");
    assert_eq!(
        request.query.as_deref(),
        Some("status=out_for_delivery&paymentStatus=paid&startDate=2026-01-01")
    );
    assert_eq!(page.pagination.total_pages, 3);
    let order = page.items.first().expect("one order");
    assert_eq!(order.total, Decimal::new(2500, 0));
}

#[tokio::test]
async fn test_order_status_update_body() {
    let backend = backend(
        Method::PATCH,
        "/orders/admin/o1/status",
        StubResponse::ok(order_json("shipped")),
    )
    .await;
    let api = backend.api(Some("t")).expect("client");

    let order = api
        .orders()
        .update_status(&OrderId::new("o1"), OrderStatus::Shipped, Some("Left the warehouse"))
        .await
        .expect("update status");

    assert_eq!(order.status, OrderStatus::Shipped);
    let request = backend.last_request().expect("request recorded");
    assert_eq!(
        request.json(),
        json!({"status": "shipped", "note": "Left the warehouse"})
    );
}

#[tokio::test]
async fn test_assign_in_house_delivery() {
    let backend = backend(
        Method::PATCH,
        "/orders/admin/o1/delivery",
        StubResponse::ok(order_json("out_for_delivery")),
    )
    .await;
    let api = backend.api(Some("t")).expect("client");

    api.orders()
        .assign_delivery(&OrderId::new("o1"), &DeliveryAssignment::in_house(UserId::new("u7")))
        .await
        .expect("assign");

    let body = backend.last_request().expect("request recorded").json();
    assert_eq!(body.get("deliveryPartner"), Some(&json!("u7")));
    assert_eq!(body.get("method"), Some(&json!("in_house")));
}

// =============================================================================
// Coupons
// =============================================================================

#[tokio::test]
async fn test_coupon_validation() {
    let backend = backend(
        Method::POST,
        "/coupons/validate",
        StubResponse::ok(json!({"discountAmount": 250, "finalAmount": 2250})),
    )
    .await;
    let api = backend.api(Some("t")).expect("client");

    let validation = api
        .coupons()
        .validate("DIWALI10", Decimal::new(2500, 0))
        .await
        .expect("validate");

    assert!(validation.valid);
    assert_eq!(validation.discount, Decimal::new(250, 0));
    assert_eq!(validation.final_amount, Some(Decimal::new(2250, 0)));
    assert_eq!(
        backend.last_request().expect("request recorded").json(),
        json!({"code": "DIWALI10", "orderAmount": 2500.0})
    );
}

// =============================================================================
// Reports and inventory
// =============================================================================

#[tokio::test]
async fn test_sales_report_range() {
    let backend = backend(
        Method::GET,
        "/reports/sales",
        StubResponse::ok(json!({
            "totalRevenue": 125_000,
            "totalOrders": 48,
            "averageOrderValue": 2604.17,
            "salesData": [{"date": "2026-03-01", "revenue": 5000, "orders": 2}]
        })),
    )
    .await;
    let api = backend.api(Some("t")).expect("client");

    let range = NaiveDate::from_ymd_opt(2026, 3, 1)
        .zip(NaiveDate::from_ymd_opt(2026, 3, 31))
        .map(|(start, end)| ReportRange::between(start, end).grouped_by(GroupBy::Week))
        .expect("valid dates");
    let report = api.reports().sales(&range).await.expect("sales");

    assert_eq!(report.total_orders, 48);
    assert_eq!(report.series.len(), 1);
    assert_eq!(
        backend.last_request().expect("request recorded").query.as_deref(),
        Some("startDate=2026-03-01&endDate=2026-03-31&groupBy=week")
    );
}

#[tokio::test]
async fn test_inventory_overview_stock_filter() {
    let backend = backend(
        Method::GET,
        "/inventory",
        StubResponse::ok(json!({
            "products": [{"_id": "p1", "name": "Brass Ganesha", "stock": 0, "price": 2499}]
        })),
    )
    .await;
    let api = backend.api(Some("t")).expect("client");

    let query = InventoryQuery {
        stock_status: Some(StockStatus::OutOfStock),
        ..InventoryQuery::default()
    };
    let page = api.inventory().overview(&query).await.expect("overview");

    let item = page.items.first().expect("one item");
    assert_eq!(item.stock_status(), StockStatus::OutOfStock);
    assert_eq!(
        backend.last_request().expect("request recorded").query.as_deref(),
        Some("stockStatus=out_of_stock")
    );
}
