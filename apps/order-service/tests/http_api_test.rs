//! HTTP API Integration Tests
//!
//! Drives the full stack (router → order service → repository) through
//! `tower::ServiceExt::oneshot`, against both repository adapters.

// Allow unwrap in tests - tests should panic on unexpected errors
#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use order_service::infrastructure::http::{ApiErrorResponse, OrderResponse};
use order_service::{
    AppState, InMemoryOrderRepository, OrderId, OrderRepository, SqliteOrderRepository,
    create_router,
};

// =============================================================================
// Helpers
// =============================================================================

fn in_memory_app() -> (Router, Arc<InMemoryOrderRepository>) {
    let repo = Arc::new(InMemoryOrderRepository::new());
    let app = create_router(AppState::new(Arc::clone(&repo), "test"));
    (app, repo)
}

async fn sqlite_app() -> (Router, Arc<SqliteOrderRepository>) {
    let repo = Arc::new(SqliteOrderRepository::in_memory().await.unwrap());
    let app = create_router(AppState::new(Arc::clone(&repo), "test"));
    (app, repo)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn create_ana(app: &Router) -> OrderResponse {
    let (status, body) = send(
        app,
        "POST",
        "/pedidos",
        Some(json!({
            "client": "Ana",
            "items": [{"product": "Phone", "quantity": 1, "unit_price": 1500.00}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_slice(&body).unwrap()
}

fn error_code(body: &[u8]) -> String {
    serde_json::from_slice::<ApiErrorResponse>(body).unwrap().code
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn create_then_read_back_matches() {
    let (app, _) = in_memory_app();
    let created = create_ana(&app).await;

    let (status, body) = send(&app, "GET", &format!("/pedidos/{}", created.id), None).await;
    assert_eq!(status, StatusCode::OK);

    let read: OrderResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(read, created);
    assert_eq!(read.client, "Ana");
    assert_eq!(read.items.len(), 1);
    assert_eq!(read.items[0].product, "Phone");
    assert_eq!(read.items[0].quantity, 1);
    assert_eq!(read.items[0].unit_price, "1500.00");
    assert_eq!(read.items[0].order_id, created.id);
}

#[tokio::test]
async fn rename_with_empty_items_clears_items() {
    let (app, repo) = in_memory_app();
    let created = create_ana(&app).await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/pedidos/{}", created.id),
        Some(json!({"client": "Ana Paula", "items": []})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", &format!("/pedidos/{}", created.id), None).await;
    let read: OrderResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(read.client, "Ana Paula");
    assert!(read.items.is_empty());
    assert_eq!(repo.item_count().unwrap(), 0);
}

#[tokio::test]
async fn partial_update_keeps_absent_fields() {
    let (app, _) = in_memory_app();
    let created = create_ana(&app).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/pedidos/{}", created.id),
        Some(json!({"order_date": "2023-12-24"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let updated: OrderResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(updated.client, "Ana");
    assert_eq!(updated.order_date.to_string(), "2023-12-24");
    assert_eq!(updated.items.len(), 1);
    assert_eq!(updated.items[0].product, "Phone");
}

#[tokio::test]
async fn list_groups_items_under_each_order() {
    let (app, _) = in_memory_app();
    send(
        &app,
        "POST",
        "/pedidos",
        Some(json!({
            "client": "Maria",
            "order_date": "2024-01-10",
            "items": [
                {"product": "Headphones", "quantity": 1, "unit_price": "120.00"},
                {"product": "USB cable", "quantity": 3, "unit_price": "10.00"}
            ]
        })),
    )
    .await;
    send(&app, "POST", "/pedidos", Some(json!({"client": "Bruno"}))).await;

    let (status, body) = send(&app, "GET", "/pedidos", None).await;
    assert_eq!(status, StatusCode::OK);

    let orders: Vec<OrderResponse> = serde_json::from_slice(&body).unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].client, "Maria");
    assert_eq!(orders[0].items.len(), 2);
    assert_eq!(orders[1].client, "Bruno");
    assert!(orders[1].items.is_empty());
}

#[tokio::test]
async fn delete_returns_no_content_then_not_found() {
    let (app, repo) = in_memory_app();
    let created = create_ana(&app).await;
    let uri = format!("/pedidos/{}", created.id);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
    assert_eq!(repo.item_count().unwrap(), 0);

    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "ORDER_NOT_FOUND");

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_order_update_is_not_found() {
    let (app, _) = in_memory_app();

    let (status, body) = send(&app, "PUT", "/pedidos/99", Some(json!({"client": "Ana"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "ORDER_NOT_FOUND");
}

#[tokio::test]
async fn invalid_fields_are_unprocessable() {
    let (app, repo) = in_memory_app();

    for payload in [
        json!({"client": "   "}),
        json!({"client": "Ana", "items": [{"product": "Phone", "quantity": 0, "unit_price": 1}]}),
        json!({"client": "Ana", "items": [{"product": "Phone", "quantity": 1, "unit_price": -5}]}),
        json!({"client": "Ana", "items": [{"product": "", "quantity": 1, "unit_price": 1}]}),
        json!({"client": "x".repeat(101)}),
    ] {
        let (status, body) = send(&app, "POST", "/pedidos", Some(payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error_code(&body), "VALIDATION_ERROR");
    }

    assert!(repo.is_empty().unwrap());
}

#[tokio::test]
async fn missing_client_is_bad_request() {
    let (app, _) = in_memory_app();

    let (status, body) = send(&app, "POST", "/pedidos", Some(json!({"items": []}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "INVALID_REQUEST");
}

// =============================================================================
// SQLite-backed stack
// =============================================================================

#[tokio::test]
async fn sqlite_full_lifecycle() {
    let (app, repo) = sqlite_app().await;
    let created = create_ana(&app).await;
    let id = OrderId::new(created.id);
    assert_eq!(repo.count_items(Some(id)).await.unwrap(), 1);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/pedidos/{}", created.id),
        Some(json!({
            "items": [
                {"product": "Charger", "quantity": 2, "unit_price": "35.5"},
                {"product": "Case", "quantity": 1, "unit_price": "49.999"}
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: OrderResponse = serde_json::from_slice(&body).unwrap();
    let prices: Vec<_> = updated.items.iter().map(|i| i.unit_price.as_str()).collect();
    assert_eq!(prices, vec!["35.50", "50.00"]);

    let stored = repo.find_by_id(id).await.unwrap().unwrap();
    let products: Vec<_> = stored.items().iter().map(|i| i.product()).collect();
    assert_eq!(products, vec!["Charger", "Case"]);
    assert_eq!(repo.count_items(None).await.unwrap(), 2);

    let (status, _) = send(&app, "DELETE", &format!("/pedidos/{}", created.id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(repo.count_items(None).await.unwrap(), 0);
    assert!(repo.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn sqlite_health_reports_version() {
    let (app, _) = sqlite_app().await;

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);

    let health: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["version"], "test");
}
