//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to the order service.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::application::services::OrderService;
use crate::domain::order::OrderRepository;
use crate::domain::shared::OrderId;
use crate::error::ApiError;

use super::request::{CreateOrderRequest, UpdateOrderRequest};
use super::response::{HealthResponse, OrderResponse};

/// Application state shared across handlers.
pub struct AppState<R>
where
    R: OrderRepository,
{
    /// Order service.
    pub order_service: Arc<OrderService<R>>,
    /// Application version.
    pub version: String,
}

impl<R> AppState<R>
where
    R: OrderRepository,
{
    /// Build state around a repository.
    pub fn new(repo: Arc<R>, version: impl Into<String>) -> Self {
        Self {
            order_service: Arc::new(OrderService::new(repo)),
            version: version.into(),
        }
    }
}

impl<R> Clone for AppState<R>
where
    R: OrderRepository,
{
    fn clone(&self) -> Self {
        Self {
            order_service: Arc::clone(&self.order_service),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<R>(state: AppState<R>) -> Router
where
    R: OrderRepository + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/pedidos", get(list_orders).post(create_order))
        .route(
            "/pedidos/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check<R>(State(state): State<AppState<R>>) -> impl IntoResponse
where
    R: OrderRepository,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

async fn list_orders<R>(
    State(state): State<AppState<R>>,
) -> Result<Json<Vec<OrderResponse>>, ApiError>
where
    R: OrderRepository,
{
    let orders = state.order_service.list_orders().await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

async fn get_order<R>(
    State(state): State<AppState<R>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<OrderResponse>, ApiError>
where
    R: OrderRepository,
{
    let id = order_id(id)?;
    let order = state.order_service.get_order(id).await?;
    Ok(Json(order.into()))
}

async fn create_order<R>(
    State(state): State<AppState<R>>,
    request: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError>
where
    R: OrderRepository,
{
    let Json(request) = request.map_err(|e| ApiError::invalid_request(e.body_text()))?;
    let order = state.order_service.create_order(request.into()).await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

async fn update_order<R>(
    State(state): State<AppState<R>>,
    id: Result<Path<i64>, PathRejection>,
    request: Result<Json<UpdateOrderRequest>, JsonRejection>,
) -> Result<Json<OrderResponse>, ApiError>
where
    R: OrderRepository,
{
    let id = order_id(id)?;
    let Json(request) = request.map_err(|e| ApiError::invalid_request(e.body_text()))?;
    let order = state.order_service.update_order(id, request.into()).await?;
    Ok(Json(order.into()))
}

async fn delete_order<R>(
    State(state): State<AppState<R>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError>
where
    R: OrderRepository,
{
    let id = order_id(id)?;
    state.order_service.delete_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn order_id(path: Result<Path<i64>, PathRejection>) -> Result<OrderId, ApiError> {
    path.map(|Path(id)| OrderId::new(id))
        .map_err(|e| ApiError::invalid_request(e.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::ApiErrorResponse;
    use crate::infrastructure::persistence::InMemoryOrderRepository;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn create_test_state() -> AppState<InMemoryOrderRepository> {
        AppState::new(Arc::new(InMemoryOrderRepository::new()), "1.0.0-test")
    }

    #[tokio::test]
    async fn health_check_returns_ok() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/pedidos/abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/pedidos")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
