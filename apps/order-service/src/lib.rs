// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Order Service - Rust Core Library
//!
//! Order ("pedido") records with exclusively owned items, persisted in a
//! relational store and served over REST.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Order aggregate, item entity, value objects, repository port
//! - **Application**: `OrderService` (merge updates, cascading deletes) and DTOs
//! - **Infrastructure**: Adapters
//!   - `persistence`: SQLite (`sqlx`) and in-memory order repositories
//!   - `http`: axum router under `/pedidos`
//!
//! Ambient modules: `config` (YAML + env interpolation), `telemetry`
//! (tracing subscriber), `observability` (Prometheus metrics), `error`
//! (HTTP error codes), `report` (plain-text listing).

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Order service and DTOs.
pub mod application;

/// Infrastructure layer - Persistence and HTTP adapters.
pub mod infrastructure;

// =============================================================================
// Ambient Modules
// =============================================================================

pub mod config;
pub mod error;
pub mod observability;
pub mod report;
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use application::{CreateOrderDto, OrderDto, OrderService, UpdateOrderDto};
pub use domain::order::{Order, OrderError, OrderItem, OrderRepository};
pub use domain::shared::{ItemId, Money, OrderId, Quantity};
pub use error::{ApiError, ErrorCode};
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::persistence::{InMemoryOrderRepository, SqliteOrderRepository};
