//! HTTP response DTOs.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::dto::{ItemDto, OrderDto};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// A stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResponse {
    /// Order ID.
    pub id: i64,
    /// Client name.
    pub client: String,
    /// Order date.
    pub order_date: NaiveDate,
    /// Items.
    pub items: Vec<ItemResponse>,
}

/// A stored item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResponse {
    /// Item ID.
    pub id: i64,
    /// Parent order ID.
    pub order_id: i64,
    /// Product name.
    pub product: String,
    /// Quantity.
    pub quantity: u32,
    /// Unit price with two decimal places.
    pub unit_price: String,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Error code string.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Additional details.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub details: HashMap<String, String>,
}

impl From<ItemDto> for ItemResponse {
    fn from(dto: ItemDto) -> Self {
        Self {
            id: dto.id.value(),
            order_id: dto.order_id.value(),
            product: dto.product,
            quantity: dto.quantity,
            unit_price: format!("{:.2}", dto.unit_price),
        }
    }
}

impl From<OrderDto> for OrderResponse {
    fn from(dto: OrderDto) -> Self {
        Self {
            id: dto.id.value(),
            client: dto.client,
            order_date: dto.order_date,
            items: dto.items.into_iter().map(ItemResponse::from).collect(),
        }
    }
}
