//! HTTP request DTOs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::dto::{CreateOrderDto, NewItemDto, UpdateOrderDto};

/// Request to create an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Client name.
    pub client: String,
    /// Order date (`YYYY-MM-DD`); today when omitted.
    #[serde(default)]
    pub order_date: Option<NaiveDate>,
    /// Items to attach.
    #[serde(default)]
    pub items: Vec<ItemRequest>,
}

/// Request to merge changes into an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrderRequest {
    /// New client name.
    #[serde(default)]
    pub client: Option<String>,
    /// New order date.
    #[serde(default)]
    pub order_date: Option<NaiveDate>,
    /// Replacement items. Omit to keep the current ones.
    #[serde(default)]
    pub items: Option<Vec<ItemRequest>>,
}

/// A single item in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRequest {
    /// Product name.
    pub product: String,
    /// Quantity.
    pub quantity: i64,
    /// Unit price, as a JSON number or string.
    pub unit_price: Decimal,
}

impl From<ItemRequest> for NewItemDto {
    fn from(item: ItemRequest) -> Self {
        Self {
            product: item.product,
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}

impl From<CreateOrderRequest> for CreateOrderDto {
    fn from(request: CreateOrderRequest) -> Self {
        Self {
            client: request.client,
            order_date: request.order_date,
            items: request.items.into_iter().map(NewItemDto::from).collect(),
        }
    }
}

impl From<UpdateOrderRequest> for UpdateOrderDto {
    fn from(request: UpdateOrderRequest) -> Self {
        Self {
            client: request.client,
            order_date: request.order_date,
            items: request
                .items
                .map(|items| items.into_iter().map(NewItemDto::from).collect()),
        }
    }
}
