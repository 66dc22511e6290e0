//! Order DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order::{Order, OrderError, OrderItem};
use crate::domain::shared::{ItemId, OrderId};

/// An item as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItemDto {
    /// Product name.
    pub product: String,
    /// Quantity; must be positive.
    pub quantity: i64,
    /// Unit price.
    pub unit_price: Decimal,
}

impl NewItemDto {
    /// Convert a list of caller items into domain items.
    ///
    /// Field names in validation errors carry the item position,
    /// e.g. `items[1].quantity`.
    ///
    /// # Errors
    ///
    /// Returns the first validation error found.
    pub fn to_domain_items(items: &[Self]) -> Result<Vec<OrderItem>, OrderError> {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                OrderItem::new(&item.product, item.quantity, item.unit_price).map_err(|err| {
                    match err {
                        OrderError::Validation { field, message } => OrderError::Validation {
                            field: format!("items[{index}].{field}"),
                            message,
                        },
                        other => other,
                    }
                })
            })
            .collect()
    }
}

/// DTO for creating an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderDto {
    /// Client name.
    pub client: String,
    /// Order date; today when absent.
    pub order_date: Option<NaiveDate>,
    /// Items.
    pub items: Vec<NewItemDto>,
}

/// DTO for a merge update: absent fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOrderDto {
    /// New client name.
    pub client: Option<String>,
    /// New order date.
    pub order_date: Option<NaiveDate>,
    /// Replacement item list; `Some(vec![])` removes every item.
    pub items: Option<Vec<NewItemDto>>,
}

/// DTO representing a stored item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDto {
    /// Item ID.
    pub id: ItemId,
    /// Parent order ID.
    pub order_id: OrderId,
    /// Product name.
    pub product: String,
    /// Quantity.
    pub quantity: u32,
    /// Unit price.
    pub unit_price: Decimal,
}

/// DTO representing a stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDto {
    /// Order ID.
    pub id: OrderId,
    /// Client name.
    pub client: String,
    /// Order date.
    pub order_date: NaiveDate,
    /// Items in insertion order.
    pub items: Vec<ItemDto>,
}

impl OrderDto {
    /// Create from a persisted domain Order.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the order or one of its items was never
    /// assigned an identifier.
    pub fn from_order(order: &Order) -> Result<Self, OrderError> {
        let id = order
            .id()
            .ok_or_else(|| OrderError::storage("order returned without an identifier"))?;

        let items = order
            .items()
            .iter()
            .map(|item| {
                let item_id = item
                    .id()
                    .ok_or_else(|| OrderError::storage("item returned without an identifier"))?;
                Ok(ItemDto {
                    id: item_id,
                    order_id: item.order_id().unwrap_or(id),
                    product: item.product().to_string(),
                    quantity: item.quantity().units(),
                    unit_price: item.unit_price().amount(),
                })
            })
            .collect::<Result<Vec<_>, OrderError>>()?;

        Ok(Self {
            id,
            client: order.client().to_string(),
            order_date: order.order_date(),
            items,
        })
    }
}
