//! A single product line within an order.

use rust_decimal::Decimal;
use serde::Serialize;

use super::validate_name;
use crate::domain::order::errors::OrderError;
use crate::domain::shared::{ItemId, Money, OrderId, Quantity};

/// One product line of an [`Order`](super::Order).
///
/// `id` and `order_id` are `None` until the item has been written by a
/// repository; a persisted item always references its parent order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    id: Option<ItemId>,
    order_id: Option<OrderId>,
    product: String,
    quantity: Quantity,
    unit_price: Money,
}

impl OrderItem {
    /// Create a new, not yet persisted, item.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty product name, a non-positive
    /// quantity or a price outside `DECIMAL(10,2)`.
    pub fn new(
        product: impl AsRef<str>,
        quantity: i64,
        unit_price: Decimal,
    ) -> Result<Self, OrderError> {
        Ok(Self {
            id: None,
            order_id: None,
            product: validate_name("product", product.as_ref())?,
            quantity: Quantity::new(quantity)?,
            unit_price: Money::price(unit_price)?,
        })
    }

    /// Rebuild a persisted item from storage. No validation is performed.
    #[must_use]
    pub const fn reconstitute(
        id: ItemId,
        order_id: OrderId,
        product: String,
        quantity: Quantity,
        unit_price: Money,
    ) -> Self {
        Self {
            id: Some(id),
            order_id: Some(order_id),
            product,
            quantity,
            unit_price,
        }
    }

    /// Get the item ID (if persisted).
    #[must_use]
    pub const fn id(&self) -> Option<ItemId> {
        self.id
    }

    /// Get the parent order ID (if persisted).
    #[must_use]
    pub const fn order_id(&self) -> Option<OrderId> {
        self.order_id
    }

    /// Get the product name.
    #[must_use]
    pub fn product(&self) -> &str {
        &self.product
    }

    /// Get the quantity.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Get the unit price.
    #[must_use]
    pub const fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Quantity times unit price.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.unit_price * self.quantity
    }

    /// Same product line, with storage identifiers stripped.
    #[must_use]
    pub fn detached(&self) -> Self {
        Self {
            id: None,
            order_id: None,
            ..self.clone()
        }
    }
}
