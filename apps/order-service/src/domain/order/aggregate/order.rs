//! Order Aggregate Root
//!
//! The Order aggregate owns its items exclusively: items are created with
//! the order, replaced wholesale on update and removed with it.

use chrono::NaiveDate;
use serde::Serialize;

use super::{OrderItem, validate_name};
use crate::domain::order::errors::OrderError;
use crate::domain::shared::{Money, OrderId};

/// Parameters for reconstituting an Order from storage.
///
/// Used by repositories to rebuild aggregates from persisted rows.
#[derive(Debug, Clone)]
pub struct ReconstitutedOrderParams {
    /// Order identifier.
    pub id: OrderId,
    /// Client name.
    pub client: String,
    /// Order date.
    pub order_date: NaiveDate,
    /// Persisted items, in insertion order.
    pub items: Vec<OrderItem>,
}

/// Command to create a new order.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    /// Client name.
    pub client: String,
    /// Order date; today when absent.
    pub order_date: Option<NaiveDate>,
    /// Items of the order.
    pub items: Vec<OrderItem>,
}

/// Order Aggregate Root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    id: Option<OrderId>,
    client: String,
    order_date: NaiveDate,
    items: Vec<OrderItem>,
}

impl Order {
    /// Create a new, not yet persisted, order.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the client name is empty or too long.
    pub fn new(command: CreateOrderCommand) -> Result<Self, OrderError> {
        Ok(Self {
            id: None,
            client: validate_name("client", &command.client)?,
            order_date: command
                .order_date
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
            items: command.items,
        })
    }

    /// Reconstitute an order from storage. No validation is performed.
    #[must_use]
    pub fn reconstitute(params: ReconstitutedOrderParams) -> Self {
        Self {
            id: Some(params.id),
            client: params.client,
            order_date: params.order_date,
            items: params.items,
        }
    }

    /// Get the order ID (if persisted).
    #[must_use]
    pub const fn id(&self) -> Option<OrderId> {
        self.id
    }

    /// Get the order ID, failing when the order was never persisted.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the order has no identifier.
    pub fn require_id(&self) -> Result<OrderId, OrderError> {
        self.id
            .ok_or_else(|| OrderError::validation("id", "order has no identifier"))
    }

    /// Get the client name.
    #[must_use]
    pub fn client(&self) -> &str {
        &self.client
    }

    /// Get the order date.
    #[must_use]
    pub const fn order_date(&self) -> NaiveDate {
        self.order_date
    }

    /// Get the items in order.
    #[must_use]
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Sum of all item subtotals.
    #[must_use]
    pub fn total(&self) -> Money {
        self.items.iter().map(OrderItem::subtotal).sum()
    }

    /// Change the client name.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is empty or too long.
    pub fn rename_client(&mut self, client: &str) -> Result<(), OrderError> {
        self.client = validate_name("client", client)?;
        Ok(())
    }

    /// Change the order date.
    pub const fn reschedule(&mut self, order_date: NaiveDate) {
        self.order_date = order_date;
    }

    /// Replace the whole item list.
    pub fn replace_items(&mut self, items: Vec<OrderItem>) {
        self.items = items;
    }
}
