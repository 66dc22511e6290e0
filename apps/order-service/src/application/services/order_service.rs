//! Order Service
//!
//! Domain operations over an [`OrderRepository`] with input validation and
//! merge-update semantics.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{CreateOrderDto, NewItemDto, OrderDto, UpdateOrderDto};
use crate::domain::order::{CreateOrderCommand, Order, OrderError, OrderRepository};
use crate::domain::shared::OrderId;
use crate::observability::{record_order_operation, update_order_count};

/// Service exposing order persistence as domain operations.
pub struct OrderService<R>
where
    R: OrderRepository,
{
    repo: Arc<R>,
}

impl<R> Clone for OrderService<R>
where
    R: OrderRepository,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R> OrderService<R>
where
    R: OrderRepository,
{
    /// Create a new `OrderService`.
    pub const fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Get the underlying repository.
    pub const fn repository(&self) -> &Arc<R> {
        &self.repo
    }

    /// Validate and persist a new order with its items.
    pub async fn create_order(&self, dto: CreateOrderDto) -> Result<OrderDto, OrderError> {
        let result = self.try_create(dto).await;
        Self::observe("create", &result);
        result
    }

    /// Fetch one order.
    pub async fn get_order(&self, id: OrderId) -> Result<OrderDto, OrderError> {
        let result = self.load(id).await.and_then(|order| OrderDto::from_order(&order));
        Self::observe("get", &result);
        result
    }

    /// Fetch every order with its items.
    pub async fn list_orders(&self) -> Result<Vec<OrderDto>, OrderError> {
        let result = match self.repo.list_all().await {
            Ok(orders) => {
                update_order_count(orders.len());
                orders.iter().map(OrderDto::from_order).collect()
            }
            Err(err) => Err(err),
        };
        Self::observe("list", &result);
        result
    }

    /// Merge `dto` into a stored order.
    ///
    /// Supplied fields overwrite the stored ones and absent fields are kept.
    /// A supplied item list replaces all existing items.
    pub async fn update_order(
        &self,
        id: OrderId,
        dto: UpdateOrderDto,
    ) -> Result<OrderDto, OrderError> {
        let result = self.try_update(id, dto).await;
        Self::observe("update", &result);
        result
    }

    /// Overwrite a stored order with `order` as-is.
    ///
    /// # Errors
    ///
    /// Rejects orders without an identifier before touching the store.
    pub async fn replace_order(&self, order: &Order) -> Result<Order, OrderError> {
        order.require_id()?;
        self.repo.update(order).await
    }

    /// Delete an order and all of its items.
    pub async fn delete_order(&self, id: OrderId) -> Result<(), OrderError> {
        let result = self.repo.delete(id).await;
        if result.is_ok() {
            info!(order_id = %id, "Order deleted");
        }
        Self::observe("delete", &result);
        result
    }

    async fn try_create(&self, dto: CreateOrderDto) -> Result<OrderDto, OrderError> {
        let items = NewItemDto::to_domain_items(&dto.items)?;
        let order = Order::new(CreateOrderCommand {
            client: dto.client,
            order_date: dto.order_date,
            items,
        })?;

        let stored = self.repo.create(&order).await?;
        info!(
            order_id = ?stored.id(),
            client = stored.client(),
            items = stored.items().len(),
            "Order created"
        );
        OrderDto::from_order(&stored)
    }

    async fn try_update(&self, id: OrderId, dto: UpdateOrderDto) -> Result<OrderDto, OrderError> {
        let mut order = self.load(id).await?;

        if let Some(client) = dto.client.as_deref() {
            order.rename_client(client)?;
        }
        if let Some(order_date) = dto.order_date {
            order.reschedule(order_date);
        }
        match dto.items.as_deref() {
            Some(items) => order.replace_items(NewItemDto::to_domain_items(items)?),
            // Items are written back in full, so keep the stored ones as new rows.
            None => {
                let kept = order.items().iter().map(|item| item.detached()).collect();
                order.replace_items(kept);
            }
        }

        let stored = self.replace_order(&order).await?;
        info!(order_id = %id, items = stored.items().len(), "Order updated");
        OrderDto::from_order(&stored)
    }

    async fn load(&self, id: OrderId) -> Result<Order, OrderError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(OrderError::NotFound { order_id: id })
    }

    fn observe<T>(operation: &'static str, result: &Result<T, OrderError>) {
        match result {
            Ok(_) => record_order_operation(operation, "ok"),
            Err(err) => {
                match err {
                    OrderError::Storage { .. } => {
                        warn!(operation = operation, error = %err, "Order operation failed");
                    }
                    OrderError::NotFound { .. } | OrderError::Validation { .. } => {
                        debug!(operation = operation, error = %err, "Order operation rejected");
                    }
                }
                record_order_operation(operation, err.kind());
            }
        }
    }
}
