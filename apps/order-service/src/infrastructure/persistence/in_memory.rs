//! In-memory order repository for testing.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::order::{Order, OrderError, OrderItem, OrderRepository, ReconstitutedOrderParams};
use crate::domain::shared::{ItemId, OrderId};

#[derive(Debug, Default)]
struct State {
    orders: BTreeMap<OrderId, Order>,
    last_order_id: i64,
    last_item_id: i64,
}

impl State {
    /// Assign fresh item ids under `order_id`, like an autoincrement column.
    fn assign_items(&mut self, order_id: OrderId, items: &[OrderItem]) -> Vec<OrderItem> {
        items
            .iter()
            .map(|item| {
                self.last_item_id += 1;
                OrderItem::reconstitute(
                    ItemId::new(self.last_item_id),
                    order_id,
                    item.product().to_string(),
                    item.quantity(),
                    item.unit_price(),
                )
            })
            .collect()
    }
}

/// In-memory implementation of `OrderRepository`.
///
/// Suitable for testing and development. Not for production use.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    state: RwLock<State>,
}

impl InMemoryOrderRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the repository is empty.
    pub fn is_empty(&self) -> Result<bool, OrderError> {
        Ok(self.read()?.orders.is_empty())
    }

    /// Total number of items across all orders.
    pub fn item_count(&self) -> Result<usize, OrderError> {
        Ok(self.read()?.orders.values().map(|o| o.items().len()).sum())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, OrderError> {
        self.state
            .read()
            .map_err(|_| OrderError::storage("order store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, OrderError> {
        self.state
            .write()
            .map_err(|_| OrderError::storage("order store lock poisoned"))
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: &Order) -> Result<Order, OrderError> {
        let mut state = self.write()?;
        state.last_order_id += 1;
        let id = OrderId::new(state.last_order_id);
        let items = state.assign_items(id, order.items());

        let stored = Order::reconstitute(ReconstitutedOrderParams {
            id,
            client: order.client().to_string(),
            order_date: order.order_date(),
            items,
        });
        state.orders.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, order: &Order) -> Result<Order, OrderError> {
        let id = order.require_id()?;
        let mut state = self.write()?;
        if !state.orders.contains_key(&id) {
            return Err(OrderError::NotFound { order_id: id });
        }

        let items = state.assign_items(id, order.items());
        let stored = Order::reconstitute(ReconstitutedOrderParams {
            id,
            client: order.client().to_string(),
            order_date: order.order_date(),
            items,
        });
        state.orders.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: OrderId) -> Result<(), OrderError> {
        self.write()?
            .orders
            .remove(&id)
            .map(|_| ())
            .ok_or(OrderError::NotFound { order_id: id })
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderError> {
        Ok(self.read()?.orders.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.read()?.orders.values().cloned().collect())
    }
}
