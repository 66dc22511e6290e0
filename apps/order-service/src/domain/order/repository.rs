//! Order Repository Trait
//!
//! Defines the persistence abstraction for orders.
//! Implemented by adapters in the infrastructure layer.

use async_trait::async_trait;

use super::aggregate::Order;
use super::errors::OrderError;
use crate::domain::shared::OrderId;

/// Repository trait for Order persistence.
///
/// Every multi-row write is atomic: on failure nothing is left behind and
/// the error is returned to the caller.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new order and all of its items.
    ///
    /// Returns the stored aggregate with the order and item identifiers
    /// assigned by the store. Any identifiers already on `order` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Storage`] if any insert fails.
    async fn create(&self, order: &Order) -> Result<Order, OrderError>;

    /// Overwrite an existing order: client and date are replaced, existing
    /// items are deleted and the supplied items inserted in their place.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Validation`] when `order` has no identifier,
    /// [`OrderError::NotFound`] when no such order is stored, and
    /// [`OrderError::Storage`] if the store fails.
    async fn update(&self, order: &Order) -> Result<Order, OrderError>;

    /// Delete an order and all of its items.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] when no such order is stored and
    /// [`OrderError::Storage`] if the store fails.
    async fn delete(&self, id: OrderId) -> Result<(), OrderError>;

    /// Find an order by its identifier.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderError>;

    /// All orders with their items, by ascending order identifier.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn list_all(&self) -> Result<Vec<Order>, OrderError>;
}
