//! Errors from persistence operations.

use thiserror::Error;

use crate::domain::order::OrderError;
use crate::domain::shared::OrderId;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Database connection error.
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Query execution error.
    #[error("Query error: {0}")]
    Query(String),

    /// A stored row could not be turned back into a domain value.
    #[error("Data integrity error: {0}")]
    Integrity(String),

    /// The order row targeted by a write does not exist.
    #[error("Order not found: {0}")]
    MissingOrder(OrderId),
}

impl From<sqlx::Error> for PersistenceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(_)
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => Self::Connection(err.to_string()),
            _ => Self::Query(err.to_string()),
        }
    }
}

impl From<PersistenceError> for OrderError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::MissingOrder(order_id) => Self::NotFound { order_id },
            other => Self::storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_order_maps_to_not_found() {
        let err: OrderError = PersistenceError::MissingOrder(OrderId::new(3)).into();
        assert_eq!(
            err,
            OrderError::NotFound {
                order_id: OrderId::new(3)
            }
        );
    }

    #[test]
    fn query_error_maps_to_storage() {
        let err: OrderError = PersistenceError::Query("no such table: orders".to_string()).into();
        assert!(matches!(err, OrderError::Storage { ref message } if message.contains("orders")));
    }

    #[test]
    fn pool_closed_is_connection_error() {
        let err = PersistenceError::from(sqlx::Error::PoolClosed);
        assert!(matches!(err, PersistenceError::Connection(_)));
    }
}
