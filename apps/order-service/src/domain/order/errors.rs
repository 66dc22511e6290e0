//! Order errors.

use std::fmt;

use crate::domain::shared::{DomainError, OrderId};

/// Errors that can occur while handling orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// No order exists with the given identifier.
    NotFound {
        /// Order ID.
        order_id: OrderId,
    },

    /// Input failed validation, or a required identifier is missing.
    Validation {
        /// Field with invalid value.
        field: String,
        /// Error message.
        message: String,
    },

    /// The underlying store failed.
    Storage {
        /// Error message from the store.
        message: String,
    },
}

impl OrderError {
    /// Shorthand for a [`OrderError::Validation`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`OrderError::Storage`].
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Short, stable label for logs and metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Validation { .. } => "validation",
            Self::Storage { .. } => "storage",
        }
    }
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { order_id } => write!(f, "Order not found: {order_id}"),
            Self::Validation { field, message } => {
                write!(f, "Invalid order parameter '{field}': {message}")
            }
            Self::Storage { message } => write!(f, "Storage error: {message}"),
        }
    }
}

impl std::error::Error for OrderError {}

impl From<DomainError> for OrderError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidValue { field, message } => Self::Validation { field, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = OrderError::NotFound {
            order_id: OrderId::new(17),
        };
        assert_eq!(err.to_string(), "Order not found: 17");
        assert_eq!(err.kind(), "not_found");
    }

    #[test]
    fn validation_display() {
        let err = OrderError::validation("id", "required for update");
        let msg = err.to_string();
        assert!(msg.contains("'id'"));
        assert!(msg.contains("required for update"));
    }

    #[test]
    fn domain_error_converts_to_validation() {
        let err: OrderError = DomainError::invalid("quantity", "must be positive").into();
        assert_eq!(err, OrderError::validation("quantity", "must be positive"));
    }

    #[test]
    fn order_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(OrderError::storage("disk full"));
        assert!(err.to_string().contains("disk full"));
    }
}
