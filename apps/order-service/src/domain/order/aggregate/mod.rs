//! Order aggregate and the items it owns.

mod order;
mod order_item;

pub use order::{CreateOrderCommand, Order, ReconstitutedOrderParams};
pub use order_item::OrderItem;

/// Longest client or product name the store accepts.
pub const MAX_NAME_LEN: usize = 100;

/// Trim a name and check it against the column limits.
fn validate_name(
    field: &str,
    value: &str,
) -> Result<String, crate::domain::order::errors::OrderError> {
    use crate::domain::order::errors::OrderError;

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(OrderError::validation(field, "must not be empty"));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(OrderError::validation(
            field,
            format!("must be at most {MAX_NAME_LEN} characters"),
        ));
    }
    Ok(trimmed.to_string())
}
