//! Item quantity value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// Number of units of a product on an order item. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Quantity(u32);

impl Quantity {
    /// Create a quantity, rejecting zero and negative values.
    ///
    /// # Errors
    ///
    /// Returns error if `units` is not a positive integer that fits in `u32`.
    pub fn new(units: i64) -> Result<Self, DomainError> {
        if units <= 0 {
            return Err(DomainError::invalid(
                "quantity",
                format!("must be a positive integer, got {units}"),
            ));
        }
        u32::try_from(units)
            .map(Self)
            .map_err(|_| DomainError::invalid("quantity", format!("{units} is too large")))
    }

    /// Get the number of units.
    #[must_use]
    pub const fn units(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Quantity {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for i64 {
    fn from(quantity: Quantity) -> Self {
        Self::from(quantity.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn positive_quantity_is_accepted() {
        let qty = Quantity::new(3).unwrap();
        assert_eq!(qty.units(), 3);
        assert_eq!(i64::from(qty), 3);
    }

    #[test_case(0 ; "zero")]
    #[test_case(-1 ; "negative")]
    #[test_case(i64::from(u32::MAX) + 1 ; "overflow")]
    fn invalid_quantity_is_rejected(units: i64) {
        let err = Quantity::new(units).unwrap_err();
        assert_eq!(err.field(), "quantity");
    }

    #[test]
    fn deserialize_rejects_zero() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("2").unwrap().units(), 2);
    }
}
