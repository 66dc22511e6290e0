//! Value objects: immutable domain types compared by value.

mod identifiers;
mod money;
mod quantity;

pub use identifiers::{ItemId, OrderId};
pub use money::Money;
pub use quantity::Quantity;
