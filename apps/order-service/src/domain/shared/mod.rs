//! Shared Domain Types
//!
//! Value objects and errors shared across the order context.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::{ItemId, Money, OrderId, Quantity};
