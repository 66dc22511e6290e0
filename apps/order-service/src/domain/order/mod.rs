//! Order Bounded Context
//!
//! An order is a client purchase record that exclusively owns its items.
//!
//! # Key Concepts
//!
//! - **Order Aggregate**: root entity; items never exist without it
//! - **Full-replace items**: an update swaps the whole item list, never diffs it
//! - **Store-assigned ids**: identifiers are absent until the order is persisted

pub mod aggregate;
pub mod errors;
pub mod repository;

pub use aggregate::{CreateOrderCommand, Order, OrderItem, ReconstitutedOrderParams};
pub use errors::OrderError;
pub use repository::OrderRepository;
