//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Aggregates**: the [`order::Order`] root and the items it owns
//! - **Value Objects**: identifiers, quantities and prices compared by value
//! - **Repository Traits**: persistence abstractions (implemented in adapters)

pub mod order;
pub mod shared;
