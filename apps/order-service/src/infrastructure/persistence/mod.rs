//! Persistence Adapters
//!
//! Database implementations of [`OrderRepository`](crate::domain::order::OrderRepository).

mod error;
pub mod in_memory;
mod rows;
pub mod sqlite;

pub use error::PersistenceError;
pub use in_memory::InMemoryOrderRepository;
pub use rows::{ItemRow, OrderRow, group_rows};
pub use sqlite::SqliteOrderRepository;
