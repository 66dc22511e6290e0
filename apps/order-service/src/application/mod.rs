//! Application Layer
//!
//! The application layer orchestrates domain logic for the API boundary.
//! It defines:
//!
//! - **Services**: the order service owning update and delete rules
//! - **DTOs**: Data transfer objects for API boundaries

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::*;
