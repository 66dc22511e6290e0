//! Data Transfer Objects (DTOs)
//!
//! DTOs are used for API boundaries and service inputs/outputs.

mod order_dto;

pub use order_dto::{CreateOrderDto, ItemDto, NewItemDto, OrderDto, UpdateOrderDto};
