//! Infrastructure Layer
//!
//! Adapters implementing the domain's ports:
//!
//! - `persistence`: order repositories (SQLite, in-memory)
//! - `http`: REST endpoints delegating to the order service

pub mod http;
pub mod persistence;
