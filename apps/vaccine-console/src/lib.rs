#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Vaccine Console - in-memory vaccine registry
//!
//! - [`registry`]: active set, append-only archive, lot validation
//! - [`console`]: numbered-menu loop over any `BufRead`/`Write` pair

pub mod console;
pub mod registry;

pub use console::Console;
pub use registry::{LotCode, Vaccine, VaccineChanges, VaccineError, VaccineRegistry, VaccineStatus};
