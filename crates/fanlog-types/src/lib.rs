//! # fanlog Types
//!
//! Core types, traits, and enums shared across all fanlog crates.
//!
//! This crate provides:
//!
//! - The `Log` trait every logger implements (and, with the `mock` feature,
//!   the generated `MockLog` test double)
//! - `Field`, the key/value annotation attached to a log call
//! - `Level` and `Encoding` enums
//! - Serde configuration types for sinks and routers
//! - Error types and result aliases
//!
//! ## Example
//!
//! ```
//! use fanlog_types::{Encoding, Level};
//!
//! let level: Level = "warning".parse().unwrap();
//! assert_eq!(level, Level::Warn);
//! assert_eq!(level.to_string(), "WARN");
//! assert_eq!(Encoding::default(), Encoding::Console);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod enums;
pub mod fields;
pub mod traits;
pub mod config;

// Re-export common types for convenience
pub use errors::{LogError, Result};
pub use enums::{Encoding, Level};
pub use fields::Field;
pub use traits::Log;
pub use config::{RouterConfig, SinkConfig};

#[cfg(any(test, feature = "mock"))]
pub use traits::MockLog;
