//! # fanlog Core
//!
//! Structured logging facade: sinks, loggers with child forwarding, and a
//! multi-stream router.
//!
//! This crate provides:
//!
//! - **Sinks**: a writer bound to one destination with a fixed encoding
//!   (console or JSON) and minimum level
//! - **Loggers**: per-logger error/warning counters and attached children
//!   that mirror every call
//! - **Fields**: typed key/value annotations, including explicit object
//!   encoding for record values
//! - **Router**: main, detailed and compilation streams under a dated
//!   directory, with caller-located errors
//! - **Process context**: optional single router per process
//! - **Tracing bridge**: forward `tracing` events into any logger
//!
//! ## Example
//!
//! ```no_run
//! use fanlog_core::{error_field, field, Log, Logger};
//! use std::sync::Arc;
//!
//! let audit = Arc::new(Logger::json("/var/log/app", "audit.json")?);
//! let logger = Logger::text("/var/log/app", "app.log")?;
//! logger.attach(audit.clone());
//!
//! logger.info("listening", &[field("port", 8080)]);
//! let err = std::io::Error::other("connection reset");
//! logger.warn("client dropped", &[error_field(&err)]);
//!
//! assert_eq!(logger.warnings(), 1);
//! logger.flush()?;
//! # Ok::<(), fanlog_core::LogError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bridge;
pub mod encoder;
pub mod field;
pub mod global;
pub mod logger;
pub mod router;
pub mod sink;
pub mod test_support;
pub mod time;
pub mod util;

// Re-export commonly used items
pub use bridge::{init_bridge, LogLayer};
pub use encoder::{Caller, EncoderConfig, Entry, TimeFormat};
pub use field::{error_field, field, object_field, ObjectEncoder, ObjectMarshaler};
pub use logger::Logger;
pub use router::{Router, RouterState};
pub use sink::{Destination, Sink};
pub use fanlog_types::{Encoding, Field, Level, Log, LogError, Result, RouterConfig, SinkConfig};

/// fanlog version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
