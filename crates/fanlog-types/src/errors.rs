//! Error types for fanlog operations.

use thiserror::Error;

/// The main error type for fanlog operations.
///
/// Logging calls themselves never fail; errors only surface from building
/// sinks, configuring routers, loading configuration and flushing.
#[derive(Error, Debug)]
pub enum LogError {
    /// A destination could not be prepared, a sink could not be built, or
    /// streams were configured out of order.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Synchronizing a sink to its destination failed
    #[error("Flush error: {0}")]
    Flush(#[source] std::io::Error),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl LogError {
    /// Returns true for configuration failures.
    pub fn is_configuration(&self) -> bool {
        matches!(self, LogError::Configuration(_))
    }

    /// Returns true for flush failures.
    pub fn is_flush(&self) -> bool {
        matches!(self, LogError::Flush(_))
    }
}

/// A specialized Result type for fanlog operations.
pub type Result<T> = std::result::Result<T, LogError>;

/// Helper macro to bail out with a LogError
///
/// # Example
///
/// ```ignore
/// if self.main.is_none() {
///     bail!(Configuration, "must configure main logger before detailed logger");
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($variant:ident, $msg:expr) => {
        return Err($crate::LogError::$variant($msg.to_string()))
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::LogError::$variant(format!($fmt, $($arg)*)))
    };
}
