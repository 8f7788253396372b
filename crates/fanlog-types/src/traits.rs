//! Core trait definitions for fanlog abstractions.

use std::sync::Arc;
use crate::errors::Result;
use crate::Field;

/// The capability set every logger provides.
///
/// Left public so that callers can supply their own implementations. With
/// the `mock` feature enabled a `MockLog` test double is generated from
/// this definition.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Log: Send + Sync {
    /// Log an informative message with optional fields.
    fn info(&self, message: &str, fields: &[Field]);

    /// Log an error and bump the error counter.
    fn error(&self, message: &str, fields: &[Field]);

    /// Number of errors logged directly on this logger so far.
    fn errors(&self) -> usize;

    /// Log a warning and bump the warning counter.
    fn warn(&self, message: &str, fields: &[Field]);

    /// Number of warnings logged directly on this logger so far.
    fn warnings(&self) -> usize;

    /// Register a child logger. Every later call on the receiver is
    /// forwarded to the child.
    ///
    /// Attaching a logger to itself or to one of its ancestors causes
    /// unbounded recursion at log time.
    fn attach(&self, child: Arc<dyn Log>);

    /// Synchronize this logger, then its children in attachment order.
    ///
    /// Stops at the first failure.
    fn flush(&self) -> Result<()>;

    /// Path of the file entries are written to.
    fn path(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogError;

    #[test]
    fn test_mock_tracks_calls_and_injected_behaviour() {
        let mut mock = MockLog::new();
        mock.expect_info()
            .withf(|message, fields| message == "hello" && fields.is_empty())
            .times(2)
            .return_const(());
        mock.expect_flush()
            .times(1)
            .returning(|| Err(LogError::Flush(std::io::Error::other("sync failed"))));
        mock.expect_path().return_const("/var/log/app.log".to_string());

        mock.info("hello", &[]);
        mock.info("hello", &[]);
        assert!(mock.flush().unwrap_err().is_flush());
        assert_eq!(mock.path(), "/var/log/app.log");
    }
}
