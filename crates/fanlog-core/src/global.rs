//! Process-wide router context.
//!
//! Libraries should take a `&Router` explicitly. Binaries that want a single
//! router for the whole process install one here with [`init`] and release
//! it with [`teardown`].

use fanlog_types::{bail, Field, Result};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::panic::Location;
use std::sync::Arc;

use crate::router::Router;

static ROUTER: Lazy<RwLock<Option<Arc<Router>>>> = Lazy::new(|| RwLock::new(None));

/// Install `router` for the process.
///
/// Fails if a router is already installed; call [`teardown`] first.
pub fn init(router: Router) -> Result<Arc<Router>> {
    let mut slot = ROUTER.write();
    if slot.is_some() {
        bail!(Configuration, "a process router is already installed");
    }
    let router = Arc::new(router);
    *slot = Some(router.clone());
    tracing::debug!(state = %router.state(), "installed process router");
    Ok(router)
}

/// The installed router, if any.
pub fn router() -> Option<Arc<Router>> {
    ROUTER.read().clone()
}

/// Run `f` against the installed router.
pub fn with_router<R>(f: impl FnOnce(&Router) -> R) -> Option<R> {
    router().map(|router| f(&router))
}

/// Remove the installed router and flush it.
///
/// Succeeds without doing anything when no router is installed.
pub fn teardown() -> Result<()> {
    let router = ROUTER.write().take();
    match router {
        Some(router) => router.flush(),
        None => Ok(()),
    }
}

/// [`Router::info`] on the installed router.
pub fn info(message: &str, fields: &[Field]) {
    with_router(|router| router.info(message, fields));
}

/// [`Router::warning`] on the installed router.
pub fn warning(message: &str, fields: &[Field]) {
    with_router(|router| router.warning(message, fields));
}

/// [`Router::error`] on the installed router, located at the caller.
#[track_caller]
pub fn error(message: &str, fields: &[Field]) {
    let location = Location::caller();
    with_router(|router| router.error_at(Some(location), message, fields));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::EncoderConfig;
    use crate::logger::Logger;
    use crate::sink::Sink;
    use crate::test_support::MemoryBuffer;
    use fanlog_types::{Encoding, Level};

    // The context is process-wide; keep every scenario in one test.
    #[test]
    fn test_init_use_teardown() {
        teardown().unwrap();
        assert!(router().is_none());
        // Calls without a router are dropped
        info("nobody listens", &[]);

        let compilation = MemoryBuffer::new();
        let sink = Sink::memory(
            Encoding::Json,
            compilation.clone(),
            Level::Debug,
            EncoderConfig::router(),
        );
        let installed = init(Router::with_streams(
            Logger::discard(),
            Logger::with_sink(sink, "memory", "compilation.log"),
            None,
        ))
        .unwrap();

        assert!(init(Router::discard()).unwrap_err().is_configuration());

        info("hello", &[]);
        warning("careful", &[]);
        let line = line!() + 1;
        error("broken", &[]);

        assert_eq!(installed.error_amount(), 1);
        assert_eq!(with_router(|router| router.warning_amount()), Some(1));
        let lines = compilation.json_lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[2]["msg"],
            format!("occurred at src/global.rs, line {}: broken", line)
        );

        teardown().unwrap();
        assert!(router().is_none());
        assert_eq!(compilation.syncs(), 1);
    }
}
