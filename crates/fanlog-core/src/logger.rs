//! Sink-backed logger with child forwarding.
//!
//! Every call on a [`Logger`] is written to its own sink and then replayed,
//! depth first and in attachment order, on each attached child. Counters
//! are per logger: a parent's error count only reflects calls made on the
//! parent itself.

use fanlog_types::{Encoding, Field, Level, Log, Result, SinkConfig};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::encoder::{Caller, EncoderConfig, Entry};
use crate::sink::Sink;
use crate::util::join;

/// The concrete [`Log`] implementation.
pub struct Logger {
    sink: Sink,
    attached: RwLock<Vec<Arc<dyn Log>>>,
    errors: AtomicUsize,
    warnings: AtomicUsize,
    directory: String,
    file_name: String,
}

impl Logger {
    /// Build a console-encoded logger writing to `{directory}/{name}`.
    ///
    /// The directory is created if missing.
    pub fn text(directory: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        Self::build(Encoding::Console, directory.into(), name.into(), Level::Debug)
    }

    /// Build a JSON-encoded logger writing to `{directory}/{name}`.
    ///
    /// The directory is created if missing.
    pub fn json(directory: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        Self::build(Encoding::Json, directory.into(), name.into(), Level::Debug)
    }

    /// Build a logger from configuration.
    pub fn from_config(config: &SinkConfig) -> Result<Self> {
        Self::build(
            config.encoding,
            config.directory.clone(),
            config.name.clone(),
            config.level,
        )
    }

    /// A logger for tests: nothing is written anywhere.
    pub fn discard() -> Self {
        Self::with_sink(Sink::discard(), "", "")
    }

    /// Wrap an already built sink. `directory` and `name` are only used by
    /// [`Log::path`].
    pub fn with_sink(sink: Sink, directory: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            sink,
            attached: RwLock::new(Vec::new()),
            errors: AtomicUsize::new(0),
            warnings: AtomicUsize::new(0),
            directory: directory.into(),
            file_name: name.into(),
        }
    }

    fn build(encoding: Encoding, directory: String, name: String, level: Level) -> Result<Self> {
        let path = join(&directory, &name);
        let sink = Sink::file(encoding, &path, level, EncoderConfig::plain())?;
        Ok(Self::with_sink(sink, directory, name))
    }

    /// The underlying sink.
    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    /// Number of attached children.
    pub fn attached(&self) -> usize {
        self.attached.read().len()
    }

    /// Write, count and forward one entry.
    ///
    /// `caller` only annotates this logger's own entry. Children receive the
    /// call through [`Log`], which carries no location, so forwarded entries
    /// have no `caller` key.
    pub(crate) fn record(
        &self,
        level: Level,
        message: &str,
        fields: &[Field],
        caller: Option<Caller>,
    ) {
        self.sink
            .write(&Entry::now(level, message, fields).with_caller(caller));

        match level {
            Level::Warn => {
                self.warnings.fetch_add(1, Ordering::Relaxed);
            }
            Level::Error => {
                self.errors.fetch_add(1, Ordering::Relaxed);
            }
            Level::Debug | Level::Info => {}
        }

        // Snapshot so children can log (or attach) without holding our lock
        let children = self.attached.read().clone();
        for child in &children {
            match level {
                Level::Error => child.error(message, fields),
                Level::Warn => child.warn(message, fields),
                Level::Debug | Level::Info => child.info(message, fields),
            }
        }
    }
}

impl Log for Logger {
    fn info(&self, message: &str, fields: &[Field]) {
        self.record(Level::Info, message, fields, None);
    }

    fn error(&self, message: &str, fields: &[Field]) {
        self.record(Level::Error, message, fields, None);
    }

    fn errors(&self) -> usize {
        self.errors.load(Ordering::Relaxed)
    }

    fn warn(&self, message: &str, fields: &[Field]) {
        self.record(Level::Warn, message, fields, None);
    }

    fn warnings(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }

    fn attach(&self, child: Arc<dyn Log>) {
        self.attached.write().push(child);
    }

    fn flush(&self) -> Result<()> {
        self.sink.sync()?;
        let children = self.attached.read().clone();
        for child in &children {
            child.flush()?;
        }
        Ok(())
    }

    fn path(&self) -> String {
        join(&self.directory, &self.file_name)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("path", &self.path())
            .field("sink", &self.sink)
            .field("attached", &self.attached())
            .field("errors", &self.errors())
            .field("warnings", &self.warnings())
            .finish()
    }
}
