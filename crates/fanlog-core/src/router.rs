//! Multi-stream router.
//!
//! A [`Router`] fans each call out over up to three streams, all written
//! under a per-day directory:
//!
//! - **main** (`{name}.log`): console encoding, info level
//! - **detailed** (`{name}_DETAILED.log`): console encoding, debug level
//! - **compilation** (`{name}_COMPILATION.log`): JSON, debug level, meant
//!   for later machine processing
//!
//! Streams are configured explicitly, in dependency order. Configuration
//! is atomic: a failed call leaves the router exactly as it was.
//!
//! ## Example
//!
//! ```no_run
//! use fanlog_core::Router;
//!
//! let mut router = Router::new();
//! router.configure_main("/var/log/build", "build")?;
//! router.configure_detailed("/var/log/build", "build")?;
//!
//! router.info("starting", &[]);
//! router.error("compiler exited with status 1", &[]);
//! router.flush()?;
//! # Ok::<(), fanlog_core::LogError>(())
//! ```

use chrono::NaiveDate;
use fanlog_types::{bail, Encoding, Field, Level, Log, Result, RouterConfig};
use std::fmt;
use std::panic::Location;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::encoder::{Caller, EncoderConfig};
use crate::logger::Logger;
use crate::sink::Sink;
use crate::time::today;
use crate::util::{dated_directory, dated_log_path};

/// How far configuration has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RouterState {
    /// No stream configured
    Unconfigured,
    /// Only the compilation stream is configured
    CompilationReady,
    /// Main and compilation streams are configured
    MainReady,
    /// All three streams are configured
    DetailedReady,
}

impl fmt::Display for RouterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterState::Unconfigured => write!(f, "unconfigured"),
            RouterState::CompilationReady => write!(f, "compilation-ready"),
            RouterState::MainReady => write!(f, "main-ready"),
            RouterState::DetailedReady => write!(f, "detailed-ready"),
        }
    }
}

/// Routes log calls to the main, detailed and compilation streams.
#[derive(Debug, Default)]
pub struct Router {
    main: Option<Logger>,
    detailed: Option<Logger>,
    compilation: Option<Logger>,
    errors: AtomicUsize,
    warnings: AtomicUsize,
}

impl Router {
    /// An unconfigured router.
    pub fn new() -> Self {
        Self::default()
    }

    /// A router for tests: main and compilation streams discard everything.
    pub fn discard() -> Self {
        Self::with_streams(Logger::discard(), Logger::discard(), None)
    }

    /// A router over already built streams.
    pub fn with_streams(main: Logger, compilation: Logger, detailed: Option<Logger>) -> Self {
        Self {
            main: Some(main),
            detailed,
            compilation: Some(compilation),
            ..Self::default()
        }
    }

    /// A router configured from `config`.
    pub fn from_config(config: &RouterConfig) -> Result<Self> {
        let mut router = Self::new();
        router.configure_main(&config.directory, &config.name)?;
        if config.detailed {
            router.configure_detailed(&config.directory, &config.name)?;
        }
        Ok(router)
    }

    /// Configure the compilation stream,
    /// `{directory}/{YYYY_MM_DD}/{name}_COMPILATION.log`.
    pub fn configure_compilation(&mut self, directory: &str, name: &str) -> Result<()> {
        self.configure_compilation_on(directory, name, today())
    }

    /// Configure the main stream, `{directory}/{YYYY_MM_DD}/{name}.log`.
    ///
    /// The compilation stream is (re)configured alongside it.
    pub fn configure_main(&mut self, directory: &str, name: &str) -> Result<()> {
        self.configure_main_on(directory, name, today())
    }

    /// Configure the detailed stream,
    /// `{directory}/{YYYY_MM_DD}/{name}_DETAILED.log`.
    ///
    /// Fails unless the main stream is configured.
    pub fn configure_detailed(&mut self, directory: &str, name: &str) -> Result<()> {
        self.configure_detailed_on(directory, name, today())
    }

    pub(crate) fn configure_compilation_on(
        &mut self,
        directory: &str,
        name: &str,
        date: NaiveDate,
    ) -> Result<()> {
        let compilation = compilation_stream(directory, name, date)?;
        self.compilation = Some(compilation);
        Ok(())
    }

    pub(crate) fn configure_main_on(
        &mut self,
        directory: &str,
        name: &str,
        date: NaiveDate,
    ) -> Result<()> {
        let compilation = compilation_stream(directory, name, date)?;
        let main = stream(
            "main",
            Encoding::Console,
            Level::Info,
            directory,
            &format!("{}.log", name),
            date,
        )?;
        self.compilation = Some(compilation);
        self.main = Some(main);
        Ok(())
    }

    pub(crate) fn configure_detailed_on(
        &mut self,
        directory: &str,
        name: &str,
        date: NaiveDate,
    ) -> Result<()> {
        if self.main.is_none() {
            bail!(Configuration, "must configure main logger before detailed logger");
        }
        let detailed = stream(
            "detailed",
            Encoding::Console,
            Level::Debug,
            directory,
            &format!("{}_DETAILED.log", name),
            date,
        )?;
        self.detailed = Some(detailed);
        Ok(())
    }

    /// Current configuration state.
    pub fn state(&self) -> RouterState {
        match (&self.compilation, &self.main, &self.detailed) {
            (_, Some(_), Some(_)) => RouterState::DetailedReady,
            (_, Some(_), None) => RouterState::MainReady,
            (Some(_), None, _) => RouterState::CompilationReady,
            (None, None, _) => RouterState::Unconfigured,
        }
    }

    /// The main stream, if configured.
    pub fn main(&self) -> Option<&Logger> {
        self.main.as_ref()
    }

    /// The detailed stream, if configured.
    pub fn detailed(&self) -> Option<&Logger> {
        self.detailed.as_ref()
    }

    /// The compilation stream, if configured.
    pub fn compilation(&self) -> Option<&Logger> {
        self.compilation.as_ref()
    }

    /// Log to main, compilation and, when configured, detailed.
    pub fn info(&self, message: &str, fields: &[Field]) {
        let spaced = format!(" {}", message);
        if let Some(main) = &self.main {
            main.record(Level::Info, &spaced, fields, None);
        }
        if let Some(compilation) = &self.compilation {
            compilation.record(Level::Info, message, fields, None);
        }
        if let Some(detailed) = &self.detailed {
            detailed.record(Level::Info, &spaced, fields, None);
        }
    }

    /// Log only to the detailed and compilation streams.
    ///
    /// Fails when the detailed stream is not configured.
    pub fn detail_info(&self, message: &str, fields: &[Field]) -> Result<()> {
        let Some(detailed) = &self.detailed else {
            bail!(Configuration, "detailed logger is not configured");
        };
        detailed.record(Level::Info, &format!(" {}", message), fields, None);
        if let Some(compilation) = &self.compilation {
            compilation.record(Level::Info, message, fields, None);
        }
        Ok(())
    }

    /// Log an error annotated with the caller's file and line, and bump the
    /// error counter.
    #[track_caller]
    pub fn error(&self, message: &str, fields: &[Field]) {
        self.error_at(Some(Location::caller()), message, fields);
    }

    /// Like [`Router::error`] with an explicit location.
    ///
    /// Without a location every stream gets the message with a leading space
    /// and no `caller` key.
    pub fn error_at(
        &self,
        location: Option<&'static Location<'static>>,
        message: &str,
        fields: &[Field],
    ) {
        self.errors.fetch_add(1, Ordering::Relaxed);

        let caller = location.and_then(Caller::resolve);
        let (spaced, plain) = match &caller {
            Some(caller) => {
                let located = format!(
                    "occurred at {}, line {}: {}",
                    caller.short_file(),
                    caller.line(),
                    message
                );
                (format!(" {}", located), located)
            }
            None => {
                let spaced = format!(" {}", message);
                (spaced.clone(), spaced)
            }
        };

        if let Some(main) = &self.main {
            main.record(Level::Error, &spaced, fields, caller);
        }
        if let Some(compilation) = &self.compilation {
            compilation.record(Level::Error, &plain, fields, caller);
        }
        if let Some(detailed) = &self.detailed {
            detailed.record(Level::Error, &spaced, fields, caller);
        }
    }

    /// Log a warning and bump the warning counter.
    pub fn warning(&self, message: &str, fields: &[Field]) {
        self.warnings.fetch_add(1, Ordering::Relaxed);

        let spaced = format!(" {}", message);
        if let Some(main) = &self.main {
            main.record(Level::Warn, &spaced, fields, None);
        }
        if let Some(compilation) = &self.compilation {
            compilation.record(Level::Warn, message, fields, None);
        }
        if let Some(detailed) = &self.detailed {
            detailed.record(Level::Warn, &spaced, fields, None);
        }
    }

    /// Flush detailed, then compilation, then main. Stops at the first
    /// failure.
    pub fn flush(&self) -> Result<()> {
        for stream in [&self.detailed, &self.compilation, &self.main]
            .into_iter()
            .flatten()
        {
            stream.flush()?;
        }
        Ok(())
    }

    /// Errors logged through this router.
    pub fn error_amount(&self) -> usize {
        self.errors.load(Ordering::Relaxed)
    }

    /// Warnings logged through this router.
    pub fn warning_amount(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }
}

fn compilation_stream(directory: &str, name: &str, date: NaiveDate) -> Result<Logger> {
    stream(
        "compilation",
        Encoding::Json,
        Level::Debug,
        directory,
        &format!("{}_COMPILATION.log", name),
        date,
    )
}

fn stream(
    label: &str,
    encoding: Encoding,
    level: Level,
    directory: &str,
    file_name: &str,
    date: NaiveDate,
) -> Result<Logger> {
    let path = dated_log_path(directory, date, file_name);
    let sink = Sink::file(encoding, &path, level, EncoderConfig::router())?;
    tracing::debug!(stream = label, %path, "configured log stream");
    Ok(Logger::with_sink(sink, dated_directory(directory, date), file_name))
}
