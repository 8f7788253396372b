//! Sink factory.
//!
//! A [`Sink`] is a writer bound to one destination, with one encoding and a
//! minimum level fixed at construction. Writing never fails from the
//! caller's point of view; only [`Sink::sync`] reports errors.

use fanlog_types::{Encoding, Level, LogError, Result};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::encoder::{encode, EncoderConfig, Entry};
use crate::test_support::MemoryBuffer;
use crate::util::ensure_directory;

/// Where a sink writes.
#[derive(Debug, Clone)]
pub enum Destination {
    /// Append to a file, creating it and its parent directories
    File(PathBuf),
    /// Standard output
    Stdout,
    /// Standard error
    Stderr,
    /// Drop everything
    Discard,
    /// Shared in-memory buffer
    Memory(MemoryBuffer),
}

impl Destination {
    /// Parse a destination string. `stdout` and `stderr` name the standard
    /// streams; anything else is a file path.
    pub fn parse(value: &str) -> Self {
        match value {
            "stdout" => Destination::Stdout,
            "stderr" => Destination::Stderr,
            path => Destination::File(PathBuf::from(path)),
        }
    }

    fn describe(&self) -> String {
        match self {
            Destination::File(path) => path.display().to_string(),
            Destination::Stdout => "stdout".to_string(),
            Destination::Stderr => "stderr".to_string(),
            Destination::Discard => "discard".to_string(),
            Destination::Memory(_) => "memory".to_string(),
        }
    }
}

enum Output {
    File(File),
    Stdout(io::Stdout),
    Stderr(io::Stderr),
    Discard,
    Memory(MemoryBuffer),
}

impl Output {
    fn open(destination: &Destination) -> Result<Self> {
        match destination {
            Destination::File(path) => {
                if let Some(parent) = path.parent() {
                    ensure_directory(parent)?;
                }
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| {
                        LogError::Configuration(format!(
                            "Failed to open log file {}: {}",
                            path.display(),
                            e
                        ))
                    })?;
                Ok(Output::File(file))
            }
            Destination::Stdout => Ok(Output::Stdout(io::stdout())),
            Destination::Stderr => Ok(Output::Stderr(io::stderr())),
            Destination::Discard => Ok(Output::Discard),
            Destination::Memory(buffer) => Ok(Output::Memory(buffer.clone())),
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        match self {
            Output::File(file) => file.write_all(bytes),
            Output::Stdout(out) => out.lock().write_all(bytes),
            Output::Stderr(err) => err.lock().write_all(bytes),
            Output::Discard => Ok(()),
            Output::Memory(buffer) => {
                buffer.write(bytes);
                Ok(())
            }
        }
    }

    fn sync(&mut self) -> io::Result<()> {
        match self {
            Output::File(file) => {
                file.flush()?;
                file.sync_all()
            }
            Output::Stdout(out) => out.flush(),
            Output::Stderr(err) => err.flush(),
            Output::Discard => Ok(()),
            Output::Memory(buffer) => buffer.sync(),
        }
    }
}

/// A configured structured-log writer bound to one destination.
pub struct Sink {
    encoding: Encoding,
    level: Level,
    config: EncoderConfig,
    destination: String,
    output: Mutex<Output>,
    write_failed: AtomicBool,
}

impl Sink {
    /// Build a sink. For file destinations the parent directory is created
    /// first.
    pub fn build(
        encoding: Encoding,
        destination: Destination,
        level: Level,
        config: EncoderConfig,
    ) -> Result<Self> {
        let output = Output::open(&destination)?;
        Ok(Self {
            encoding,
            level,
            config,
            destination: destination.describe(),
            output: Mutex::new(output),
            write_failed: AtomicBool::new(false),
        })
    }

    /// Build a file sink at `path`.
    pub fn file(
        encoding: Encoding,
        path: impl AsRef<Path>,
        level: Level,
        config: EncoderConfig,
    ) -> Result<Self> {
        Self::build(
            encoding,
            Destination::File(path.as_ref().to_path_buf()),
            level,
            config,
        )
    }

    /// A sink that drops everything.
    pub fn discard() -> Self {
        Self {
            encoding: Encoding::Console,
            level: Level::Error,
            config: EncoderConfig::plain(),
            destination: Destination::Discard.describe(),
            output: Mutex::new(Output::Discard),
            write_failed: AtomicBool::new(false),
        }
    }

    /// A sink writing into `buffer`.
    pub fn memory(
        encoding: Encoding,
        buffer: MemoryBuffer,
        level: Level,
        config: EncoderConfig,
    ) -> Self {
        Self {
            encoding,
            level,
            config,
            destination: "memory".to_string(),
            output: Mutex::new(Output::Memory(buffer)),
            write_failed: AtomicBool::new(false),
        }
    }

    /// The entry encoding.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// The minimum level written.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Whether entries at `level` reach the destination.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    /// Encode and write one entry.
    ///
    /// Write failures are absorbed; the first one is reported through
    /// `tracing`.
    pub fn write(&self, entry: &Entry<'_>) {
        if !self.enabled(entry.level) {
            return;
        }
        let line = encode(self.encoding, &self.config, entry);
        if let Err(error) = self.output.lock().write_all(line.as_bytes()) {
            if !self.write_failed.swap(true, Ordering::Relaxed) {
                tracing::warn!(
                    destination = %self.destination,
                    %error,
                    "dropping log entries after write failure"
                );
            }
        }
    }

    /// Flush buffered entries and synchronize the destination.
    pub fn sync(&self) -> Result<()> {
        self.output.lock().sync().map_err(LogError::Flush)
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sink")
            .field("encoding", &self.encoding)
            .field("level", &self.level)
            .field("destination", &self.destination)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_sink_creates_directory_and_appends() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("app.log");

        let sink = Sink::file(Encoding::Json, &path, Level::Debug, EncoderConfig::plain()).unwrap();
        sink.write(&Entry::now(Level::Info, "first", &[]));
        sink.write(&Entry::now(Level::Error, "second", &[]));
        sink.sync().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["message"], "second");
        assert_eq!(second["level"], "ERROR");
    }

    #[test]
    fn test_entries_below_minimum_level_are_dropped() {
        let buffer = MemoryBuffer::new();
        let sink = Sink::memory(
            Encoding::Console,
            buffer.clone(),
            Level::Info,
            EncoderConfig::router(),
        );

        sink.write(&Entry::now(Level::Debug, "hidden", &[]));
        sink.write(&Entry::now(Level::Info, "shown", &[]));

        assert_eq!(buffer.lines().len(), 1);
        assert!(buffer.contains("\tINFO\tshown"));
    }

    #[test]
    fn test_sync_failure_is_flush_error() {
        let buffer = MemoryBuffer::new();
        buffer.fail_sync(true);
        let sink = Sink::memory(Encoding::Json, buffer, Level::Debug, EncoderConfig::plain());

        assert!(sink.sync().unwrap_err().is_flush());
    }

    #[cfg(unix)]
    #[test]
    fn test_unusable_destination_is_configuration_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"file").unwrap();

        let err = Sink::file(
            Encoding::Console,
            blocker.join("app.log"),
            Level::Debug,
            EncoderConfig::plain(),
        )
        .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_destination_parse() {
        assert!(matches!(Destination::parse("stdout"), Destination::Stdout));
        assert!(matches!(Destination::parse("stderr"), Destination::Stderr));
        assert!(matches!(Destination::parse("/tmp/x.log"), Destination::File(_)));
    }

    #[test]
    fn test_discard_sink_never_fails() {
        let sink = Sink::discard();
        sink.write(&Entry::now(Level::Error, "gone", &[]));
        sink.sync().unwrap();
    }
}
