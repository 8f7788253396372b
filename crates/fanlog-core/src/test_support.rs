//! Test support utilities
//!
//! In-memory destinations for capturing what a sink writes.

use parking_lot::Mutex;
use serde_json::Value;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A shared byte buffer usable as a sink destination.
///
/// Clones share the same storage, so a test keeps one handle while the
/// sink writes through another.
#[derive(Clone, Debug, Default)]
pub struct MemoryBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
    fail_sync: Arc<AtomicBool>,
    syncs: Arc<Mutex<usize>>,
}

impl MemoryBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following sync fail (or succeed again).
    pub fn fail_sync(&self, fail: bool) {
        self.fail_sync.store(fail, Ordering::SeqCst);
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    /// Written lines without trailing newlines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Written lines parsed as JSON; lines that are not JSON are skipped.
    pub fn json_lines(&self) -> Vec<Value> {
        self.lines()
            .iter()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    /// Check if any written line contains `text`.
    pub fn contains(&self, text: &str) -> bool {
        self.contents().contains(text)
    }

    /// Number of successful syncs.
    pub fn syncs(&self) -> usize {
        *self.syncs.lock()
    }

    pub(crate) fn write(&self, bytes: &[u8]) {
        self.bytes.lock().extend_from_slice(bytes);
    }

    pub(crate) fn sync(&self) -> io::Result<()> {
        if self.fail_sync.load(Ordering::SeqCst) {
            return Err(io::Error::other("memory buffer sync failure"));
        }
        *self.syncs.lock() += 1;
        Ok(())
    }
}
