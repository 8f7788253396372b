//! Configuration types and structures.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use crate::errors::Result;
use crate::{Encoding, Level};

/// Configuration for a single sink-backed logger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Directory the log file lives in
    pub directory: String,
    /// File name inside `directory`
    pub name: String,
    /// Entry encoding
    #[serde(default)]
    pub encoding: Encoding,
    /// Minimum level written to the sink
    #[serde(default = "default_sink_level")]
    pub level: Level,
}

fn default_sink_level() -> Level {
    Level::Debug
}

impl SinkConfig {
    /// Console-encoded, debug-level configuration.
    pub fn new(directory: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            name: name.into(),
            encoding: Encoding::default(),
            level: default_sink_level(),
        }
    }

    /// Load a sink configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }
}

/// Configuration for the multi-stream router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Base directory; streams are written to a dated sub-directory
    pub directory: String,
    /// Base file name shared by all streams
    pub name: String,
    /// Whether to also configure the detailed stream
    #[serde(default)]
    pub detailed: bool,
}

impl RouterConfig {
    /// Create a configuration for the main and compilation streams only.
    pub fn new(directory: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            name: name.into(),
            detailed: false,
        }
    }

    /// Also configure the detailed stream.
    pub fn with_detailed(mut self) -> Self {
        self.detailed = true;
        self
    }

    /// Load a router configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }
}
