//! Entry encoding.
//!
//! A sink renders every entry through one of two encodings sharing the same
//! key names: a tab separated console line, or a single-line JSON object.

use chrono::{DateTime, Local};
use fanlog_types::{Encoding, Field, Level};
use serde_json::{Map, Value};
use std::panic::Location;

use crate::time::{ISO8601_LAYOUT, PLAIN_TIME_LAYOUT};

/// How timestamps are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeFormat {
    /// A chrono `strftime` layout
    Layout(String),
    /// ISO-8601 with milliseconds and numeric offset
    Iso8601,
}

/// Key names and formats used when rendering entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Key holding the message
    pub message_key: String,
    /// Key holding the capitalized level
    pub level_key: String,
    /// Key holding the timestamp
    pub time_key: String,
    /// Key holding the short caller location, when one is known
    pub caller_key: String,
    /// Timestamp rendering
    pub time_format: TimeFormat,
}

impl EncoderConfig {
    /// Keys used by directly constructed loggers.
    pub fn plain() -> Self {
        Self {
            message_key: "message".to_string(),
            level_key: "level".to_string(),
            time_key: "timestamp".to_string(),
            caller_key: "caller".to_string(),
            time_format: TimeFormat::Layout(PLAIN_TIME_LAYOUT.to_string()),
        }
    }

    /// Keys used by the router's streams.
    pub fn router() -> Self {
        Self {
            message_key: "msg".to_string(),
            level_key: "level".to_string(),
            time_key: "time".to_string(),
            caller_key: "caller".to_string(),
            time_format: TimeFormat::Iso8601,
        }
    }

    /// Render a timestamp according to the configured format.
    pub fn format_time(&self, time: &DateTime<Local>) -> String {
        match &self.time_format {
            TimeFormat::Layout(layout) => time.format(layout).to_string(),
            TimeFormat::Iso8601 => time.format(ISO8601_LAYOUT).to_string(),
        }
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::plain()
    }
}

/// Source location of a logging call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    file: &'static str,
    line: u32,
}

impl Caller {
    /// Capture a location. Returns `None` when the location carries no file.
    pub fn resolve(location: &Location<'static>) -> Option<Self> {
        if location.file().is_empty() {
            return None;
        }
        Some(Self {
            file: location.file(),
            line: location.line(),
        })
    }

    /// Last two path segments of the file, joined with `/`.
    pub fn short_file(&self) -> String {
        let segments: Vec<&str> = self
            .file
            .split(['/', '\\'])
            .filter(|segment| !segment.is_empty())
            .collect();
        let start = segments.len().saturating_sub(2);
        segments[start..].join("/")
    }

    /// Line number of the call.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// `dir/file.rs:42`
    pub fn short(&self) -> String {
        format!("{}:{}", self.short_file(), self.line)
    }
}

/// A single log entry ready for encoding.
#[derive(Debug, Clone)]
pub struct Entry<'a> {
    /// Severity
    pub level: Level,
    /// When the entry was produced
    pub time: DateTime<Local>,
    /// Where the entry was produced, if known
    pub caller: Option<Caller>,
    /// The message
    pub message: &'a str,
    /// Structured annotations
    pub fields: &'a [Field],
}

impl<'a> Entry<'a> {
    /// Entry stamped with the current local time.
    pub fn now(level: Level, message: &'a str, fields: &'a [Field]) -> Self {
        Self {
            level,
            time: Local::now(),
            caller: None,
            message,
            fields,
        }
    }

    /// Attach a caller location.
    pub fn with_caller(mut self, caller: Option<Caller>) -> Self {
        self.caller = caller;
        self
    }
}

/// Render an entry as one newline-terminated line.
pub fn encode(encoding: Encoding, config: &EncoderConfig, entry: &Entry<'_>) -> String {
    let mut line = match encoding {
        Encoding::Console => encode_console(config, entry),
        Encoding::Json => encode_json(config, entry),
    };
    line.push('\n');
    line
}

fn encode_console(config: &EncoderConfig, entry: &Entry<'_>) -> String {
    let mut parts = vec![
        config.format_time(&entry.time),
        entry.level.as_str().to_string(),
    ];
    if let Some(caller) = &entry.caller {
        parts.push(caller.short());
    }
    parts.push(entry.message.to_string());
    if !entry.fields.is_empty() {
        parts.push(Value::Object(fields_map(entry.fields)).to_string());
    }
    parts.join("\t")
}

fn encode_json(config: &EncoderConfig, entry: &Entry<'_>) -> String {
    let mut object = Map::new();
    object.insert(config.level_key.clone(), Value::from(entry.level.as_str()));
    object.insert(config.time_key.clone(), Value::from(config.format_time(&entry.time)));
    if let Some(caller) = &entry.caller {
        object.insert(config.caller_key.clone(), Value::from(caller.short()));
    }
    object.insert(config.message_key.clone(), Value::from(entry.message));
    // Later keys overwrite earlier ones
    for field in entry.fields {
        object.insert(field.key().to_string(), field.value().clone());
    }
    Value::Object(object).to_string()
}

fn fields_map(fields: &[Field]) -> Map<String, Value> {
    let mut map = Map::new();
    for field in fields {
        map.insert(field.key().to_string(), field.value().clone());
    }
    map
}
