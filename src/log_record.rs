//! Log record representation passed from loggers to handlers.
//!
//! A [`LogRecord`] captures one log event along with its contextual metadata
//! such as the timestamp, source location, thread name and arbitrary
//! structured key-values.

use crate::level::HumioLevel;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::thread;
use std::time::SystemTime;

/// Additional context associated with a log record.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordMetadata {
    /// Rust module path where the log call originated.
    pub module_path: String,
    /// Source file name for the log call.
    pub filename: String,
    /// Line number in the source file.
    pub line_number: u32,
    /// Time the record was created.
    pub timestamp: SystemTime,
    /// Name of the thread that created the record (if any).
    pub thread_name: Option<String>,
    /// Structured key-value pairs attached to the record.
    pub key_values: BTreeMap<String, Value>,
}

impl RecordMetadata {
    /// Capture timestamp and thread name from the current execution context.
    fn capture_runtime() -> (SystemTime, Option<String>) {
        (
            SystemTime::now(),
            thread::current().name().map(ToString::to_string),
        )
    }
}

impl Default for RecordMetadata {
    fn default() -> Self {
        let (timestamp, thread_name) = Self::capture_runtime();
        Self {
            module_path: String::new(),
            filename: String::new(),
            line_number: 0,
            timestamp,
            thread_name,
            key_values: BTreeMap::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogRecord {
    /// Name of the logger that created this record.
    pub logger: String,
    /// Severity of the record.
    pub level: HumioLevel,
    /// The log message content.
    pub message: String,
    /// Contextual metadata for the record.
    pub metadata: RecordMetadata,
}

impl LogRecord {
    /// Construct a new log record from logger `name`, `level`, and `message`.
    pub fn new(logger: &str, level: HumioLevel, message: &str) -> Self {
        Self::with_metadata(logger, level, message, RecordMetadata::default())
    }

    /// Construct a log record with explicit source location and key-values.
    ///
    /// The timestamp and thread name are always captured at construction,
    /// overriding whatever `metadata` carried.
    pub fn with_metadata(
        logger: &str,
        level: HumioLevel,
        message: &str,
        mut metadata: RecordMetadata,
    ) -> Self {
        let (timestamp, thread_name) = RecordMetadata::capture_runtime();
        metadata.timestamp = timestamp;
        metadata.thread_name = thread_name;
        Self {
            logger: logger.to_owned(),
            level,
            message: message.to_owned(),
            metadata,
        }
    }

    /// Attach a structured key-value pair, replacing any previous value.
    pub fn with_key_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.key_values.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.level, self.message)
    }
}
