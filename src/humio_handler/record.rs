//! Zero-copy serializable view of a [`LogRecord`].
//!
//! Borrows from the log record so string fields are not cloned while
//! building the ingest payload.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use serde_json::Value;

use crate::log_record::LogRecord;

/// Field names emitted for every record. Key-values with these names are
/// skipped so the output never carries duplicate keys.
const RESERVED_FIELDS: [&str; 8] = [
    "message",
    "level",
    "timestamp",
    "logger",
    "module",
    "file",
    "line",
    "thread",
];

pub(super) struct IngestRecord<'a> {
    pub(super) message: &'a str,
    pub(super) level: &'static str,
    pub(super) timestamp: String,
    pub(super) logger: &'a str,
    pub(super) module: &'a str,
    pub(super) file: &'a str,
    pub(super) line: u32,
    pub(super) thread: Option<&'a str>,
    pub(super) key_values: &'a BTreeMap<String, Value>,
}

impl IngestRecord<'_> {
    fn extra_fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.key_values
            .iter()
            .filter(|(k, _)| !RESERVED_FIELDS.contains(&k.as_str()))
    }

    /// Count the total number of fields that will be serialized.
    fn count_fields(&self) -> usize {
        3 + usize::from(!self.logger.is_empty())
            + usize::from(!self.module.is_empty())
            + usize::from(!self.file.is_empty())
            + usize::from(self.line != 0)
            + usize::from(self.thread.is_some())
            + self.extra_fields().count()
    }
}

impl<'a> From<&'a LogRecord> for IngestRecord<'a> {
    fn from(record: &'a LogRecord) -> Self {
        let metadata = &record.metadata;
        let timestamp =
            DateTime::<Utc>::from(metadata.timestamp).to_rfc3339_opts(SecondsFormat::Millis, true);

        Self {
            message: &record.message,
            level: record.level.as_str(),
            timestamp,
            logger: &record.logger,
            module: &metadata.module_path,
            file: &metadata.filename,
            line: metadata.line_number,
            thread: metadata.thread_name.as_deref(),
            key_values: &metadata.key_values,
        }
    }
}

impl Serialize for IngestRecord<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.count_fields()))?;
        map.serialize_entry("message", self.message)?;
        map.serialize_entry("level", self.level)?;
        map.serialize_entry("timestamp", &self.timestamp)?;
        if !self.logger.is_empty() {
            map.serialize_entry("logger", self.logger)?;
        }
        if !self.module.is_empty() {
            map.serialize_entry("module", self.module)?;
        }
        if !self.file.is_empty() {
            map.serialize_entry("file", self.file)?;
        }
        if self.line != 0 {
            map.serialize_entry("line", &self.line)?;
        }
        if let Some(name) = self.thread {
            map.serialize_entry("thread", name)?;
        }
        for (k, v) in self.extra_fields() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
