//! Serialization helpers for ingest payloads.
//!
//! The unstructured ingest API expects a JSON array of request bodies, each
//! carrying a list of raw message strings and optional tags. The handler
//! always sends exactly one body holding exactly one message: the record
//! encoded as a JSON string.

use std::collections::BTreeMap;

use serde::Serialize;

use super::record::IngestRecord;
use crate::log_record::LogRecord;

/// One element of the ingest request array.
#[derive(Debug, Serialize)]
pub struct IngestRequestBody<'a> {
    pub messages: Vec<String>,
    #[serde(skip_serializing_if = "no_tags")]
    pub tags: &'a BTreeMap<String, String>,
}

fn no_tags(tags: &&BTreeMap<String, String>) -> bool {
    tags.is_empty()
}

/// Serialise a record to the JSON string placed in `messages`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn serialise_record(record: &LogRecord) -> serde_json::Result<String> {
    serde_json::to_string(&IngestRecord::from(record))
}

/// Serialise the complete request payload for `record`.
///
/// `tags` is omitted from the body when empty.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn serialise_payload(
    record: &LogRecord,
    tags: &BTreeMap<String, String>,
) -> serde_json::Result<String> {
    let body = IngestRequestBody {
        messages: vec![serialise_record(record)?],
        tags,
    };
    serde_json::to_string(&[body])
}
