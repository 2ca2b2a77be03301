//! Configuration consumed by [`HumioHandler`](super::HumioHandler).
//!
//! `HumioHandlerBuilder` merges user overrides onto
//! [`HumioHandlerConfig::default`] once; the resulting value is never
//! mutated afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::error::IngestError;
use crate::level::HumioLevel;

/// Base URL of the hosted Humio service.
pub const DEFAULT_API_BASE_URL: &str = "https://cloud.humio.com";
/// Path of the unstructured ingest API, relative to the base URL.
pub const INGEST_PATH: &str = "/api/v1/ingest/humio-unstructured";

/// Callback receiving the outcome of each ingest request.
///
/// Invoked exactly once per dispatched record, from the request thread.
pub type ResultCallback = Arc<dyn Fn(Result<(), IngestError>) + Send + Sync>;

#[derive(Clone)]
pub struct HumioHandlerConfig {
    /// Bearer credential sent with every request. Not validated locally.
    pub ingest_token: String,
    /// Scheme and host of the ingest service.
    pub api_base_url: String,
    /// Static annotations attached to every request.
    pub tags: BTreeMap<String, String>,
    /// Receives every request outcome, success included.
    pub on_result: Option<ResultCallback>,
    /// When no callback is set, discard failures instead of printing them.
    pub suppress_errors: bool,
    /// Minimum level the host logger should pass to this handler.
    pub level: HumioLevel,
}

impl HumioHandlerConfig {
    /// Full ingest URL derived from `api_base_url`.
    pub fn ingest_url(&self) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), INGEST_PATH)
    }
}

impl Default for HumioHandlerConfig {
    fn default() -> Self {
        Self {
            ingest_token: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            tags: BTreeMap::new(),
            on_result: None,
            suppress_errors: true,
            level: HumioLevel::Info,
        }
    }
}

impl fmt::Debug for HumioHandlerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HumioHandlerConfig")
            .field("ingest_token", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("tags", &self.tags)
            .field("on_result", &self.on_result.as_ref().map(|_| "<callback>"))
            .field("suppress_errors", &self.suppress_errors)
            .field("level", &self.level)
            .finish()
    }
}
