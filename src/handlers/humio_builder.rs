//! Builder for [`HumioHandler`](crate::humio_handler::HumioHandler).
//!
//! Collects optional overrides and merges them onto
//! [`HumioHandlerConfig::default`] when built. Only the level is validated:
//! a missing or wrong ingest token is reported by the server at request
//! time.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::humio_handler::{HumioHandler, HumioHandlerConfig, IngestError, ResultCallback};
use crate::level::HumioLevel;

use super::{HandlerBuildError, HandlerBuilderTrait};

/// Builder for constructing [`HumioHandler`] instances.
#[derive(Clone, Default)]
pub struct HumioHandlerBuilder {
    ingest_token: Option<String>,
    api_base_url: Option<String>,
    tags: BTreeMap<String, String>,
    on_result: Option<ResultCallback>,
    suppress_errors: Option<bool>,
    level: Option<String>,
}

impl HumioHandlerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bearer credential used for ingestion.
    pub fn with_ingest_token(mut self, token: impl Into<String>) -> Self {
        self.ingest_token = Some(token.into());
        self
    }

    /// Override the service base URL. Defaults to the hosted Humio cloud.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Add a single static tag.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Replace all static tags.
    pub fn with_tags(mut self, tags: BTreeMap<String, String>) -> Self {
        self.tags = tags;
        self
    }

    /// Receive the outcome of every request, successes included.
    pub fn with_on_result<F>(mut self, callback: F) -> Self
    where
        F: Fn(Result<(), IngestError>) + Send + Sync + 'static,
    {
        self.on_result = Some(Arc::new(callback));
        self
    }

    /// Print failures to stderr when no callback is set (`false`) or drop
    /// them (`true`, the default).
    pub fn with_suppress_errors(mut self, suppress: bool) -> Self {
        self.suppress_errors = Some(suppress);
        self
    }

    /// Set the minimum level by name, for example `"info"` or `"warn"`.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    fn build_config(&self) -> Result<HumioHandlerConfig, HandlerBuildError> {
        let level = match &self.level {
            Some(name) => name.parse::<HumioLevel>()?,
            None => HumioLevel::default(),
        };

        let defaults = HumioHandlerConfig::default();
        Ok(HumioHandlerConfig {
            ingest_token: self.ingest_token.clone().unwrap_or(defaults.ingest_token),
            api_base_url: self.api_base_url.clone().unwrap_or(defaults.api_base_url),
            tags: self.tags.clone(),
            on_result: self.on_result.clone(),
            suppress_errors: self.suppress_errors.unwrap_or(defaults.suppress_errors),
            level,
        })
    }
}

impl HandlerBuilderTrait for HumioHandlerBuilder {
    type Handler = HumioHandler;

    fn build_inner(&self) -> Result<Self::Handler, HandlerBuildError> {
        let config = self.build_config()?;
        Ok(HumioHandler::new(config))
    }
}

impl fmt::Debug for HumioHandlerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HumioHandlerBuilder")
            .field("ingest_token", &self.ingest_token.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("tags", &self.tags)
            .field("on_result", &self.on_result.as_ref().map(|_| "<callback>"))
            .field("suppress_errors", &self.suppress_errors)
            .field("level", &self.level)
            .finish()
    }
}
