//! Handler forwarding records to a Humio ingest endpoint.
//!
//! [`HumioHandler`] serialises each [`LogRecord`](crate::log_record::LogRecord)
//! to JSON, wraps it in an unstructured-ingest request body together with any
//! static tags, and posts it to
//! `{api_base_url}/api/v1/ingest/humio-unstructured` using bearer
//! authentication.
//!
//! # Delivery Semantics
//!
//! Every accepted record produces exactly one request, sent from its own
//! detached thread. There is no queue, no retry, and no ordering guarantee
//! between requests. Outcomes are classified as:
//!
//! - **status < 400**: Success, reported as `Ok(())`.
//! - **status >= 400**: [`IngestError::Http`] carrying the status code and
//!   the response body text.
//! - **No response**: [`IngestError::Transport`] carrying the cause.
//!
//! Outcomes go to the configured result callback when present. Without one,
//! failures are written to stderr if `suppress_errors` is disabled and
//! discarded otherwise.

mod config;
mod dispatch;
mod error;
mod handler;
mod record;
mod serialise;


pub use config::{DEFAULT_API_BASE_URL, HumioHandlerConfig, INGEST_PATH, ResultCallback};
pub use error::IngestError;
pub use handler::{DEFAULT_FLUSH_TIMEOUT, HumioHandler};
pub use serialise::{IngestRequestBody, serialise_payload, serialise_record};

pub(crate) use dispatch::on_request_thread;
