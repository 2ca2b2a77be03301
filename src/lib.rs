//! Forward structured log records to a Humio ingest endpoint.
//!
//! The crate pairs a small host logger ([`HumioLogger`]) with
//! [`HumioHandler`], which posts each accepted record to Humio's
//! unstructured ingest API from a detached thread. Records can also be fed
//! from the `log` crate through [`log_compat::install`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use humio_logging::{HandlerBuilderTrait, HumioHandlerBuilder, HumioLevel, HumioLogger};
//!
//! let handler = HumioHandlerBuilder::new()
//!     .with_ingest_token("my-ingest-token")
//!     .with_tag("app", "billing")
//!     .with_level("warn")
//!     .with_on_result(|outcome| {
//!         if let Err(err) = outcome {
//!             eprintln!("delivery failed: {err}");
//!         }
//!     })
//!     .build()
//!     .expect("valid configuration");
//!
//! let logger = HumioLogger::new("billing");
//! logger.add_handler(handler);
//! logger.log(HumioLevel::Error, "invoice export failed");
//! logger.flush_handlers();
//! ```

pub mod events;
pub mod file_config;
pub mod handler;
pub mod handlers;
pub mod humio_handler;
pub mod level;
pub mod log_compat;
pub mod log_record;
pub mod logger;

#[cfg(test)]
mod test_utils;

pub use events::{HandlerEvent, Listener, Observers};
pub use file_config::{ConfigError, builder_from_ini_str, load_handler_builder};
pub use handler::{DoneSignal, Handler};
pub use handlers::{HandlerBuildError, HandlerBuilderTrait, HumioHandlerBuilder};
pub use humio_handler::{
    DEFAULT_API_BASE_URL, DEFAULT_FLUSH_TIMEOUT, HumioHandler, HumioHandlerConfig, IngestError,
    ResultCallback,
};
pub use level::{HumioLevel, LevelParseError};
pub use log_record::{LogRecord, RecordMetadata};
pub use logger::HumioLogger;
