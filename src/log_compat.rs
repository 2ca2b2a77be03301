//! Compatibility bridge for the Rust `log` crate.
//!
//! This module provides [`HumioLogAdapter`], an implementation of `log::Log`
//! that converts `log` records into [`LogRecord`]s and dispatches them
//! through a [`HumioLogger`]. Call [`install`] once at start-up to make it the
//! global logger.
//!
//! Records emitted by this crate, or logged from a thread that is delivering
//! an ingest request, are ignored so that neither the handler's diagnostics
//! nor the HTTP stack's output feed back into ingestion.

use std::sync::Arc;

use log::{LevelFilter, Metadata, Record, SetLoggerError};

use crate::humio_handler::on_request_thread;
use crate::level::HumioLevel;
use crate::log_record::{LogRecord, RecordMetadata};
use crate::logger::HumioLogger;

const OWN_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Adapter implementing the Rust `log::Log` trait.
pub struct HumioLogAdapter {
    logger: Arc<HumioLogger>,
}

impl HumioLogAdapter {
    pub fn new(logger: Arc<HumioLogger>) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Arc<HumioLogger> {
        &self.logger
    }
}

fn map_log_level(level: log::Level) -> HumioLevel {
    match level {
        log::Level::Trace => HumioLevel::Trace,
        log::Level::Debug => HumioLevel::Debug,
        log::Level::Info => HumioLevel::Info,
        log::Level::Warn => HumioLevel::Warn,
        log::Level::Error => HumioLevel::Error,
    }
}

impl From<log::Level> for HumioLevel {
    fn from(level: log::Level) -> Self {
        map_log_level(level)
    }
}

fn is_own_target(target: &str) -> bool {
    target
        .strip_prefix(OWN_TARGET)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

impl log::Log for HumioLogAdapter {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        !is_own_target(metadata.target())
            && !on_request_thread()
            && self.logger.is_enabled_for(HumioLevel::from(metadata.level()))
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let metadata = RecordMetadata {
            module_path: record.module_path().unwrap_or_default().to_string(),
            filename: record.file().unwrap_or_default().to_string(),
            line_number: record.line().unwrap_or(0),
            ..Default::default()
        };

        let humio_record = LogRecord::with_metadata(
            record.target(),
            HumioLevel::from(record.level()),
            &record.args().to_string(),
            metadata,
        );

        self.logger.log_record(humio_record);
    }

    fn flush(&self) {
        self.logger.flush_handlers();
    }
}

/// Install `logger` as the global Rust logger.
///
/// Fails when a different global logger is already set. The maximum level
/// is opened to `Trace`; the logger's own threshold does the filtering.
pub fn install(logger: Arc<HumioLogger>) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(HumioLogAdapter::new(logger)))?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}
