//! A simple handler that accumulates records in memory for test assertions.
//!
//! This module is shared across multiple test files so that each test module
//! does not need its own copy of the same boilerplate.

use crate::handler::{DoneSignal, Handler};
use crate::level::HumioLevel;
use crate::log_record::LogRecord;
use parking_lot::Mutex;
use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Handler that stores every record it receives for later inspection.
#[derive(Clone, Default)]
pub struct CollectingHandler {
    records: Arc<Mutex<Vec<LogRecord>>>,
    released: Arc<AtomicUsize>,
    min_level: HumioLevel,
}

impl CollectingHandler {
    /// Create a new empty handler accepting every level.
    pub fn new() -> Self {
        Self::with_min_level(HumioLevel::Trace)
    }

    pub fn with_min_level(min_level: HumioLevel) -> Self {
        Self {
            min_level,
            ..Self::default()
        }
    }

    /// Return a snapshot of all records received so far.
    pub fn collected(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Number of done signals this handler has released.
    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

impl Handler for CollectingHandler {
    fn handle(&self, record: LogRecord, done: DoneSignal) {
        self.records.lock().push(record);
        self.released.fetch_add(1, Ordering::SeqCst);
        done.signal();
    }

    fn min_level(&self) -> HumioLevel {
        self.min_level
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
