//! Host logger that filters records by level and hands them to handlers.
//!
//! [`HumioLogger`] is intentionally small: it owns a level threshold and a
//! list of handlers, and invokes each handler synchronously on the caller's
//! thread. Handlers are responsible for moving slow work elsewhere.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crossbeam_channel::bounded;
use log::warn;
// parking_lot avoids poisoning and matches crate-wide locking strategy
use parking_lot::RwLock;

use crate::handler::{DoneSignal, Handler};
use crate::level::HumioLevel;
use crate::log_record::LogRecord;

pub struct HumioLogger {
    /// Identifier stamped on records created through [`HumioLogger::log`].
    name: String,
    level: AtomicU8,
    handlers: RwLock<Vec<Arc<dyn Handler>>>,
}

impl HumioLogger {
    /// Create a new logger with the given name and an `Info` threshold.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: AtomicU8::new(u8::from(HumioLevel::Info)),
            handlers: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Update the logger's minimum level.
    pub fn set_level(&self, level: HumioLevel) {
        self.level.store(u8::from(level), Ordering::Relaxed);
    }

    /// Return the logger's current minimum level.
    pub fn level(&self) -> HumioLevel {
        HumioLevel::from(self.level.load(Ordering::Relaxed))
    }

    /// Return whether `level` passes the logger's threshold.
    pub fn is_enabled_for(&self, level: HumioLevel) -> bool {
        u8::from(level) >= self.level.load(Ordering::Relaxed)
    }

    /// Build a record stamped with this logger's name and dispatch it.
    ///
    /// Returns `true` if at least one handler received the record.
    pub fn log(&self, level: HumioLevel, message: &str) -> bool {
        self.log_record(LogRecord::new(&self.name, level, message))
    }

    /// Dispatch an already-constructed record.
    ///
    /// The record is dropped when it falls below the logger's threshold.
    /// Otherwise every handler whose own minimum admits the record receives
    /// a clone together with a fresh [`DoneSignal`].
    pub fn log_record(&self, record: LogRecord) -> bool {
        if !self.is_enabled_for(record.level) {
            return false;
        }
        let handlers: Vec<Arc<dyn Handler>> = self
            .handlers
            .read()
            .iter()
            .filter(|h| record.level >= h.min_level())
            .cloned()
            .collect();
        if handlers.is_empty() {
            return false;
        }

        let (done_tx, done_rx) = bounded(handlers.len());
        for handler in &handlers {
            let tx = done_tx.clone();
            handler.handle(
                record.clone(),
                DoneSignal::new(move || {
                    let _ = tx.send(());
                }),
            );
        }
        drop(done_tx);

        let released = done_rx.try_iter().count();
        if released < handlers.len() {
            warn!(
                "HumioLogger '{}': {} of {} handlers returned without releasing their done signal",
                self.name,
                handlers.len() - released,
                handlers.len()
            );
        }
        true
    }

    /// Attach a handler to this logger.
    pub fn add_handler(&self, handler: Arc<dyn Handler>) {
        self.handlers.write().push(handler);
    }

    /// Detach a handler previously added to this logger.
    pub fn remove_handler(&self, handler: &Arc<dyn Handler>) -> bool {
        let mut handlers = self.handlers.write();
        if let Some(pos) = handlers.iter().position(|h| Arc::ptr_eq(h, handler)) {
            handlers.remove(pos);
            true
        } else {
            false
        }
    }

    /// Remove all handlers from this logger.
    pub fn clear_handlers(&self) {
        self.handlers.write().clear();
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Flush every attached handler, returning `true` only if all succeed.
    ///
    /// Every handler is flushed even after one reports failure.
    pub fn flush_handlers(&self) -> bool {
        let handlers = self.handlers.read().clone();
        handlers
            .iter()
            .fold(true, |ok, handler| handler.flush() && ok)
    }
}

impl std::fmt::Debug for HumioLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HumioLogger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("handlers", &self.handler_count())
            .finish()
    }
}
