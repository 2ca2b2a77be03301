use std::any::Any;
use std::fmt;

use crate::level::HumioLevel;
use crate::log_record::LogRecord;

/// Completion signal handed to [`Handler::handle`].
///
/// Releasing the signal tells the logger that the handler has finished
/// consuming the record. It says nothing about delivery.
pub struct DoneSignal(Option<Box<dyn FnOnce() + Send>>);

impl DoneSignal {
    /// Wrap `release` so it runs when the signal is released.
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self(Some(Box::new(release)))
    }

    /// A signal nobody is waiting on.
    pub fn noop() -> Self {
        Self(None)
    }

    /// Release the signal.
    pub fn signal(mut self) {
        if let Some(release) = self.0.take() {
            release();
        }
    }
}

impl fmt::Debug for DoneSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DoneSignal")
            .field(&self.0.as_ref().map(|_| "<release>"))
            .finish()
    }
}

/// Trait implemented by all log handlers.
///
/// Handlers are `Send + Sync` so a logger can be shared across threads.
/// `handle` must not block on I/O and must not fail: anything slow or
/// fallible happens off the caller's thread.
pub trait Handler: Send + Sync {
    /// Dispatch a log record for handling and release `done` once the
    /// record has been consumed.
    fn handle(&self, record: LogRecord, done: DoneSignal);

    /// Lowest level this handler accepts. Loggers skip the handler for
    /// records below it.
    fn min_level(&self) -> HumioLevel {
        HumioLevel::Trace
    }

    /// Wait for outstanding work. Returns `false` on timeout.
    fn flush(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn signal_runs_release_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        DoneSignal::new(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        })
        .signal();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropping_without_signal_skips_release() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        drop(DoneSignal::new(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        DoneSignal::noop().signal();
    }
}
