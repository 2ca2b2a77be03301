//! Public handler type exported by the crate.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    events::{HandlerEvent, Listener, Observers},
    handler::{DoneSignal, Handler},
    level::HumioLevel,
    log_record::LogRecord,
};

use super::{
    config::HumioHandlerConfig,
    dispatch::{InFlight, IngestClient, OutcomeReporter, spawn_request},
    serialise::serialise_payload,
};

/// How long [`Handler::flush`] waits for outstanding requests.
pub const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// Handler forwarding records to a Humio ingest endpoint.
///
/// `handle` never blocks on the network: it notifies `Logged` listeners,
/// encodes the payload, releases the done signal, and leaves delivery to a
/// detached request thread.
pub struct HumioHandler {
    config: HumioHandlerConfig,
    client: Arc<IngestClient>,
    reporter: Arc<OutcomeReporter>,
    observers: Observers,
    in_flight: InFlight,
}

impl HumioHandler {
    /// Construct the handler from a configuration object.
    pub fn new(config: HumioHandlerConfig) -> Self {
        let client = Arc::new(IngestClient::new(&config));
        let reporter = Arc::new(OutcomeReporter::new(&config));
        Self {
            config,
            client,
            reporter,
            observers: Observers::new(),
            in_flight: InFlight::default(),
        }
    }

    pub fn config(&self) -> &HumioHandlerConfig {
        &self.config
    }

    /// Subscribe `listener` to `event`.
    pub fn on<F>(&self, event: HandlerEvent, listener: F)
    where
        F: Fn(&LogRecord) + Send + Sync + 'static,
    {
        self.observers
            .subscribe(event, Arc::new(listener) as Listener);
    }

    /// Number of requests dispatched but not yet reported.
    pub fn in_flight(&self) -> usize {
        self.in_flight.count()
    }

    /// Wait up to `timeout` for every dispatched request to be reported.
    ///
    /// Requests are never cancelled; a `false` return only means some were
    /// still running when the timeout elapsed.
    pub fn flush_timeout(&self, timeout: Duration) -> bool {
        self.in_flight.wait_idle(timeout)
    }

    #[cfg(test)]
    pub(super) fn with_diagnostic_sink(mut self, sink: super::dispatch::DiagnosticSink) -> Self {
        self.reporter = Arc::new(OutcomeReporter::with_sink(&self.config, sink));
        self
    }
}

impl Handler for HumioHandler {
    fn handle(&self, record: LogRecord, done: DoneSignal) {
        self.observers.emit(HandlerEvent::Logged, &record);
        let payload = serialise_payload(&record, &self.config.tags);
        done.signal();
        match payload {
            Ok(payload) => spawn_request(&self.client, &self.reporter, &self.in_flight, payload),
            Err(err) => self.reporter.report(Err(err.into())),
        }
    }

    fn min_level(&self) -> HumioLevel {
        self.config.level
    }

    fn flush(&self) -> bool {
        self.flush_timeout(DEFAULT_FLUSH_TIMEOUT)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl std::fmt::Debug for HumioHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HumioHandler")
            .field("url", &self.client.url())
            .field("level", &self.config.level)
            .field("observers", &self.observers)
            .field("in_flight", &self.in_flight())
            .finish()
    }
}
