//! Request execution and outcome routing.
//!
//! Each accepted record is sent from its own detached thread by
//! [`spawn_request`]. The thread performs a single blocking POST, classifies
//! the response, and hands the outcome to an [`OutcomeReporter`].
//!
//! Request threads are marked so the `log` bridge can drop records emitted
//! while a request runs. Without that, the HTTP stack's own debug output
//! would be ingested and trigger further requests.

use std::cell::Cell;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::debug;
use parking_lot::{Condvar, Mutex};
use ureq::{Agent, AgentBuilder};

use super::config::{HumioHandlerConfig, ResultCallback};
use super::error::IngestError;

const REQUEST_THREAD_NAME: &str = "humio-ingest";

thread_local! {
    static ON_REQUEST_THREAD: Cell<bool> = const { Cell::new(false) };
}

/// Whether the current thread is delivering an ingest request.
pub(crate) fn on_request_thread() -> bool {
    ON_REQUEST_THREAD.with(Cell::get)
}

/// Receives diagnostic lines for failures nobody else handles.
pub(super) type DiagnosticSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Blocking client for the ingest endpoint.
pub(super) struct IngestClient {
    agent: Agent,
    url: String,
    authorization: String,
}

impl IngestClient {
    pub(super) fn new(config: &HumioHandlerConfig) -> Self {
        // Idle connections are never reused; every request opens its own.
        let agent = AgentBuilder::new()
            .max_idle_connections(0)
            .user_agent(concat!("humio_logging/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            url: config.ingest_url(),
            authorization: format!("Bearer {}", config.ingest_token),
        }
    }

    pub(super) fn url(&self) -> &str {
        &self.url
    }

    /// POST `payload` once and classify the result.
    pub(super) fn send(&self, payload: &str) -> Result<(), IngestError> {
        let result = self
            .agent
            .post(&self.url)
            .set("Authorization", &self.authorization)
            .set("Content-Type", "application/json")
            .send_string(payload);

        match result {
            Ok(response) => {
                debug!("HumioHandler: ingest accepted with status {}", response.status());
                Ok(())
            }
            Err(ureq::Error::Status(code, response)) => Err(status_error(code, response)),
            Err(ureq::Error::Transport(transport)) => Err(IngestError::transport(transport)),
        }
    }
}

/// Build an [`IngestError::Http`] from a rejected response.
///
/// An unreadable body leaves the message empty rather than masking the
/// status code.
fn status_error(code: u16, response: ureq::Response) -> IngestError {
    let message = response.into_string().unwrap_or_default();
    IngestError::Http { code, message }
}

/// Routes request outcomes to the callback, the diagnostic sink, or nowhere.
pub(super) struct OutcomeReporter {
    on_result: Option<ResultCallback>,
    suppress_errors: bool,
    sink: DiagnosticSink,
}

impl OutcomeReporter {
    /// Reporter writing unhandled failures to stderr.
    pub(super) fn new(config: &HumioHandlerConfig) -> Self {
        Self::with_sink(config, Arc::new(|line: &str| eprintln!("{line}")))
    }

    pub(super) fn with_sink(config: &HumioHandlerConfig, sink: DiagnosticSink) -> Self {
        Self {
            on_result: config.on_result.clone(),
            suppress_errors: config.suppress_errors,
            sink,
        }
    }

    pub(super) fn report(&self, outcome: Result<(), IngestError>) {
        if let Some(callback) = &self.on_result {
            callback(outcome);
            return;
        }
        if let Err(err) = outcome
            && !self.suppress_errors
        {
            (self.sink)(&diagnostic_line(&err));
        }
    }
}

pub(super) fn diagnostic_line(err: &IngestError) -> String {
    format!("humio_logging: {err}")
}

/// Counter of requests that have been spawned but not yet reported.
#[derive(Clone, Default)]
pub(super) struct InFlight {
    state: Arc<(Mutex<usize>, Condvar)>,
}

impl InFlight {
    pub(super) fn begin(&self) -> InFlightGuard {
        *self.state.0.lock() += 1;
        InFlightGuard {
            state: Arc::clone(&self.state),
        }
    }

    pub(super) fn count(&self) -> usize {
        *self.state.0.lock()
    }

    /// Block until the counter reaches zero or `timeout` elapses.
    ///
    /// Returns `true` when no request remains in flight.
    pub(super) fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let (lock, idle) = &*self.state;
        let mut count = lock.lock();
        while *count > 0 {
            if idle.wait_until(&mut count, deadline).timed_out() {
                return *count == 0;
            }
        }
        true
    }
}

/// Decrements the in-flight counter on drop.
pub(super) struct InFlightGuard {
    state: Arc<(Mutex<usize>, Condvar)>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let (lock, idle) = &*self.state;
        let mut count = lock.lock();
        *count = count.saturating_sub(1);
        if *count == 0 {
            idle.notify_all();
        }
    }
}

/// Send `payload` from a new detached thread and report its outcome.
///
/// If the thread cannot be spawned the failure is reported immediately as a
/// transport error.
pub(super) fn spawn_request(
    client: &Arc<IngestClient>,
    reporter: &Arc<OutcomeReporter>,
    in_flight: &InFlight,
    payload: String,
) {
    let guard = in_flight.begin();
    let thread_client = Arc::clone(client);
    let thread_reporter = Arc::clone(reporter);
    let spawned = thread::Builder::new()
        .name(REQUEST_THREAD_NAME.into())
        .spawn(move || {
            ON_REQUEST_THREAD.with(|flag| flag.set(true));
            let outcome = thread_client.send(&payload);
            thread_reporter.report(outcome);
            drop(guard);
        });
    if let Err(err) = spawned {
        reporter.report(Err(IngestError::transport(err)));
    }
}
