//! Fixtures building Humio handlers that never reach a real service.
//!
//! Handlers point at a loopback port nothing listens on, so every request
//! fails fast with a transport error that the default configuration
//! suppresses.

use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use humio_logging::{HandlerBuilderTrait, HandlerEvent, HumioHandler, HumioHandlerBuilder, LogRecord};

/// Base URL of a loopback port that refuses connections.
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral listener");
    let addr = listener.local_addr().expect("listener has address");
    drop(listener);
    format!("http://{addr}")
}

/// Build a handler with minimum `level` and a counter of `Logged` events.
pub fn counted_handler(level: &str) -> (Arc<HumioHandler>, Arc<AtomicUsize>) {
    let handler = HumioHandlerBuilder::new()
        .with_api_base_url(unreachable_base_url())
        .with_level(level)
        .build_inner()
        .expect("build");
    let logged = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&logged);
    handler.on(HandlerEvent::Logged, move |_: &LogRecord| {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    (Arc::new(handler), logged)
}
