//! Observer list used by handlers to announce accepted records.
//!
//! Listeners are registered per [`HandlerEvent`] and invoked synchronously in
//! registration order. Emission snapshots the listener list first, so a
//! listener may subscribe further listeners without deadlocking; those only
//! see later events.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::log_record::LogRecord;

/// Events a handler can emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandlerEvent {
    /// A record was accepted for dispatch. Carries no delivery outcome.
    Logged,
}

impl HandlerEvent {
    pub fn name(self) -> &'static str {
        match self {
            Self::Logged => "logged",
        }
    }
}

/// Callback invoked with the record that triggered the event.
pub type Listener = Arc<dyn Fn(&LogRecord) + Send + Sync>;

/// Mapping from event to its registered listeners.
#[derive(Default)]
pub struct Observers {
    listeners: RwLock<HashMap<HandlerEvent, Vec<Listener>>>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for `event`.
    pub fn subscribe(&self, event: HandlerEvent, listener: Listener) {
        self.listeners.write().entry(event).or_default().push(listener);
    }

    /// Invoke every listener registered for `event`.
    pub fn emit(&self, event: HandlerEvent, record: &LogRecord) {
        let snapshot = match self.listeners.read().get(&event) {
            Some(listeners) => listeners.clone(),
            None => return,
        };
        for listener in snapshot {
            listener(record);
        }
    }

    #[cfg(test)]
    pub(crate) fn listener_count(&self, event: HandlerEvent) -> usize {
        self.listeners.read().get(&event).map_or(0, Vec::len)
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.read();
        let mut map = f.debug_map();
        for (event, entries) in listeners.iter() {
            map.entry(&event.name(), &entries.len());
        }
        map.finish()
    }
}
