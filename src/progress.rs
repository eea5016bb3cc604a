//! Progress event boundary between the split engine and its caller.

use tracing::{debug, error, info};

/// Kind of status update emitted while splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A step started or advanced
    Progress,
    /// A whole operation finished
    Success,
    /// A whole operation failed
    Fail,
    /// Raw subprocess output, one line per event
    Log,
}

/// Receiver for human-readable status lines.
///
/// The engine emits a `Progress` event before each cut and `Log` events
/// while draining subprocess output; nothing is ever read back from the
/// sink.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: Event, text: &str);
}

/// Sink that forwards events to the tracing subscriber.
#[derive(Debug, Default, Clone)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn emit(&self, event: Event, text: &str) {
        match event {
            Event::Fail => error!("{}", text),
            Event::Log => debug!("{}", text),
            Event::Progress | Event::Success => info!("{}", text),
        }
    }
}

/// Sink that stores events in memory, for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: std::sync::Mutex<Vec<(Event, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(Event, String)> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: Event, text: &str) {
        self.events.lock().unwrap().push((event, text.to_string()));
    }
}
