//! Nullable event sink — record events instead of delivering them.

use ballot_types::{ElectionEvent, EventSink};
use std::sync::Mutex;

/// A test sink that records every emitted event in order.
pub struct NullEventSink {
    recorded: Mutex<Vec<ElectionEvent>>,
}

impl NullEventSink {
    pub fn new() -> Self {
        Self {
            recorded: Mutex::new(Vec::new()),
        }
    }

    /// Get all recorded events (for assertions).
    pub fn events(&self) -> Vec<ElectionEvent> {
        self.recorded.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.recorded.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.recorded.lock().unwrap().clear();
    }
}

impl Default for NullEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for NullEventSink {
    fn emit(&self, event: &ElectionEvent) {
        self.recorded.lock().unwrap().push(event.clone());
    }
}
