//! Event and payload types.

use std::sync::Arc;

/// An open, mutable mapping from field name to value.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// A recorded event, shared immutably between history and its readers.
pub type HistoryRecord = Arc<Event>;

/// A `(type, payload)` occurrence as it was recorded.
///
/// Events become immutable once recorded: the payload is the one left behind
/// by the before stage, moved out of the dispatch that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// The event-type token the event was emitted under.
    pub event_type: String,
    /// The (possibly transformed) payload.
    pub payload: Payload,
}

impl Event {
    /// Create a new event.
    pub fn new(event_type: impl Into<String>, payload: Payload) -> Self {
        Self {
            event_type: event_type.into(),
            payload,
        }
    }
}
