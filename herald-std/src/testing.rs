//! Testing utilities for Herald.
//!
//! This module provides test doubles for hooks and handlers.
//!
//! # Features
//!
//! - [`RecordingHandler`]: A handler that records every event it receives
//! - [`CountingHandler`]: A handler that counts invocations
//! - [`FailingHandler`]: A handler that always fails
//! - [`StopHook`]: A hook that suppresses and counts what it suppressed

use herald_core::{BoxError, Event, Handler, Hook, HookResult, Payload};
use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recording Handler
// ============================================================================

/// A handler that records all events it receives.
///
/// Clones share the same record, so keep one clone for assertions and
/// register the other.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHandler::new();
/// bus.subscribe_handler("*", recorder.clone(), false)?;
///
/// bus.emit("PageView", payload)?;
/// assert_eq!(recorder.event_types(), vec!["PageView"]);
/// ```
#[derive(Clone, Default)]
pub struct RecordingHandler {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingHandler {
    /// Create a new, empty recording handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a clone of the recorded events.
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The recorded event types, in delivery order.
    pub fn event_types(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .map(|event| event.event_type)
            .collect()
    }

    /// Get the number of recorded events.
    pub fn count(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Clear all recorded events.
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Handler for RecordingHandler {
    fn call(&self, event_type: &str, payload: &Payload) -> Result<(), BoxError> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Event::new(event_type, payload.clone()));
        Ok(())
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations.
#[derive(Clone, Default)]
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Handler for CountingHandler {
    fn call(&self, _event_type: &str, _payload: &Payload) -> Result<(), BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Failing Handler
// ============================================================================

/// A handler that fails every call with a fixed message.
#[derive(Clone)]
pub struct FailingHandler {
    message: String,
    calls: Arc<AtomicUsize>,
}

impl FailingHandler {
    /// Create a handler failing with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of calls attempted so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Handler for FailingHandler {
    fn call(&self, _event_type: &str, _payload: &Payload) -> Result<(), BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.message.clone().into())
    }
}

// ============================================================================
// Stop Hook
// ============================================================================

/// A hook that suppresses every event it sees and counts them.
#[derive(Clone, Default)]
pub struct StopHook {
    stopped: Arc<AtomicUsize>,
}

impl StopHook {
    /// Create a new stop hook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events suppressed so far.
    pub fn stopped(&self) -> usize {
        self.stopped.load(Ordering::SeqCst)
    }
}

impl Hook for StopHook {
    fn on_event(&self, _event_type: &str, _payload: &mut Payload) -> Result<HookResult, BoxError> {
        self.stopped.fetch_add(1, Ordering::SeqCst);
        Ok(HookResult::Stop)
    }
}
