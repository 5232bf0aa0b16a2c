//! Logging hook for event observation.

use herald_core::{BoxError, Hook, HookResult, Payload};

/// A hook that logs events for debugging/observation. Never suppresses.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHook;

impl Hook for LoggingHook {
    fn on_event(&self, event_type: &str, payload: &mut Payload) -> Result<HookResult, BoxError> {
        tracing::info!(event_type, ?payload, "Processing event");
        Ok(HookResult::Next)
    }
}
