//! # Before Stage (Hook)
//!
//! Hooks run against every incoming event before it is recorded. A hook may
//! rewrite the payload in place, and may suppress the event entirely by
//! returning [`HookResult::Stop`]. A suppressed event is never recorded and
//! never reaches any [`Handler`](crate::Handler).
//!
//! Closures of the form `Fn(&str, &mut Payload) -> R` are hooks whenever `R`
//! implements [`IntoHookResult`]. In particular a closure returning `false`
//! suppresses, and one returning `()` lets the event through.

use crate::{error::BoxError, event::Payload, response::IntoHookResult};

/// Result of hook execution indicating whether the event may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookResult {
    /// Continue with the next hook, then record and deliver the event.
    #[default]
    Next,
    /// Suppress the event: no further hooks, no history, no handlers.
    Stop,
}

/// A pre-processing step run before an event is recorded.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Hook`",
    label = "missing `Hook` implementation",
    note = "Hooks are `Fn(&str, &mut Payload) -> R` closures or types implementing `on_event`."
)]
pub trait Hook: Send + Sync + 'static {
    /// Called for each incoming event whose type matches the hook's criteria.
    fn on_event(&self, event_type: &str, payload: &mut Payload) -> Result<HookResult, BoxError>;
}

impl<F, R> Hook for F
where
    F: Fn(&str, &mut Payload) -> R + Send + Sync + 'static,
    R: IntoHookResult,
{
    fn on_event(&self, event_type: &str, payload: &mut Payload) -> Result<HookResult, BoxError> {
        (self)(event_type, payload).into_hook_result()
    }
}
