//! # On Stage (Handler)
//!
//! Handlers observe events after they have been recorded. They see the payload
//! as it was left by the before stage and cannot suppress delivery. Their
//! errors are not swallowed: the dispatcher hands them back to whoever emitted
//! the event.

use crate::{error::BoxError, event::Payload, response::IntoOutcome};

/// The terminal endpoint for a recorded event.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Handler`",
    label = "missing `Handler` implementation",
    note = "Handlers are `Fn(&str, &Payload) -> R` closures or types implementing `call`."
)]
pub trait Handler: Send + Sync + 'static {
    /// Executes the handler for one recorded event.
    fn call(&self, event_type: &str, payload: &Payload) -> Result<(), BoxError>;
}

// Blanket impl for closures
impl<F, R> Handler for F
where
    F: Fn(&str, &Payload) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    fn call(&self, event_type: &str, payload: &Payload) -> Result<(), BoxError> {
        (self)(event_type, payload).into_outcome()
    }
}
