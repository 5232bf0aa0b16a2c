//! Filter hook for conditional suppression.

use herald_core::{BoxError, Hook, HookResult, Payload};

/// A hook that suppresses events whose payload fails a predicate.
///
/// # Example
///
/// ```rust,ignore
/// // Drop page views from the health-check page.
/// bus.transform_hook(
///     "PageView",
///     FilterHook::new(|p: &Payload| p.get("Page").and_then(|v| v.as_str()) != Some("/health")),
/// )?;
/// ```
pub struct FilterHook<F> {
    predicate: F,
}

impl<F> FilterHook<F> {
    /// Create a new filter hook. Events are kept while `predicate` returns `true`.
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<F> Hook for FilterHook<F>
where
    F: Fn(&Payload) -> bool + Send + Sync + 'static,
{
    fn on_event(&self, event_type: &str, payload: &mut Payload) -> Result<HookResult, BoxError> {
        if (self.predicate)(payload) {
            Ok(HookResult::Next)
        } else {
            tracing::debug!(event_type, "event filtered out");
            Ok(HookResult::Stop)
        }
    }
}
