//! The before stage: hooks run prior to recording.

use herald_core::{BusError, Criteria, CriteriaError, Hook, HookResult, Payload};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, trace};

struct HookEntry {
    criteria: Criteria,
    hook: Box<dyn Hook>,
}

/// An ordered list of `(criteria, hook)` registrations.
#[derive(Default)]
pub struct TransformStage {
    entries: RwLock<Vec<Arc<HookEntry>>>,
}

impl TransformStage {
    /// Create an empty stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook, returning its 1-based position.
    ///
    /// The criteria are validated before anything is stored.
    pub fn register<H: Hook>(&self, criteria: Criteria, hook: H) -> Result<usize, CriteriaError> {
        criteria.validate()?;
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.push(Arc::new(HookEntry {
            criteria,
            hook: Box::new(hook),
        }));
        let position = entries.len();
        debug!(position, "registered hook");
        Ok(position)
    }

    /// Run every matching hook in registration order.
    ///
    /// Returns [`HookResult::Stop`] as soon as a hook suppresses the event;
    /// later hooks do not run. Mutations made by earlier hooks persist.
    pub fn run(&self, event_type: &str, payload: &mut Payload) -> Result<HookResult, BusError> {
        // Hooks registered while this runs apply from the next event.
        for (index, entry) in self.snapshot().iter().enumerate() {
            if !entry.criteria.matches(event_type)? {
                continue;
            }
            trace!(event_type, position = index + 1, "running hook");
            let result = entry
                .hook
                .on_event(event_type, payload)
                .map_err(|source| BusError::Hook {
                    event_type: event_type.to_owned(),
                    source,
                })?;
            if result == HookResult::Stop {
                debug!(event_type, position = index + 1, "event suppressed by hook");
                return Ok(HookResult::Stop);
            }
        }
        Ok(HookResult::Next)
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn snapshot(&self) -> Vec<Arc<HookEntry>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
