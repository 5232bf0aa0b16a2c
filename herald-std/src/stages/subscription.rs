//! The on stage: handlers run after recording.

use crate::history::HistoryStore;
use herald_core::{BoxError, BusError, Criteria, Event, Handler};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, trace};

struct HandlerEntry {
    criteria: Criteria,
    handler: Box<dyn Handler>,
}

/// An ordered list of `(criteria, handler)` registrations.
#[derive(Default)]
pub struct SubscriptionStage {
    entries: RwLock<Vec<Arc<HandlerEntry>>>,
}

impl SubscriptionStage {
    /// Create an empty stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, returning its 1-based position.
    ///
    /// When `history` is given, the handler is first replayed, synchronously
    /// and oldest first, against every recorded event matching `criteria`.
    /// If any replayed call fails the registration fails with
    /// [`BusError::ReplayFailed`] and the handler is not stored.
    pub fn register<H: Handler>(
        &self,
        criteria: Criteria,
        handler: H,
        history: Option<&HistoryStore>,
    ) -> Result<usize, BusError> {
        criteria.validate()?;

        if let Some(history) = history {
            let replayed = replay(&criteria, &handler, history).map_err(BusError::ReplayFailed)?;
            debug!(replayed, "replayed history into handler");
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.push(Arc::new(HandlerEntry {
            criteria,
            handler: Box::new(handler),
        }));
        let position = entries.len();
        debug!(position, "registered handler");
        Ok(position)
    }

    /// Deliver a recorded event to every matching handler in registration order.
    ///
    /// Returns the number of handlers called. The first handler error stops
    /// delivery and is returned to the caller.
    pub fn dispatch(&self, event: &Event) -> Result<usize, BusError> {
        let mut delivered = 0;
        for entry in self.snapshot() {
            if !entry.criteria.matches(&event.event_type)? {
                continue;
            }
            entry
                .handler
                .call(&event.event_type, &event.payload)
                .map_err(|source| BusError::Handler {
                    event_type: event.event_type.clone(),
                    source,
                })?;
            delivered += 1;
        }
        trace!(event_type = %event.event_type, delivered, "delivered event");
        Ok(delivered)
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn snapshot(&self) -> Vec<Arc<HandlerEntry>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn replay<H: Handler>(
    criteria: &Criteria,
    handler: &H,
    history: &HistoryStore,
) -> Result<usize, BoxError> {
    let records = history.query(criteria)?;
    for record in &records {
        handler.call(&record.event_type, &record.payload)?;
    }
    Ok(records.len())
}
