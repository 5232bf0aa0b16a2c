//! Append-only record of every event that was not suppressed.
//!
//! History grows for the lifetime of the bus. It is unbounded by design and
//! has no eviction.

use herald_core::{Criteria, CriteriaError, Event, HistoryRecord};
use std::sync::{Arc, PoisonError, RwLock};

/// An insertion-ordered sequence of recorded events.
#[derive(Debug, Default)]
pub struct HistoryStore {
    records: RwLock<Vec<HistoryRecord>>,
}

impl HistoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event, returning the shared record.
    pub fn append(&self, event: Event) -> HistoryRecord {
        let record = Arc::new(event);
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::clone(&record));
        record
    }

    /// Every record whose event type matches `criteria`, oldest first.
    ///
    /// The result is a fresh sequence, not a live view. Predicates run after
    /// the store's lock has been released, so they may safely emit.
    pub fn query(&self, criteria: &Criteria) -> Result<Vec<HistoryRecord>, CriteriaError> {
        let mut matched = Vec::new();
        for record in self.snapshot() {
            if criteria.matches(&record.event_type)? {
                matched.push(record);
            }
        }
        Ok(matched)
    }

    /// All records, oldest first.
    pub fn snapshot(&self) -> Vec<HistoryRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
