//! Error types for Herald.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`BusError`] - Top-level error type for all bus operations
//! - [`CriteriaError`] - Invalid criteria and predicate evaluation failures
//! - [`ConfigError`] - Malformed configuration payloads

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all bus operations.
#[derive(Error, Debug)]
pub enum BusError {
    /// The event type passed to `emit` was empty.
    #[error("invalid event type: must be a non-empty token")]
    InvalidEventType,

    /// Criteria were malformed, or a predicate failed while being evaluated.
    #[error(transparent)]
    Criteria(#[from] CriteriaError),

    /// A handler failed while being replayed against history at registration.
    #[error("replay against history failed")]
    ReplayFailed(#[source] BoxError),

    /// A "before" hook returned an error.
    #[error("hook failed for event `{event_type}`")]
    Hook {
        /// The event being transformed.
        event_type: String,
        /// The hook's error.
        #[source]
        source: BoxError,
    },

    /// A subscribed handler returned an error.
    #[error("handler failed for event `{event_type}`")]
    Handler {
        /// The event being delivered.
        event_type: String,
        /// The handler's error.
        #[source]
        source: BoxError,
    },

    /// A configuration payload could not be merged.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised by [`Criteria`](crate::Criteria) validation and matching.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CriteriaError {
    /// The criteria value has no valid interpretation.
    #[error("invalid criteria type: {0}")]
    Invalid(String),

    /// A predicate criteria failed. Carries the original message only.
    #[error("error evaluating criteria: {0}")]
    Evaluation(String),
}

/// Errors that can occur while merging configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The settings were valid JSON but not a mapping.
    #[error("config needs to be a mapping or a JSON-parseable string, found {0}")]
    NotAMapping(&'static str),

    /// The settings text was not valid JSON.
    #[error("config text is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A stored value could not be deserialized into the requested type.
    #[error("config value at `{pointer}` has an unexpected shape: {source}")]
    Shape {
        /// JSON pointer that was looked up.
        pointer: String,
        /// The deserialization error.
        #[source]
        source: serde_json::Error,
    },
}

impl BusError {
    /// Returns `true` if this error came from a replay during registration.
    pub fn is_replay_failure(&self) -> bool {
        matches!(self, BusError::ReplayFailed(_))
    }
}
