//! # herald-core
//!
//! Core types and traits for the Herald in-process event bus.
//!
//! This crate has minimal dependencies and holds the vocabulary shared by the
//! components in `herald-std` and the dispatcher in `herald`.
//!
//! # Two-Stage Pipeline
//!
//! Every emitted event passes through two stages around a recording step:
//!
//! ## Before Stage ([`Hook`])
//!
//! Runs prior to recording. Hooks may rewrite the payload in place or
//! suppress the event by returning [`HookResult::Stop`] (or plain `false`).
//!
//! ## On Stage ([`Handler`])
//!
//! Runs after recording. Handlers observe the final payload and cannot
//! suppress. A handler may also be replayed against recorded history when it
//! is registered.
//!
//! Both stages select events with [`Criteria`].
//!
//! # Error Types
//!
//! - [`BusError`] - Top-level error type
//! - [`CriteriaError`] - Invalid criteria and predicate failures
//! - [`ConfigError`] - Configuration merge failures

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod criteria;
mod error;
mod event;
mod handler;
mod hook;
mod response;

// Re-exports
pub use criteria::{json_kind, Criteria, Predicate};
pub use error::{BoxError, BusError, ConfigError, CriteriaError};
pub use event::{Event, HistoryRecord, Payload};
pub use handler::Handler;
pub use hook::{Hook, HookResult};
pub use response::{IntoHookResult, IntoMatch, IntoOutcome};
