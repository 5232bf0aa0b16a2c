//! # herald - In-Process Event Bus
//!
//! `herald` records named events with JSON payloads and delivers them to
//! subscribers selected by [`Criteria`]. Events pass through a before stage
//! that may rewrite or suppress them, are appended to history, and are then
//! handed to every matching subscriber. Late subscribers can catch up on
//! history at registration time.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use herald::prelude::*;
//!
//! let bus = Bus::new();
//!
//! // Stamp every event before it is recorded.
//! bus.transform("*", |_, payload: &mut Payload| {
//!     payload.insert("source".into(), "web".into());
//! })?;
//!
//! // Drop health checks entirely.
//! bus.transform("PageView", |_, payload: &mut Payload| {
//!     payload.get("Page").and_then(|p| p.as_str()) != Some("/health")
//! })?;
//!
//! // Observe page views, including those emitted before this call.
//! bus.subscribe("PageView", |event_type, payload: &Payload| {
//!     println!("{event_type}: {payload:?}");
//! }, true)?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod bus;

pub use bus::{Bus, Registration, Stage, WeakBus};

pub use herald_core::{
    // Error types
    BoxError,
    BusError,
    ConfigError,
    // Criteria
    Criteria,
    CriteriaError,
    // Events
    Event,
    // Handlers
    Handler,
    HistoryRecord,
    Hook,
    HookResult,
    IntoHookResult,
    IntoMatch,
    IntoOutcome,
    Payload,
    Predicate,
};

pub use herald_std::Settings;

/// Standard hook implementations.
pub mod hooks {
    pub use herald_std::hooks::{FilterHook, LoggingHook};
}

/// Testing utilities.
pub mod testing {
    pub use herald_std::testing::{CountingHandler, FailingHandler, RecordingHandler, StopHook};
}

/// Prelude module - common imports for Herald.
///
/// # Usage
///
/// ```rust,ignore
/// use herald::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Bus, BusError, Criteria, Handler, HistoryRecord, Hook, HookResult, Payload, Registration,
    };
}
