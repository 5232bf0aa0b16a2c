//! # Dispatcher (Bus)
//!
//! The bus orchestrates one dispatch per [`Bus::emit`] call:
//!
//! ```text
//! emit("PageView", payload)
//!     │
//!     ▼
//! ┌───────────────────────────────┐
//! │ 1. before: hooks in order     │──── a hook returns Stop ──▶ done (nothing recorded)
//! │ 2. record: append to history  │
//! │ 3. on: handlers in order      │──── a handler fails ──▶ error returned to the emitter
//! └───────────────────────────────┘
//! ```
//!
//! Everything runs synchronously on the caller's thread. Callbacks may call
//! back into the bus (emit, register, query); nested emits complete before
//! the outer dispatch continues.

use herald_core::{
    BusError, Criteria, Event, Handler, HistoryRecord, Hook, HookResult, IntoHookResult,
    IntoOutcome, Payload,
};
use herald_std::{Config, HistoryStore, Settings, SubscriptionStage, TransformStage};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{
    fmt,
    sync::{Arc, Weak},
};
use tracing::{debug, trace};

/// Which stage a registration belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// The before stage (hooks).
    Before,
    /// The on stage (handlers).
    On,
}

/// Handle returned by registration: the stage and the 1-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Registration {
    stage: Stage,
    position: usize,
}

impl Registration {
    /// The stage the registration was added to.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Length of the stage's list right after registering.
    pub fn position(&self) -> usize {
        self.position
    }
}

struct Inner {
    transforms: TransformStage,
    history: HistoryStore,
    subscriptions: SubscriptionStage,
    config: Config,
}

/// An in-process event bus.
///
/// Cloning is cheap and yields another handle to the same bus. Each
/// [`Bus::new`] is independent: history, registrations and configuration are
/// never shared between buses.
#[derive(Clone)]
pub struct Bus {
    inner: Arc<Inner>,
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bus")
            .field("transforms", &self.transform_count())
            .field("subscriptions", &self.subscription_count())
            .field("history", &self.history_len())
            .finish()
    }
}

impl Bus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                transforms: TransformStage::new(),
                history: HistoryStore::new(),
                subscriptions: SubscriptionStage::new(),
                config: Config::new(),
            }),
        }
    }

    /// Emit an event.
    ///
    /// Runs the before stage, records the event unless a hook suppressed it,
    /// then delivers it to matching handlers. The payload is consumed: what is
    /// recorded is the payload as the hooks left it.
    ///
    /// Fails with [`BusError::InvalidEventType`] for an empty event type.
    /// Hook, handler and predicate failures abort the dispatch and are
    /// returned here. Once recorded, an event stays recorded even if a
    /// handler fails.
    pub fn emit(&self, event_type: &str, mut payload: Payload) -> Result<(), BusError> {
        if event_type.is_empty() {
            return Err(BusError::InvalidEventType);
        }
        let span = tracing::debug_span!("emit", event_type);
        let _enter = span.enter();

        if self.inner.transforms.run(event_type, &mut payload)? == HookResult::Stop {
            return Ok(());
        }

        let record = self.inner.history.append(Event::new(event_type, payload));
        trace!("recorded event");
        self.inner.subscriptions.dispatch(&record)?;
        Ok(())
    }

    /// Register a before-stage closure.
    ///
    /// The closure may rewrite the payload, and suppresses the event by
    /// returning `false` or [`HookResult::Stop`].
    pub fn transform<F, R>(
        &self,
        criteria: impl Into<Criteria>,
        hook: F,
    ) -> Result<Registration, BusError>
    where
        F: Fn(&str, &mut Payload) -> R + Send + Sync + 'static,
        R: IntoHookResult,
    {
        self.transform_hook(criteria, hook)
    }

    /// Register a before-stage [`Hook`].
    pub fn transform_hook<H: Hook>(
        &self,
        criteria: impl Into<Criteria>,
        hook: H,
    ) -> Result<Registration, BusError> {
        let position = self.inner.transforms.register(criteria.into(), hook)?;
        Ok(Registration {
            stage: Stage::Before,
            position,
        })
    }

    /// Register an on-stage closure.
    ///
    /// With `replay_history`, the closure is first called once per matching
    /// recorded event, oldest first, before this returns. A failing replay
    /// fails the registration with [`BusError::ReplayFailed`] and leaves the
    /// closure unregistered.
    pub fn subscribe<F, R>(
        &self,
        criteria: impl Into<Criteria>,
        handler: F,
        replay_history: bool,
    ) -> Result<Registration, BusError>
    where
        F: Fn(&str, &Payload) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        self.subscribe_handler(criteria, handler, replay_history)
    }

    /// Register an on-stage [`Handler`]. See [`Bus::subscribe`].
    pub fn subscribe_handler<H: Handler>(
        &self,
        criteria: impl Into<Criteria>,
        handler: H,
        replay_history: bool,
    ) -> Result<Registration, BusError> {
        let history = replay_history.then_some(&self.inner.history);
        let position = self
            .inner
            .subscriptions
            .register(criteria.into(), handler, history)?;
        Ok(Registration {
            stage: Stage::On,
            position,
        })
    }

    /// Recorded events matching `criteria`, oldest first.
    pub fn query(&self, criteria: impl Into<Criteria>) -> Result<Vec<HistoryRecord>, BusError> {
        let criteria = criteria.into();
        criteria.validate()?;
        Ok(self.inner.history.query(&criteria)?)
    }

    /// Deep-merge settings into this bus's configuration.
    ///
    /// Accepts a JSON mapping or JSON text encoding one.
    pub fn configure(&self, settings: impl Into<Settings>) -> Result<(), BusError> {
        self.inner.config.merge(settings)?;
        Ok(())
    }

    /// A copy of the current configuration.
    pub fn config(&self) -> Value {
        self.inner.config.snapshot()
    }

    /// Typed lookup of one configuration value by JSON pointer.
    pub fn setting<T: DeserializeOwned>(&self, pointer: &str) -> Result<Option<T>, BusError> {
        Ok(self.inner.config.get(pointer)?)
    }

    /// Number of recorded events.
    pub fn history_len(&self) -> usize {
        self.inner.history.len()
    }

    /// Number of registered before-stage hooks.
    pub fn transform_count(&self) -> usize {
        self.inner.transforms.len()
    }

    /// Number of registered on-stage handlers.
    pub fn subscription_count(&self) -> usize {
        self.inner.subscriptions.len()
    }

    /// A non-owning handle, for callbacks that need to reach their own bus.
    ///
    /// A callback holding a strong [`Bus`] keeps the bus alive forever.
    pub fn downgrade(&self) -> WeakBus {
        debug!("created weak bus handle");
        WeakBus {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

/// A non-owning handle to a [`Bus`].
#[derive(Clone)]
pub struct WeakBus {
    inner: Weak<Inner>,
}

impl WeakBus {
    /// The bus, if it is still alive.
    pub fn upgrade(&self) -> Option<Bus> {
        self.inner.upgrade().map(|inner| Bus { inner })
    }
}

impl fmt::Debug for WeakBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakBus")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}
