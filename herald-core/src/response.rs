//! Return-value conversion traits.
//!
//! User callbacks may return plain values; these traits normalise them into
//! the shapes the bus works with.

use crate::{error::BoxError, hook::HookResult};

/// Trait for converting a hook's output into a [`HookResult`].
///
/// # Default Implementations
///
/// - `()` → Next
/// - `bool` → `false` = Stop, `true` = Next
/// - `HookResult` → As is
/// - `Option<T>` → `None` = Next, otherwise delegates to `T`
/// - `Result<T, E>` → Delegates to inner `T` or propagates error
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be returned from a hook",
    label = "missing `IntoHookResult` implementation",
    note = "Return `()`, `bool`, `HookResult`, or a `Result` wrapping one of them."
)]
pub trait IntoHookResult {
    /// Convert the output into propagation behavior and optional error.
    fn into_hook_result(self) -> Result<HookResult, BoxError>;
}

impl IntoHookResult for () {
    fn into_hook_result(self) -> Result<HookResult, BoxError> {
        Ok(HookResult::Next)
    }
}

impl IntoHookResult for bool {
    fn into_hook_result(self) -> Result<HookResult, BoxError> {
        Ok(if self {
            HookResult::Next
        } else {
            HookResult::Stop
        })
    }
}

impl IntoHookResult for HookResult {
    fn into_hook_result(self) -> Result<HookResult, BoxError> {
        Ok(self)
    }
}

impl<T: IntoHookResult> IntoHookResult for Option<T> {
    fn into_hook_result(self) -> Result<HookResult, BoxError> {
        match self {
            Some(t) => t.into_hook_result(),
            None => Ok(HookResult::Next),
        }
    }
}

impl<T, E> IntoHookResult for Result<T, E>
where
    T: IntoHookResult,
    E: Into<BoxError>,
{
    fn into_hook_result(self) -> Result<HookResult, BoxError> {
        match self {
            Ok(t) => t.into_hook_result(),
            Err(e) => Err(e.into()),
        }
    }
}

/// Trait for converting a handler's output into success or failure.
///
/// Handlers cannot suppress, so any successful value is discarded.
pub trait IntoOutcome {
    /// Convert the output, keeping only the error.
    fn into_outcome(self) -> Result<(), BoxError>;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<T, E> IntoOutcome for Result<T, E>
where
    E: Into<BoxError>,
{
    fn into_outcome(self) -> Result<(), BoxError> {
        self.map(|_| ()).map_err(Into::into)
    }
}

/// Trait for converting a predicate's output into a match decision.
pub trait IntoMatch {
    /// Convert the output into `Ok(matched)` or the predicate's error.
    fn into_match(self) -> Result<bool, BoxError>;
}

impl IntoMatch for bool {
    fn into_match(self) -> Result<bool, BoxError> {
        Ok(self)
    }
}

impl<E> IntoMatch for Result<bool, E>
where
    E: Into<BoxError>,
{
    fn into_match(self) -> Result<bool, BoxError> {
        self.map_err(Into::into)
    }
}
