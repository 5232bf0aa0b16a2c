//! # Criteria
//!
//! Patterns deciding whether an event type is of interest to a registration.
//!
//! ```text
//! Criteria            | Matches
//! --------------------|-----------------------------------------
//! "*"                 | any non-empty event type
//! "PageView"          | PageView only
//! predicate(f)        | event types for which f returns true
//! ["A", "B", ...]     | event types matched by at least one element
//! ```
//!
//! An empty event type is treated as absent and matches nothing. Predicates
//! are never invoked with it.

use crate::{error::CriteriaError, response::IntoMatch, BoxError};
use serde_json::Value;
use std::{fmt, sync::Arc};

const WILDCARD: &str = "*";

/// A criteria pattern. Validated at registration, evaluated at dispatch.
#[derive(Clone)]
pub enum Criteria {
    /// `"*"`: matches every event type.
    Wildcard,
    /// Matches only an identical event type.
    Exact(String),
    /// Matches when the predicate returns `true`.
    Predicate(Predicate),
    /// Matches when any element matches, evaluated in order.
    Any(Vec<Criteria>),
}

/// A user-supplied event-type predicate.
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(&str) -> Result<bool, BoxError> + Send + Sync>);

impl Predicate {
    fn eval(&self, event_type: &str) -> Result<bool, CriteriaError> {
        (self.0)(event_type).map_err(|e| CriteriaError::Evaluation(e.to_string()))
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

impl fmt::Debug for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criteria::Wildcard => f.write_str("Wildcard"),
            Criteria::Exact(s) => f.debug_tuple("Exact").field(s).finish(),
            Criteria::Predicate(p) => p.fmt(f),
            Criteria::Any(items) => f.debug_tuple("Any").field(items).finish(),
        }
    }
}

impl Criteria {
    /// Criteria matching exactly `event_type`.
    pub fn exact(event_type: impl Into<String>) -> Self {
        Criteria::Exact(event_type.into())
    }

    /// Criteria backed by a predicate returning `bool` or `Result<bool, E>`.
    ///
    /// Errors returned by the predicate surface as
    /// [`CriteriaError::Evaluation`] carrying the original message.
    pub fn predicate<F, R>(f: F) -> Self
    where
        F: Fn(&str) -> R + Send + Sync + 'static,
        R: IntoMatch,
    {
        Criteria::Predicate(Predicate(Arc::new(move |event_type: &str| {
            f(event_type).into_match()
        })))
    }

    /// Criteria matching when any of `items` matches.
    pub fn one_of<I, C>(items: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Criteria>,
    {
        Criteria::Any(items.into_iter().map(Into::into).collect())
    }

    /// Check the criteria shape without evaluating it against any event.
    ///
    /// Predicates are not invoked.
    pub fn validate(&self) -> Result<(), CriteriaError> {
        match self {
            Criteria::Wildcard | Criteria::Predicate(_) => Ok(()),
            Criteria::Exact(s) if s.is_empty() => Err(CriteriaError::Invalid(
                "exact criteria must be non-empty".into(),
            )),
            Criteria::Exact(_) => Ok(()),
            Criteria::Any(items) => items.iter().try_for_each(Criteria::validate),
        }
    }

    /// Decide whether `event_type` matches.
    pub fn matches(&self, event_type: &str) -> Result<bool, CriteriaError> {
        if event_type.is_empty() {
            return Ok(false);
        }
        match self {
            Criteria::Wildcard => Ok(true),
            Criteria::Exact(s) => Ok(s == event_type),
            Criteria::Predicate(p) => p.eval(event_type),
            Criteria::Any(items) => {
                for item in items {
                    if item.matches(event_type)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}

impl From<&str> for Criteria {
    fn from(s: &str) -> Self {
        if s == WILDCARD {
            Criteria::Wildcard
        } else {
            Criteria::Exact(s.to_owned())
        }
    }
}

impl From<String> for Criteria {
    fn from(s: String) -> Self {
        if s == WILDCARD {
            Criteria::Wildcard
        } else {
            Criteria::Exact(s)
        }
    }
}

impl From<&String> for Criteria {
    fn from(s: &String) -> Self {
        Criteria::from(s.as_str())
    }
}

impl<C: Into<Criteria>> From<Vec<C>> for Criteria {
    fn from(items: Vec<C>) -> Self {
        Criteria::one_of(items)
    }
}

impl<C: Into<Criteria>, const N: usize> From<[C; N]> for Criteria {
    fn from(items: [C; N]) -> Self {
        Criteria::one_of(items)
    }
}

impl TryFrom<&Value> for Criteria {
    type Error = CriteriaError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(Criteria::from(s)),
            Value::Array(items) => items
                .iter()
                .map(Criteria::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Criteria::Any),
            other => Err(CriteriaError::Invalid(json_kind(other).into())),
        }
    }
}

impl TryFrom<Value> for Criteria {
    type Error = CriteriaError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Criteria::try_from(&value)
    }
}

/// Name of a JSON value's kind, for error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
