//! Configuration state with deep-merge semantics.
//!
//! Settings arrive either as a JSON mapping or as JSON text. Each merge folds
//! the incoming mapping into the current state:
//!
//! ```text
//! current     | incoming    | result
//! ------------|-------------|-------------------------------
//! sequence    | sequence    | current followed by incoming
//! mapping     | mapping     | merged recursively
//! anything    | anything    | incoming overwrites current
//! ```

use herald_core::{ConfigError, json_kind};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// Input accepted by [`Config::merge`].
#[derive(Debug, Clone, PartialEq)]
pub enum Settings {
    /// JSON text encoding a mapping.
    Text(String),
    /// An already-parsed value; must be a mapping.
    Value(Value),
}

impl From<&str> for Settings {
    fn from(text: &str) -> Self {
        Settings::Text(text.to_owned())
    }
}

impl From<String> for Settings {
    fn from(text: String) -> Self {
        Settings::Text(text)
    }
}

impl From<Value> for Settings {
    fn from(value: Value) -> Self {
        Settings::Value(value)
    }
}

impl From<Map<String, Value>> for Settings {
    fn from(map: Map<String, Value>) -> Self {
        Settings::Value(Value::Object(map))
    }
}

impl Settings {
    fn into_mapping(self) -> Result<Map<String, Value>, ConfigError> {
        let value = match self {
            Settings::Text(text) => serde_json::from_str(&text)?,
            Settings::Value(value) => value,
        };
        match value {
            Value::Object(map) => Ok(map),
            other => Err(ConfigError::NotAMapping(json_kind(&other))),
        }
    }
}

/// Process-lifetime configuration owned by one bus.
#[derive(Debug)]
pub struct Config {
    // Always a `Value::Object`.
    root: RwLock<Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: RwLock::new(Value::Object(Map::new())),
        }
    }
}

impl Config {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deep-merge `settings` into the current state.
    ///
    /// Nothing changes when the settings are rejected.
    pub fn merge(&self, settings: impl Into<Settings>) -> Result<(), ConfigError> {
        let incoming = settings.into().into_mapping()?;
        let keys = incoming.len();
        let mut root = self.root.write().unwrap_or_else(PoisonError::into_inner);
        match &mut *root {
            Value::Object(current) => deep_merge(current, incoming),
            other => *other = Value::Object(incoming),
        }
        debug!(keys, "merged configuration");
        Ok(())
    }

    /// A copy of the whole configuration.
    pub fn snapshot(&self) -> Value {
        self.root
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Look up and deserialize the value at a JSON pointer such as `/sinks/0`.
    ///
    /// The empty pointer addresses the whole configuration. Returns
    /// `Ok(None)` when nothing is stored there.
    pub fn get<T: DeserializeOwned>(&self, pointer: &str) -> Result<Option<T>, ConfigError> {
        let root = self.root.read().unwrap_or_else(PoisonError::into_inner);
        root.pointer(pointer)
            .map(|value| {
                T::deserialize(value).map_err(|source| ConfigError::Shape {
                    pointer: pointer.to_owned(),
                    source,
                })
            })
            .transpose()
    }
}

fn deep_merge(target: &mut Map<String, Value>, incoming: Map<String, Value>) {
    for (key, value) in incoming {
        let merged = match (target.remove(&key), value) {
            (Some(Value::Array(mut current)), Value::Array(items)) => {
                current.extend(items);
                Value::Array(current)
            }
            (Some(Value::Object(mut current)), Value::Object(fields)) => {
                deep_merge(&mut current, fields);
                Value::Object(current)
            }
            (_, value) => value,
        };
        target.insert(key, merged);
    }
}
