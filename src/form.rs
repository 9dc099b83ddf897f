//! Form data records and the pure reducer used to update them.
//!
//! A flow's working answers live in a plain Rust struct implementing [`FormRecord`].
//! Updates are expressed as a [`FormPatch`]: a flat map from form key to JSON value.
//! [`reduce`] shallow-merges the patch into the record, so list and object slots are
//! always replaced wholesale, then recomputes any derived fields.

use crate::error::PatchError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A flow's answer record.
///
/// Every field of the record must serialize under a stable key; those keys are the
/// `fieldKey`s that flow configurations refer to.
pub trait FormRecord: Serialize + DeserializeOwned + Clone + Default {
    /// Recomputes derived fields. Called after every merge, whatever keys changed.
    fn normalize(&mut self) {}
}

/// Untyped records for flows loaded from JSON. The slots are whatever keys the
/// flow's `initialData` declares.
impl FormRecord for Map<String, Value> {}

/// A shallow patch of form keys to their next values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormPatch {
    entries: Map<String, Value>,
}

impl FormPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key = value` to the patch, replacing an earlier entry for the same key.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Builds a patch from a JSON object. Any other JSON value is rejected.
    pub fn from_json(value: Value) -> Result<Self, PatchError> {
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            _ => Err(PatchError::NotAnObject),
        }
    }
}

impl From<Map<String, Value>> for FormPatch {
    fn from(entries: Map<String, Value>) -> Self {
        Self { entries }
    }
}

/// Serializes a record into its flat key/value form.
pub fn to_object<T: FormRecord>(record: &T) -> Result<Map<String, Value>, PatchError> {
    match serde_json::to_value(record).map_err(|e| PatchError::Type(e.to_string()))? {
        Value::Object(map) => Ok(map),
        _ => Err(PatchError::NotAnObject),
    }
}

/// Reads a single slot of a record by key, `Null` when absent.
pub fn read_key<T: FormRecord>(record: &T, key: &str) -> Value {
    to_object(record)
        .ok()
        .and_then(|mut map| map.remove(key))
        .unwrap_or(Value::Null)
}

/// Applies `patch` to `state` and returns the next state.
///
/// Keys are merged one level deep only. A key the record does not serialize is an
/// error, as is a value of the wrong type for its slot. `state` is never modified.
pub fn reduce<T: FormRecord>(state: &T, patch: &FormPatch) -> Result<T, PatchError> {
    let mut merged = to_object(state)?;
    for (key, value) in &patch.entries {
        match merged.get_mut(key) {
            Some(slot) => *slot = value.clone(),
            None => return Err(PatchError::UnknownKey(key.clone())),
        }
    }

    let mut next: T = serde_json::from_value(Value::Object(merged))
        .map_err(|e| PatchError::Type(e.to_string()))?;
    next.normalize();
    Ok(next)
}
