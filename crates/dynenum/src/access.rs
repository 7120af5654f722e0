//! Array-style and property-style access surfaces.
//!
//! Indexed access works on raw keys: it never folds case, never normalizes,
//! and ignores the `add` overwrite policy. Unsetting is gated by the
//! overwrite permission rather than the delete permission, so a container
//! that allows overwrites refuses indexed unsets.

use std::ops::Index;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::container::{EnumContainer, Entries};
use crate::entry::NewValues;
use crate::error::{EnumError, Result};

static NULL: Value = Value::Null;

impl EnumContainer {
    /// Value at `key`, or `Value::Null` when the key is missing.
    pub fn get_entry(&self, key: &str) -> &Value {
        self.entries.get(key).unwrap_or(&NULL)
    }

    /// Store `value` at `key`, replacing any existing value.
    ///
    /// With `None` the value is appended under the next unused positional
    /// key (`"0"`, `"1"`, ...). Returns the key written.
    pub fn set_entry(&mut self, key: Option<&str>, value: impl Into<Value>) -> String {
        let key = match key {
            Some(key) => key.to_string(),
            None => self.next_position().to_string(),
        };
        self.entries.insert(key.clone(), value.into());
        key
    }

    /// Whether `key` is present (exact match).
    pub fn has_entry(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove `key` regardless of the delete permission.
    ///
    /// Fails with [`EnumError::UnsetNotAllowed`] when the container allows
    /// overwrites.
    pub fn unset_entry(&mut self, key: &str) -> Result<bool> {
        if self.policy.allow_overwrite {
            return Err(EnumError::UnsetNotAllowed {
                key: key.to_string(),
            });
        }
        let removed = self.entries.shift_remove(key).is_some();
        debug!(key, removed, "unset");
        Ok(removed)
    }

    /// Call-style add; same as [`EnumContainer::add`].
    pub fn invoke(&mut self, values: impl Into<NewValues>) -> Result<&Entries> {
        self.add(values)
    }

    /// Property-style view over the entries.
    pub fn accessor(&self) -> Accessor<'_> {
        Accessor { container: self }
    }

    /// One past the largest positional key. When that overflows, the
    /// smallest positional key not yet in use.
    fn next_position(&self) -> usize {
        let largest = self
            .entries
            .keys()
            .map(String::as_str)
            .filter_map(position_of)
            .max();
        match largest {
            None => 0,
            Some(largest) => largest.checked_add(1).unwrap_or_else(|| {
                (0usize..)
                    .find(|n| !self.entries.contains_key(&n.to_string()))
                    .unwrap_or_default()
            }),
        }
    }
}

/// Index of a positional key; only canonical decimal forms count, so
/// `"05"` and `"+5"` are plain names.
fn position_of(key: &str) -> Option<usize> {
    key.parse::<usize>()
        .ok()
        .filter(|index| index.to_string() == key)
}

impl Index<&str> for EnumContainer {
    type Output = Value;

    /// Missing keys yield `Value::Null`.
    fn index(&self, key: &str) -> &Value {
        self.get_entry(key)
    }
}

/// Read-only, property-style accessor.
///
/// Names resolve like [`EnumContainer::value`], honoring the container's
/// case-sensitivity, so `accessor.get("peach")` finds a `PEACH` entry unless
/// the container is case-sensitive.
#[derive(Debug, Clone, Copy)]
pub struct Accessor<'a> {
    container: &'a EnumContainer,
}

impl<'a> Accessor<'a> {
    pub fn get(&self, name: &str) -> Result<&'a Value> {
        self.container.value(name)
    }

    /// Read the value for `name` as a concrete type.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let value = self.get(name)?;
        T::deserialize(value).map_err(|source| EnumError::Conversion {
            key: name.to_string(),
            source,
        })
    }

    pub fn has(&self, name: &str) -> bool {
        self.container.has(name)
    }

    pub fn names(&self) -> Vec<&'a str> {
        self.container.keys()
    }
}
