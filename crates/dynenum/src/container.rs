//! The enumeration container.
//!
//! An [`EnumContainer`] is an ordered map from normalized string keys to
//! JSON values, governed by an [`EnumPolicy`].
//!
//! ## Key normalization
//!
//! Keys never contain spaces: `"Blade Runner"` is stored as `"Blade_Runner"`.
//! With `capitalize` enabled every key is stored upper-case (`"BLADE_RUNNER"`).
//! Positional input (`["apple", "pear"]`) uses the value itself as key, which
//! is only possible for string values.
//!
//! ## Writes
//!
//! Without overwrite permission the first value stored for a key wins and
//! later writes for the same key are ignored. Batches are applied entry by
//! entry, so a failing entry leaves the earlier ones in place.
//!
//! ## Lookups
//!
//! Key and value lookups fold ASCII case unless the container (or the call)
//! is case-sensitive.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::entry::{EntryKey, NewValues};
use crate::error::{EnumError, Result};
use crate::lookup::{self, CaseInsensitiveKeys};
use crate::options::EnumPolicy;

/// Ordered entries of an enumeration.
pub type Entries = IndexMap<String, Value>;

/// Runtime enumeration: ordered, normalized keys mapped to values.
#[derive(Clone, Default, PartialEq)]
pub struct EnumContainer {
    pub(crate) entries: Entries,
    pub(crate) policy: EnumPolicy,
}

/// Keys found by a reverse (value to key) lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum KeyMatch {
    /// Exactly one entry holds the value.
    Single(String),
    /// Several entries hold the value, in entry order.
    Multiple(Vec<String>),
}

impl KeyMatch {
    fn from_keys(mut keys: Vec<String>) -> Option<Self> {
        match keys.len() {
            0 => None,
            1 => keys.pop().map(KeyMatch::Single),
            _ => Some(KeyMatch::Multiple(keys)),
        }
    }

    /// The first matching key.
    pub fn first(&self) -> &str {
        match self {
            KeyMatch::Single(key) => key,
            KeyMatch::Multiple(keys) => keys.first().map_or("", String::as_str),
        }
    }

    /// The key when exactly one entry matched.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            KeyMatch::Single(key) => Some(key),
            KeyMatch::Multiple(_) => None,
        }
    }
}

impl PartialEq<&str> for KeyMatch {
    fn eq(&self, other: &&str) -> bool {
        self.as_single() == Some(*other)
    }
}

impl fmt::Display for KeyMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMatch::Single(key) => f.write_str(key),
            KeyMatch::Multiple(keys) => write!(f, "{}", keys.join(", ")),
        }
    }
}

impl EnumContainer {
    /// Create an empty container with every policy flag disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty container with the given policy.
    pub fn with_policy(policy: EnumPolicy) -> Self {
        Self {
            entries: Entries::new(),
            policy,
        }
    }

    /// Create a container with the default policy and add `values`.
    pub fn from_values(values: impl Into<NewValues>) -> Result<Self> {
        let mut container = Self::new();
        container.add(values)?;
        Ok(container)
    }

    /// Build a container from a definition seed.
    ///
    /// The seed is stored as given after key normalization, so unlike `add`
    /// a later seed entry replaces an earlier one with the same key.
    pub(crate) fn from_seed(policy: EnumPolicy, seed: NewValues) -> Result<Self> {
        let mut pairs = Vec::with_capacity(seed.len());
        for (key, value) in seed {
            let key = resolve_key(key, &value)?;
            pairs.push((key, value));
        }
        Ok(Self {
            entries: normalize_entries(pairs, policy.capitalize),
            policy,
        })
    }

    pub fn policy(&self) -> EnumPolicy {
        self.policy
    }

    pub fn allows_delete(&self) -> bool {
        self.policy.allow_delete
    }

    pub fn allows_overwrite(&self) -> bool {
        self.policy.allow_overwrite
    }

    pub fn capitalizes(&self) -> bool {
        self.policy.capitalize
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.policy.case_sensitive
    }

    /// Enable or disable upper-case keys.
    ///
    /// Enabling re-keys the existing entries immediately.
    pub fn set_capitalize(&mut self, enable: bool) {
        self.policy.capitalize = enable;
        if enable {
            self.fix_keys();
        }
    }

    /// Set the default case-sensitivity of lookups.
    pub fn set_case_sensitive(&mut self, enable: bool) {
        self.policy.case_sensitive = enable;
    }

    /// Remove every entry and clear the lookup flags.
    pub fn reset(&mut self) {
        self.reset_with(false, false);
    }

    /// Remove every entry and set the lookup flags.
    ///
    /// Delete and overwrite permissions are left untouched.
    pub fn reset_with(&mut self, case_sensitive: bool, capitalize: bool) {
        debug!(
            cleared = self.entries.len(),
            case_sensitive, capitalize, "resetting enum"
        );
        self.entries.clear();
        self.policy.case_sensitive = case_sensitive;
        self.policy.capitalize = capitalize;
    }

    /// Add values using the container's overwrite permission.
    ///
    /// Returns all entries after the batch has been applied.
    pub fn add(&mut self, values: impl Into<NewValues>) -> Result<&Entries> {
        self.insert_batch(values.into(), None)
    }

    /// Add values, overriding the overwrite behavior for this call.
    ///
    /// Requesting `overwrite = true` on a container without overwrite
    /// permission fails with [`EnumError::OverwriteNotAllowed`].
    pub fn add_with_overwrite(
        &mut self,
        values: impl Into<NewValues>,
        overwrite: bool,
    ) -> Result<&Entries> {
        self.insert_batch(values.into(), Some(overwrite))
    }

    fn insert_batch(&mut self, values: NewValues, overwrite: Option<bool>) -> Result<&Entries> {
        let effective = overwrite.unwrap_or(self.policy.allow_overwrite);
        let mut added = 0usize;
        let mut ignored = 0usize;

        for (key, value) in values {
            if overwrite == Some(true) && !self.policy.allow_overwrite {
                return Err(EnumError::OverwriteNotAllowed {
                    key: key.to_string(),
                });
            }
            let key = resolve_key(key, &value)?;
            let key = lookup::normalize_key(&key, self.policy.capitalize);

            if effective || !self.entries.contains_key(&key) {
                self.entries.insert(key, value);
                added += 1;
            } else {
                trace!(key = %key, "key already defined; keeping existing value");
                ignored += 1;
            }
        }

        debug!(added, ignored, total = self.entries.len(), "added enum values");
        Ok(self.fix_keys())
    }

    /// Normalize every stored key.
    ///
    /// Spaces become underscores and keys are upper-cased when `capitalize`
    /// is set. If two keys normalize to the same form, the later value is
    /// kept at the position of the earlier key.
    pub fn fix_keys(&mut self) -> &Entries {
        let capitalize = self.policy.capitalize;
        let dirty = self
            .entries
            .keys()
            .any(|key| lookup::normalize_key(key, capitalize) != *key);
        if dirty {
            let entries = std::mem::take(&mut self.entries);
            self.entries = normalize_entries(entries, capitalize);
        }
        &self.entries
    }

    /// Remove `key` (exact match).
    ///
    /// Returns whether the key was present. Fails with
    /// [`EnumError::DeleteNotAllowed`] unless the policy allows deletes.
    pub fn delete(&mut self, key: &str) -> Result<bool> {
        if !self.policy.allow_delete {
            return Err(EnumError::DeleteNotAllowed {
                key: key.to_string(),
            });
        }
        let removed = self.entries.shift_remove(key).is_some();
        debug!(key, removed, "delete");
        Ok(removed)
    }

    /// Value stored for `key`, using the container's case-sensitivity.
    pub fn value(&self, key: &str) -> Result<&Value> {
        self.value_with_case(key, self.policy.case_sensitive)
    }

    /// Value stored for `key` with an explicit case-sensitivity.
    pub fn value_with_case(&self, key: &str, case_sensitive: bool) -> Result<&Value> {
        let found = if case_sensitive {
            self.entries.get(key)
        } else {
            self.folded_keys()
                .get(key)
                .and_then(|stored| self.entries.get(stored))
        };
        found.ok_or_else(|| EnumError::KeyNotFound {
            key: key.to_string(),
        })
    }

    /// Key (or keys) holding `value`, using the container's case-sensitivity.
    pub fn key(&self, value: impl Into<Value>) -> Result<KeyMatch> {
        self.key_with_case(value, self.policy.case_sensitive)
    }

    /// Key (or keys) holding `value` with an explicit case-sensitivity.
    ///
    /// - strings match stored string values, folding case when insensitive;
    /// - arrays and objects match by structural equality, first match only;
    /// - other scalars match exactly, numbers by numeric value.
    pub fn key_with_case(&self, value: impl Into<Value>, case_sensitive: bool) -> Result<KeyMatch> {
        let needle = value.into();
        let keys: Vec<String> = match &needle {
            Value::String(text) => self
                .entries
                .iter()
                .filter(|(_, stored)| lookup::string_matches(stored, text, case_sensitive))
                .map(|(key, _)| key.clone())
                .collect(),
            Value::Array(_) | Value::Object(_) => self
                .entries
                .iter()
                .find(|(_, stored)| **stored == needle)
                .map(|(key, _)| vec![key.clone()])
                .unwrap_or_default(),
            _ => self
                .entries
                .iter()
                .filter(|(_, stored)| lookup::scalar_matches(stored, &needle))
                .map(|(key, _)| key.clone())
                .collect(),
        };
        KeyMatch::from_keys(keys).ok_or_else(|| EnumError::ValueNotFound {
            value: describe(&needle),
        })
    }

    /// Whether a key exists, folding case unless the container is
    /// case-sensitive.
    pub fn has(&self, name: &str) -> bool {
        if self.policy.case_sensitive {
            self.entries.contains_key(name)
        } else {
            self.folded_keys().contains(name)
        }
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// All entries in order.
    pub fn values(&self) -> &Entries {
        &self.entries
    }

    /// Number of entries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    fn folded_keys(&self) -> CaseInsensitiveKeys<'_> {
        CaseInsensitiveKeys::new(self.entries.keys().map(String::as_str))
    }
}

impl<'a> IntoIterator for &'a EnumContainer {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Turn an input key into a storage key; positional keys borrow the value.
fn resolve_key(key: EntryKey, value: &Value) -> Result<String> {
    match key {
        EntryKey::Name(name) => Ok(name),
        EntryKey::Position(_) => match value {
            Value::String(text) => Ok(text.clone()),
            other => Err(EnumError::InvalidEntry {
                key: key.to_string(),
                value: describe(other),
            }),
        },
    }
}

fn normalize_entries<I>(pairs: I, capitalize: bool) -> Entries
where
    I: IntoIterator<Item = (String, Value)>,
{
    let mut fixed = Entries::new();
    for (key, value) in pairs {
        let normalized = lookup::normalize_key(&key, capitalize);
        if fixed.insert(normalized, value).is_some() {
            warn!(key = %key, "normalized key collides with an earlier entry; keeping the later value");
        }
    }
    fixed
}

/// Human-readable form of a value for error messages.
fn describe(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
