//! Key normalization and case-folding helpers.

use std::collections::HashMap;

use serde_json::Value;

/// Fold a key or string value for case-insensitive comparison.
///
/// Only ASCII letters are folded; other characters compare as-is.
pub fn fold(text: &str) -> String {
    text.to_ascii_uppercase()
}

/// Normalize a key for storage: spaces become underscores, and the result is
/// upper-cased when `capitalize` is set.
pub fn normalize_key(key: &str, capitalize: bool) -> String {
    let key = key.replace(' ', "_");
    if capitalize { fold(&key) } else { key }
}

/// Case-insensitive view over a set of stored keys.
///
/// When several keys fold to the same form the last one wins, mirroring the
/// last-write-wins rule used for key normalization.
#[derive(Debug, Clone)]
pub struct CaseInsensitiveKeys<'a> {
    map: HashMap<String, &'a str>,
}

impl<'a> CaseInsensitiveKeys<'a> {
    pub fn new<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut map = HashMap::new();
        for key in keys {
            map.insert(fold(key), key);
        }
        Self { map }
    }

    /// Stored key matching `name` after folding.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.map.get(&fold(name)).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&fold(name))
    }
}

/// Compare a stored value against a string needle.
///
/// Only string values can match; case is folded unless `case_sensitive`.
pub fn string_matches(stored: &Value, needle: &str, case_sensitive: bool) -> bool {
    match stored {
        Value::String(text) if case_sensitive => text == needle,
        Value::String(text) => text.eq_ignore_ascii_case(needle),
        _ => false,
    }
}

/// Exact equality for scalars, treating numbers by numeric value so that
/// `6` and `6.0` compare equal.
pub fn scalar_matches(stored: &Value, needle: &Value) -> bool {
    match (stored, needle) {
        (Value::Number(left), Value::Number(right)) => {
            if let (Some(l), Some(r)) = (left.as_i64(), right.as_i64()) {
                return l == r;
            }
            if let (Some(l), Some(r)) = (left.as_u64(), right.as_u64()) {
                return l == r;
            }
            match (left.as_f64(), right.as_f64()) {
                (Some(l), Some(r)) => l == r,
                _ => false,
            }
        }
        _ => stored == needle,
    }
}
