//! Policy flags controlling how an enumeration may be mutated and searched.

use serde::{Deserialize, Serialize};

/// Options governing mutation and lookup behavior of an [`EnumContainer`].
///
/// `allow_delete` and `allow_overwrite` are fixed once a container is built;
/// `capitalize` and `case_sensitive` can be changed at any time through the
/// container setters.
///
/// [`EnumContainer`]: crate::EnumContainer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumPolicy {
    /// Allow `delete()` to remove entries.
    pub allow_delete: bool,

    /// Let `add()` replace existing keys.
    ///
    /// When false, the first value written for a key wins and later writes
    /// are ignored.
    pub allow_overwrite: bool,

    /// Store and match keys in upper-case form.
    pub capitalize: bool,

    /// Match keys and string values exactly instead of folding case.
    pub case_sensitive: bool,
}

impl EnumPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only enumeration: upper-case keys matched exactly.
    pub fn strict() -> Self {
        Self {
            allow_delete: false,
            allow_overwrite: false,
            capitalize: true,
            case_sensitive: true,
        }
    }

    /// Mutable enumeration allowing deletes and overwrites.
    pub fn permissive() -> Self {
        Self {
            allow_delete: true,
            allow_overwrite: true,
            capitalize: false,
            case_sensitive: false,
        }
    }

    #[must_use]
    pub fn with_allow_delete(mut self, enable: bool) -> Self {
        self.allow_delete = enable;
        self
    }

    #[must_use]
    pub fn with_allow_overwrite(mut self, enable: bool) -> Self {
        self.allow_overwrite = enable;
        self
    }

    #[must_use]
    pub fn with_capitalize(mut self, enable: bool) -> Self {
        self.capitalize = enable;
        self
    }

    #[must_use]
    pub fn with_case_sensitive(mut self, enable: bool) -> Self {
        self.case_sensitive = enable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_false() {
        let policy: EnumPolicy = serde_json::from_str(r#"{"capitalize": true}"#).unwrap();
        assert!(policy.capitalize);
        assert!(!policy.allow_delete);
        assert!(!policy.allow_overwrite);
        assert!(!policy.case_sensitive);
    }

    #[test]
    fn builder_sets_flags() {
        let policy = EnumPolicy::new()
            .with_allow_delete(true)
            .with_case_sensitive(true);
        assert!(policy.allow_delete);
        assert!(policy.case_sensitive);
        assert!(!EnumPolicy::permissive().with_allow_overwrite(false).allow_overwrite);
    }
}
