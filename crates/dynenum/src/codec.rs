//! Textual and serialized forms of an enumeration.
//!
//! - `Display` renders the entries as pretty JSON (4-space indent, entry
//!   order).
//! - `serialize`/`deserialize` carry the entries only, as compact JSON.
//!   Policy flags are not part of the payload and must be reapplied by the
//!   caller after a restore.
//! - `dump` captures flags and entries for diagnostics.

use std::fmt;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use crate::container::{EnumContainer, Entries};
use crate::error::{EnumError, Result};

/// Diagnostic snapshot of a container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumDump {
    pub capitalise: bool,
    pub case_sensitive: bool,
    pub allow_delete: bool,
    pub allow_overwrite: bool,
    pub values: Entries,
}

impl EnumContainer {
    /// Entries as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.entries
            .serialize(&mut serializer)
            .map_err(|source| EnumError::Encode { source })?;
        // serde_json only emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Encode the entries.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.entries).map_err(|source| EnumError::Encode { source })
    }

    /// Replace the entries with previously serialized ones.
    ///
    /// Keys are restored verbatim; flags are left as they are.
    pub fn deserialize(&mut self, data: &[u8]) -> Result<()> {
        let entries: Entries =
            serde_json::from_slice(data).map_err(|source| EnumError::Decode { source })?;
        debug!(count = entries.len(), "restored enum values");
        self.entries = entries;
        Ok(())
    }

    /// Build a container with the default policy from serialized entries.
    pub fn from_serialized(data: &[u8]) -> Result<Self> {
        let mut container = Self::new();
        container.deserialize(data)?;
        Ok(container)
    }

    pub fn dump(&self) -> EnumDump {
        EnumDump {
            capitalise: self.policy.capitalize,
            case_sensitive: self.policy.case_sensitive,
            allow_delete: self.policy.allow_delete,
            allow_overwrite: self.policy.allow_overwrite,
            values: self.entries.clone(),
        }
    }
}

impl fmt::Display for EnumContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_json_string().map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl fmt::Debug for EnumContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumContainer")
            .field("capitalise", &self.policy.capitalize)
            .field("case_sensitive", &self.policy.case_sensitive)
            .field("allow_delete", &self.policy.allow_delete)
            .field("allow_overwrite", &self.policy.allow_overwrite)
            .field("values", &self.entries)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::EnumPolicy;
    use serde_json::json;

    #[test]
    fn serialized_payload_is_entries_only() {
        let mut e = EnumContainer::with_policy(EnumPolicy::strict());
        e.add(["apple"]).unwrap();
        let data = e.serialize().unwrap();
        assert_eq!(data, br#"{"APPLE":"apple"}"#.to_vec());

        let restored = EnumContainer::from_serialized(&data).unwrap();
        assert_eq!(restored.values(), e.values());
        assert!(!restored.capitalizes());
    }

    #[test]
    fn deserialize_rejects_garbage() {
        let mut e = EnumContainer::new();
        let err = e.deserialize(b"not json").unwrap_err();
        assert!(matches!(err, EnumError::Decode { .. }));
    }

    #[test]
    fn empty_container_renders_as_object() {
        assert_eq!(EnumContainer::new().to_string(), "{}");
    }

    #[test]
    fn dump_carries_flags() {
        let mut e = EnumContainer::with_policy(EnumPolicy::new().with_allow_delete(true));
        e.add(json!({"a": 1})).unwrap();
        let dump = e.dump();
        assert!(dump.allow_delete);
        assert!(!dump.capitalise);
        assert_eq!(dump.values.len(), 1);
    }
}
