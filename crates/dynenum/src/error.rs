//! Error types for enumeration operations.
//!
//! Every failing operation returns an [`EnumError`]. Errors fall into five
//! broad kinds (see [`ErrorKind`]) so callers can branch on the category
//! without matching every variant.

use thiserror::Error;

/// Broad category of an [`EnumError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A key/value pair could not be normalized into an entry.
    InvalidEntry,
    /// The operation is forbidden by the container policy.
    Permission,
    /// The requested key, value, or definition does not exist.
    Lookup,
    /// A definition with the same name is already registered.
    Conflict,
    /// Encoding or decoding of entries failed.
    Codec,
}

/// Enumeration operation error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EnumError {
    /// Positional key paired with a non-string value.
    #[error("Key '{key}' for value '{value}' is not a string")]
    InvalidEntry { key: String, value: String },

    /// Explicit overwrite requested on a container that forbids it.
    #[error("Overwrite of key '{key}' is not allowed")]
    OverwriteNotAllowed { key: String },

    /// Delete requested on a container that forbids it.
    #[error("Delete of key '{key}' is not allowed")]
    DeleteNotAllowed { key: String },

    /// Indexed unset requested on a container that allows overwrites.
    #[error("Unset of key '{key}' is not allowed while overwrites are enabled")]
    UnsetNotAllowed { key: String },

    #[error("Value for key '{key}' does not exist")]
    KeyNotFound { key: String },

    #[error("Key for value '{value}' does not exist")]
    ValueNotFound { value: String },

    #[error("Enum definition '{name}' is not registered")]
    UnknownDefinition { name: String },

    #[error("Enum definition '{name}' is already registered")]
    DuplicateDefinition { name: String },

    /// A stored value could not be converted to the requested type.
    #[error("Value for key '{key}' cannot be converted: {source}")]
    Conversion {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode enum values")]
    Encode {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to decode enum values")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}

impl EnumError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidEntry { .. } => ErrorKind::InvalidEntry,
            Self::OverwriteNotAllowed { .. }
            | Self::DeleteNotAllowed { .. }
            | Self::UnsetNotAllowed { .. } => ErrorKind::Permission,
            Self::DuplicateDefinition { .. } => ErrorKind::Conflict,
            Self::KeyNotFound { .. }
            | Self::ValueNotFound { .. }
            | Self::UnknownDefinition { .. } => ErrorKind::Lookup,
            Self::Conversion { .. } | Self::Encode { .. } | Self::Decode { .. } => {
                ErrorKind::Codec
            }
        }
    }

    /// Returns true if the error was raised by a policy flag.
    pub fn is_permission(&self) -> bool {
        self.kind() == ErrorKind::Permission
    }

    /// Returns true if the error reports a missing key, value, or definition.
    pub fn is_lookup(&self) -> bool {
        self.kind() == ErrorKind::Lookup
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::InvalidEntry { .. } => {
                Some("Give the value an explicit string key or use a string value.".into())
            }
            Self::OverwriteNotAllowed { .. } => {
                Some("Define the enum with allow_overwrite enabled.".into())
            }
            Self::DeleteNotAllowed { .. } => {
                Some("Define the enum with allow_delete enabled.".into())
            }
            Self::UnsetNotAllowed { .. } => {
                Some("Use delete() or define the enum with allow_overwrite disabled.".into())
            }
            Self::KeyNotFound { .. } | Self::ValueNotFound { .. } => {
                Some("Check the spelling or retry with case-insensitive lookup.".into())
            }
            Self::UnknownDefinition { .. } => {
                Some("Register the definition before instantiating it.".into())
            }
            Self::DuplicateDefinition { .. } => None,
            Self::Conversion { .. } => None,
            Self::Encode { .. } => None,
            Self::Decode { .. } => {
                Some("Make sure the data was produced by EnumContainer::serialize.".into())
            }
        }
    }
}

/// Result type alias for enumeration operations.
pub type Result<T> = std::result::Result<T, EnumError>;
