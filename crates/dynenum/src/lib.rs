//! Runtime enumerations.
//!
//! An [`EnumContainer`] is an ordered mapping from string keys to JSON values
//! with policy-driven behavior:
//!
//! - keys are normalized (spaces become underscores, optionally upper-cased);
//! - lookups fold ASCII case unless case-sensitive;
//! - overwrites and deletes are only possible when the [`EnumPolicy`] allows
//!   them.
//!
//! # Example
//!
//! ```
//! use dynenum::EnumContainer;
//! use serde_json::json;
//!
//! let mut cars = EnumContainer::new();
//! cars.add(json!({"Porsche": "fast", "Skoda": "slow"}))?;
//!
//! assert_eq!(cars.value("skoda")?, &json!("slow"));
//! assert_eq!(cars.key("fast")?, "Porsche");
//! # Ok::<(), dynenum::EnumError>(())
//! ```
//!
//! # Architecture
//!
//! - `container.rs` - the container, add/lookup semantics
//! - `access.rs` - indexed and property-style access
//! - `codec.rs` - JSON text, serialized payload, diagnostic dump
//! - `definition.rs` - named definitions, registry, shared handles
//! - `entry.rs` - input shapes for `add`
//! - `lookup.rs` - normalization and case folding
//! - `options.rs` - policy flags
//! - `error.rs` - error types

mod access;
mod codec;
mod container;
mod definition;
mod entry;
mod error;
mod lookup;
mod options;

pub use access::Accessor;
pub use codec::EnumDump;
pub use container::{Entries, EnumContainer, KeyMatch};
pub use definition::{EnumDefinition, EnumRegistry, SharedEnum};
pub use entry::{EntryKey, NewValues};
pub use error::{EnumError, ErrorKind, Result};
pub use lookup::normalize_key;
pub use options::EnumPolicy;
