//! Named enumeration definitions.
//!
//! A definition captures a name, a policy, and seed values. Instances are
//! independent by default: [`EnumDefinition::instantiate`] hands out a fresh
//! container each time. Code that wants every user of a definition to see
//! one store opts in through [`EnumRegistry::shared`], which returns handles
//! to a single container per definition.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::container::{EnumContainer, Entries};
use crate::entry::NewValues;
use crate::error::{EnumError, Result};
use crate::options::EnumPolicy;

/// Name, policy, and seed values of an enumeration.
///
/// ```json
/// {
///     "name": "Storage",
///     "policy": { "capitalize": true, "case_sensitive": true },
///     "values": { "BIT": 1, "BYTE": 8 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDefinition {
    pub name: String,
    #[serde(default)]
    pub policy: EnumPolicy,
    #[serde(default)]
    pub values: NewValues,
}

impl EnumDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            policy: EnumPolicy::default(),
            values: NewValues::new(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: EnumPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Append seed values.
    #[must_use]
    pub fn with_values(mut self, values: impl Into<NewValues>) -> Self {
        self.values.extend(values.into());
        self
    }

    /// Parse a definition from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| EnumError::Decode { source })
    }

    /// Build an independent container from this definition.
    ///
    /// Seed keys are normalized (spaces, capitalization); positional seeds
    /// must be strings.
    pub fn instantiate(&self) -> Result<EnumContainer> {
        EnumContainer::from_seed(self.policy, self.values.clone())
    }
}

/// Handle to a container shared by every user of a definition.
///
/// Clones alias the same store: a write through one handle is visible
/// through all others.
#[derive(Debug, Clone)]
pub struct SharedEnum {
    inner: Rc<RefCell<EnumContainer>>,
}

impl SharedEnum {
    pub fn new(container: EnumContainer) -> Self {
        Self {
            inner: Rc::new(RefCell::new(container)),
        }
    }

    /// Borrow the container.
    ///
    /// # Panics
    ///
    /// Panics if the container is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, EnumContainer> {
        self.inner.borrow()
    }

    /// Mutably borrow the container.
    ///
    /// # Panics
    ///
    /// Panics if the container is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, EnumContainer> {
        self.inner.borrow_mut()
    }

    /// Look up a value; returns an owned copy since the borrow ends here.
    pub fn value(&self, key: &str) -> Result<Value> {
        self.borrow().value(key).cloned()
    }

    /// Add values to the shared store and return a copy of all entries.
    pub fn add(&self, values: impl Into<NewValues>) -> Result<Entries> {
        self.borrow_mut().add(values).cloned()
    }

    /// Whether both handles point at the same store.
    pub fn ptr_eq(&self, other: &SharedEnum) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Registry of enumeration definitions by name.
#[derive(Debug, Default)]
pub struct EnumRegistry {
    definitions: IndexMap<String, EnumDefinition>,
    shared: HashMap<String, SharedEnum>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition. Names must be unique.
    pub fn register(&mut self, definition: EnumDefinition) -> Result<()> {
        if self.definitions.contains_key(&definition.name) {
            return Err(EnumError::DuplicateDefinition {
                name: definition.name,
            });
        }
        debug!(name = %definition.name, seeds = definition.values.len(), "registered enum definition");
        self.definitions.insert(definition.name.clone(), definition);
        Ok(())
    }

    /// Load and register definitions from a JSON array.
    pub fn register_json(&mut self, text: &str) -> Result<usize> {
        let definitions: Vec<EnumDefinition> =
            serde_json::from_str(text).map_err(|source| EnumError::Decode { source })?;
        let count = definitions.len();
        for definition in definitions {
            self.register(definition)?;
        }
        Ok(count)
    }

    pub fn definition(&self, name: &str) -> Result<&EnumDefinition> {
        self.definitions
            .get(name)
            .ok_or_else(|| EnumError::UnknownDefinition {
                name: name.to_string(),
            })
    }

    pub fn names(&self) -> Vec<&str> {
        self.definitions.keys().map(String::as_str).collect()
    }

    /// Build an independent container from a registered definition.
    pub fn instantiate(&self, name: &str) -> Result<EnumContainer> {
        self.definition(name)?.instantiate()
    }

    /// Handle to the single shared container of a definition.
    ///
    /// The container is built on first use; later calls return handles to
    /// the same store.
    pub fn shared(&mut self, name: &str) -> Result<SharedEnum> {
        if let Some(handle) = self.shared.get(name) {
            return Ok(handle.clone());
        }
        let handle = SharedEnum::new(self.instantiate(name)?);
        self.shared.insert(name.to_string(), handle.clone());
        Ok(handle)
    }

    /// Value of `key` in the shared container of a definition.
    pub fn value(&mut self, name: &str, key: &str) -> Result<Value> {
        self.shared(name)?.value(key)
    }

    /// Drop the shared container of a definition so the next
    /// [`EnumRegistry::shared`] call starts again from the seed.
    ///
    /// Existing handles keep the old store.
    pub fn release_shared(&mut self, name: &str) -> bool {
        self.shared.remove(name).is_some()
    }
}
