//! Discriminator-based polymorphic decoding.
//!
//! A [`TypeRegistry`] maps the string found in a discriminator property
//! (by default `"type"`) to a factory building the concrete value. Types are
//! registered explicitly and the registry is validated once at startup.

use serde_json::Value;
use std::collections::BTreeMap;

/// Default discriminator property.
pub const DEFAULT_DISCRIMINATOR: &str = "type";

/// Builds a value from its full JSON representation.
pub type Factory<T> = fn(Value) -> Result<T, serde_json::Error>;

/// Registry of factories keyed by discriminator value.
pub struct TypeRegistry<T> {
    property: &'static str,
    factories: BTreeMap<String, Factory<T>>,
}

impl<T> Default for TypeRegistry<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DISCRIMINATOR)
    }
}

impl<T> std::fmt::Debug for TypeRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("property", &self.property)
            .field("types", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<T> TypeRegistry<T> {
    /// Create an empty registry reading the discriminator from `property`.
    #[must_use]
    pub fn new(property: &'static str) -> Self {
        Self {
            property,
            factories: BTreeMap::new(),
        }
    }

    /// Register a factory for `discriminator`.
    ///
    /// # Errors
    ///
    /// Returns error if the discriminator is empty or already registered.
    pub fn register(
        &mut self,
        discriminator: impl Into<String>,
        factory: Factory<T>,
    ) -> Result<(), RegistryError> {
        let discriminator = discriminator.into();
        if discriminator.is_empty() {
            return Err(RegistryError::EmptyDiscriminator);
        }
        if self.factories.contains_key(&discriminator) {
            return Err(RegistryError::Duplicate(discriminator));
        }
        tracing::debug!(property = self.property, %discriminator, "Registered type");
        self.factories.insert(discriminator, factory);
        Ok(())
    }

    /// Check that the registry can resolve anything at all.
    ///
    /// # Errors
    ///
    /// Returns error if no type is registered.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.factories.is_empty() {
            return Err(RegistryError::Empty {
                property: self.property,
            });
        }
        Ok(())
    }

    /// Whether `discriminator` is registered.
    #[must_use]
    pub fn contains(&self, discriminator: &str) -> bool {
        self.factories.contains_key(discriminator)
    }

    /// Registered discriminators, sorted.
    pub fn discriminators(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Build a value from JSON, dispatching on the discriminator.
    ///
    /// # Errors
    ///
    /// Returns error if the discriminator is missing, not a string, not
    /// registered, or the factory rejects the JSON.
    pub fn resolve(&self, value: Value) -> Result<T, RegistryError> {
        let discriminator = match value.get(self.property) {
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(RegistryError::InvalidDiscriminator {
                    property: self.property,
                })
            }
            None => {
                return Err(RegistryError::MissingDiscriminator {
                    property: self.property,
                })
            }
        };

        let factory = self
            .factories
            .get(&discriminator)
            .ok_or_else(|| RegistryError::UnknownType(discriminator.clone()))?;

        factory(value).map_err(|e| RegistryError::Factory {
            discriminator,
            message: e.to_string(),
        })
    }
}

/// Errors that can occur registering or resolving types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Registry has no types
    #[error("no types registered for discriminator \"{property}\"")]
    Empty {
        /// Discriminator property
        property: &'static str,
    },
    /// Empty discriminator value
    #[error("discriminator must not be empty")]
    EmptyDiscriminator,
    /// Discriminator registered twice
    #[error("type \"{0}\" registered twice")]
    Duplicate(String),
    /// Payload has no discriminator
    #[error("missing discriminator property \"{property}\"")]
    MissingDiscriminator {
        /// Discriminator property
        property: &'static str,
    },
    /// Discriminator is not a string
    #[error("discriminator property \"{property}\" must be a string")]
    InvalidDiscriminator {
        /// Discriminator property
        property: &'static str,
    },
    /// Discriminator not registered
    #[error("unknown type \"{0}\"")]
    UnknownType(String),
    /// Factory rejected the payload
    #[error("invalid {discriminator}: {message}")]
    Factory {
        /// Discriminator value
        discriminator: String,
        /// Underlying error
        message: String,
    },
}
