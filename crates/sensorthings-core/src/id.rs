//! Server-assigned entity identifiers.

use serde::{Deserialize, Serialize};

/// Identifier of an entity, as carried in `@iot.id`.
///
/// SensorThings servers use either integer or string identifiers; the
/// JSON representation decides which variant is used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    /// Integer identifier
    Long(i64),
    /// String identifier
    Text(String),
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Id::Long(value) => write!(f, "{value}"),
            Id::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Id::Long(value)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Id::Text(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Id::Text(value)
    }
}
