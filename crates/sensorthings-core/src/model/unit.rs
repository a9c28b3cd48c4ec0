//! Units of measurement.

use serde::{Deserialize, Serialize};

/// Unit of the observations in a datastream, e.g. degree Celsius.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitOfMeasurement {
    /// Full name (e.g. "degree Celsius")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Symbol (e.g. "°C")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// URI defining the unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
}

impl UnitOfMeasurement {
    /// Create a fully specified unit.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        definition: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            symbol: Some(symbol.into()),
            definition: Some(definition.into()),
        }
    }
}
