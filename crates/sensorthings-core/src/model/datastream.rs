//! Datastreams.

use super::{Observation, ObservedProperty, Sensor, Thing, UnitOfMeasurement};
use crate::codec;
use crate::entity::{entity_accessors, entity_identity, Entity, NavigationList};
use crate::entity_type::EntityType;
use crate::id::Id;
use crate::link::Link;
use crate::list::EntityList;
use crate::service::SensorThingsService;
use crate::time::TimeInterval;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Observation type URI for plain measurements.
pub const OM_MEASUREMENT: &str =
    "http://www.opengis.net/def/observationType/OGC-OM/2.0/OM_Measurement";

/// A series of observations of one property by one sensor on one thing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Datastream {
    #[serde(rename = "@iot.id", skip_serializing_if = "Option::is_none")]
    id: Option<Id>,
    #[serde(
        rename = "@iot.selfLink",
        skip_deserializing,
        skip_serializing_if = "Option::is_none"
    )]
    self_link: Option<Link>,
    #[serde(skip)]
    service: Option<Arc<SensorThingsService>>,

    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Type of the observation results (see [`OM_MEASUREMENT`])
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation_type: Option<String>,
    /// Unit of the results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_of_measurement: Option<UnitOfMeasurement>,
    /// Spatial bounds of the features of interest, server-computed
    #[serde(skip_serializing_if = "Value::is_null")]
    pub observed_area: Value,
    /// Span of the observations' phenomenon times, server-computed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phenomenon_time: Option<TimeInterval>,
    /// Span of the observations' result times, server-computed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_time: Option<TimeInterval>,
    /// Free-form properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,

    /// The thing this datastream belongs to
    #[serde(
        rename = "Thing",
        deserialize_with = "codec::nested",
        skip_serializing_if = "Option::is_none"
    )]
    pub thing: Option<Box<Thing>>,
    /// The sensor producing the observations
    #[serde(
        rename = "Sensor",
        deserialize_with = "codec::nested",
        skip_serializing_if = "Option::is_none"
    )]
    pub sensor: Option<Box<Sensor>>,
    /// The observed property
    #[serde(
        rename = "ObservedProperty",
        deserialize_with = "codec::nested",
        skip_serializing_if = "Option::is_none"
    )]
    pub observed_property: Option<Box<ObservedProperty>>,
    /// The observations of this datastream
    #[serde(rename = "Observations", skip_serializing_if = "EntityList::is_empty")]
    pub observations: EntityList<Observation>,
}

impl Datastream {
    /// Create a new, not yet stored datastream.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        observation_type: impl Into<String>,
        unit_of_measurement: UnitOfMeasurement,
    ) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            observation_type: Some(observation_type.into()),
            unit_of_measurement: Some(unit_of_measurement),
            ..Self::default()
        }
    }
}

impl Entity for Datastream {
    const KIND: EntityType = EntityType::Datastream;
    const NAVIGATION: &'static [EntityType] = &[
        EntityType::Thing,
        EntityType::Sensor,
        EntityType::ObservedProperty,
        EntityType::Observations,
    ];

    entity_accessors!();

    fn navigation_lists_mut(&mut self) -> Vec<&mut dyn NavigationList> {
        vec![&mut self.observations]
    }
}

entity_identity!(Datastream);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_unit_and_intervals() {
        let datastream: Datastream = serde_json::from_value(json!({
            "@iot.id": 1,
            "name": "Air temperature",
            "observationType": OM_MEASUREMENT,
            "unitOfMeasurement": {"name": "degree Celsius", "symbol": "°C"},
            "phenomenonTime": "2024-05-01T00:00:00Z/2024-05-02T00:00:00Z"
        }))
        .unwrap();

        let unit = datastream.unit_of_measurement.as_ref().unwrap();
        assert_eq!(unit.symbol.as_deref(), Some("°C"));
        assert!(unit.definition.is_none());
        assert!(datastream.phenomenon_time.is_some());
        assert!(datastream.result_time.is_none());
    }

    #[test]
    fn rejects_bad_interval() {
        let result = serde_json::from_value::<Datastream>(json!({
            "phenomenonTime": "last week"
        }));
        assert!(result.is_err());
    }
}
