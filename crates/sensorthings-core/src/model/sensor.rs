//! Sensors and observed properties.

use super::Datastream;
use crate::entity::{entity_accessors, entity_identity, Entity, NavigationList};
use crate::entity_type::EntityType;
use crate::id::Id;
use crate::link::Link;
use crate::list::EntityList;
use crate::service::SensorThingsService;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// An instrument or procedure producing observations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Sensor {
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
    /// Encoding of `metadata` (e.g. `application/pdf`, SensorML)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding_type: Option<String>,
    /// Sensor description or a link to it
    #[serde(skip_serializing_if = "Value::is_null")]
    pub metadata: Value,
    /// Free-form properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,

    /// Datastreams fed by this sensor
    #[serde(rename = "Datastreams", skip_serializing_if = "EntityList::is_empty")]
    pub datastreams: EntityList<Datastream>,
}

impl Sensor {
    /// Create a new, not yet stored sensor.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        encoding_type: impl Into<String>,
        metadata: Value,
    ) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            encoding_type: Some(encoding_type.into()),
            metadata,
            ..Self::default()
        }
    }
}

impl Entity for Sensor {
    const KIND: EntityType = EntityType::Sensor;
    const NAVIGATION: &'static [EntityType] = &[EntityType::Datastreams];

    entity_accessors!();

    fn navigation_lists_mut(&mut self) -> Vec<&mut dyn NavigationList> {
        vec![&mut self.datastreams]
    }
}

entity_identity!(Sensor);

/// The phenomenon a datastream observes, e.g. air temperature.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObservedProperty {
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
    /// URI defining the property
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    /// Free-text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,

    /// Datastreams observing this property
    #[serde(rename = "Datastreams", skip_serializing_if = "EntityList::is_empty")]
    pub datastreams: EntityList<Datastream>,
}

impl ObservedProperty {
    /// Create a new, not yet stored observed property.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        definition: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            definition: Some(definition.into()),
            description: Some(description.into()),
            ..Self::default()
        }
    }
}

impl Entity for ObservedProperty {
    const KIND: EntityType = EntityType::ObservedProperty;
    const NAVIGATION: &'static [EntityType] = &[EntityType::Datastreams];

    entity_accessors!();

    fn navigation_lists_mut(&mut self) -> Vec<&mut dyn NavigationList> {
        vec![&mut self.datastreams]
    }
}

entity_identity!(ObservedProperty);
