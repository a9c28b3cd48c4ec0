//! Things.

use super::{Datastream, HistoricalLocation, Location};
use crate::entity::{entity_accessors, entity_identity, Entity, NavigationList};
use crate::entity_type::EntityType;
use crate::id::Id;
use crate::link::Link;
use crate::list::EntityList;
use crate::service::SensorThingsService;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// A physical or virtual object that carries sensors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Thing {
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
    /// Free-form properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,

    /// Current locations
    #[serde(rename = "Locations", skip_serializing_if = "EntityList::is_empty")]
    pub locations: EntityList<Location>,
    /// Past locations
    #[serde(
        rename = "HistoricalLocations",
        skip_serializing_if = "EntityList::is_empty"
    )]
    pub historical_locations: EntityList<HistoricalLocation>,
    /// Datastreams of this thing
    #[serde(rename = "Datastreams", skip_serializing_if = "EntityList::is_empty")]
    pub datastreams: EntityList<Datastream>,
}

impl Thing {
    /// Create a new, not yet stored thing.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            ..Self::default()
        }
    }
}

impl Entity for Thing {
    const KIND: EntityType = EntityType::Thing;
    const NAVIGATION: &'static [EntityType] = &[
        EntityType::Locations,
        EntityType::HistoricalLocations,
        EntityType::Datastreams,
    ];

    entity_accessors!();

    fn navigation_lists_mut(&mut self) -> Vec<&mut dyn NavigationList> {
        vec![
            &mut self.locations,
            &mut self.historical_locations,
            &mut self.datastreams,
        ]
    }
}

entity_identity!(Thing);
