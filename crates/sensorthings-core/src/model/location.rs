//! Locations and historical locations.

use super::Thing;
use crate::codec;
use crate::entity::{entity_accessors, entity_identity, Entity, NavigationList};
use crate::entity_type::EntityType;
use crate::id::Id;
use crate::link::Link;
use crate::list::EntityList;
use crate::service::SensorThingsService;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Where a thing is, usually a GeoJSON geometry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Location {
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
    /// Encoding of `location`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding_type: Option<String>,
    /// The location itself
    #[serde(skip_serializing_if = "Value::is_null")]
    pub location: Value,
    /// Free-form properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,

    /// Things currently at this location
    #[serde(rename = "Things", skip_serializing_if = "EntityList::is_empty")]
    pub things: EntityList<Thing>,
    /// Historical locations referring to this location
    #[serde(
        rename = "HistoricalLocations",
        skip_serializing_if = "EntityList::is_empty"
    )]
    pub historical_locations: EntityList<HistoricalLocation>,
}

impl Location {
    /// Create a new, not yet stored location.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        encoding_type: impl Into<String>,
        location: Value,
    ) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            encoding_type: Some(encoding_type.into()),
            location,
            ..Self::default()
        }
    }
}

impl Entity for Location {
    const KIND: EntityType = EntityType::Location;
    const NAVIGATION: &'static [EntityType] =
        &[EntityType::Things, EntityType::HistoricalLocations];

    entity_accessors!();

    fn navigation_lists_mut(&mut self) -> Vec<&mut dyn NavigationList> {
        vec![&mut self.things, &mut self.historical_locations]
    }
}

entity_identity!(Location);

/// The time a thing was at its then-current locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HistoricalLocation {
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

    /// When the thing arrived at the locations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,

    /// The thing that moved
    #[serde(
        rename = "Thing",
        deserialize_with = "codec::nested",
        skip_serializing_if = "Option::is_none"
    )]
    pub thing: Option<Box<Thing>>,
    /// The locations at that time
    #[serde(rename = "Locations", skip_serializing_if = "EntityList::is_empty")]
    pub locations: EntityList<Location>,
}

impl HistoricalLocation {
    /// Create a new historical location at `time`.
    #[must_use]
    pub fn new(time: DateTime<Utc>) -> Self {
        Self {
            time: Some(time),
            ..Self::default()
        }
    }
}

impl Entity for HistoricalLocation {
    const KIND: EntityType = EntityType::HistoricalLocation;
    const NAVIGATION: &'static [EntityType] = &[EntityType::Thing, EntityType::Locations];

    entity_accessors!();

    fn navigation_lists_mut(&mut self) -> Vec<&mut dyn NavigationList> {
        vec![&mut self.locations]
    }
}

entity_identity!(HistoricalLocation);
