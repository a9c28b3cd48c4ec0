//! Features of interest.

use super::Observation;
use crate::entity::{entity_accessors, entity_identity, Entity, NavigationList};
use crate::entity_type::EntityType;
use crate::id::Id;
use crate::link::Link;
use crate::list::EntityList;
use crate::service::SensorThingsService;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// The feature an observation is made of, usually a geometry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureOfInterest {
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
    /// Encoding of `feature` (e.g. `application/geo+json`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding_type: Option<String>,
    /// The feature, typically a GeoJSON geometry
    #[serde(skip_serializing_if = "Value::is_null")]
    pub feature: Value,
    /// Free-form properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,

    /// Observations made of this feature
    #[serde(rename = "Observations", skip_serializing_if = "EntityList::is_empty")]
    pub observations: EntityList<Observation>,
}

impl FeatureOfInterest {
    /// Create a new, not yet stored feature of interest.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        encoding_type: impl Into<String>,
        feature: Value,
    ) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            encoding_type: Some(encoding_type.into()),
            feature,
            ..Self::default()
        }
    }
}

impl Entity for FeatureOfInterest {
    const KIND: EntityType = EntityType::FeatureOfInterest;
    const NAVIGATION: &'static [EntityType] = &[EntityType::Observations];

    entity_accessors!();

    fn navigation_lists_mut(&mut self) -> Vec<&mut dyn NavigationList> {
        vec![&mut self.observations]
    }
}

entity_identity!(FeatureOfInterest);
