//! Observations.

use super::{Datastream, FeatureOfInterest};
use crate::codec;
use crate::entity::{entity_accessors, entity_identity, Entity, NavigationList};
use crate::entity_type::EntityType;
use crate::id::Id;
use crate::link::Link;
use crate::service::SensorThingsService;
use crate::time::{TimeInterval, TimeObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// A single measured or estimated value of a datastream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Observation {
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

    /// When the observed phenomenon happened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phenomenon_time: Option<TimeObject>,
    /// When the result was produced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_time: Option<DateTime<Utc>>,
    /// The observed value; any JSON
    #[serde(skip_serializing_if = "Value::is_null")]
    pub result: Value,
    /// Quality of the result
    #[serde(skip_serializing_if = "Value::is_null")]
    pub result_quality: Value,
    /// Period during which the result may be used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_time: Option<TimeInterval>,
    /// Environmental conditions during measurement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,

    /// The datastream this observation belongs to
    #[serde(
        rename = "Datastream",
        deserialize_with = "codec::nested",
        skip_serializing_if = "Option::is_none"
    )]
    pub datastream: Option<Box<Datastream>>,
    /// The feature this observation is about
    #[serde(
        rename = "FeatureOfInterest",
        deserialize_with = "codec::nested",
        skip_serializing_if = "Option::is_none"
    )]
    pub feature_of_interest: Option<Box<FeatureOfInterest>>,
}

impl Observation {
    /// Create a new observation with a result and phenomenon time.
    #[must_use]
    pub fn new(result: Value, phenomenon_time: impl Into<TimeObject>) -> Self {
        Self {
            result,
            phenomenon_time: Some(phenomenon_time.into()),
            ..Self::default()
        }
    }

    /// Link this observation to a datastream by id.
    #[must_use]
    pub fn with_datastream(mut self, datastream: &Datastream) -> Self {
        self.datastream = Some(Box::new(datastream.with_only_id()));
        self
    }
}

impl Entity for Observation {
    const KIND: EntityType = EntityType::Observation;
    const NAVIGATION: &'static [EntityType] =
        &[EntityType::Datastream, EntityType::FeatureOfInterest];

    entity_accessors!();

    fn navigation_lists_mut(&mut self) -> Vec<&mut dyn NavigationList> {
        Vec::new()
    }
}

entity_identity!(Observation);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn links_datastream_by_id_only() {
        let mut datastream = Datastream::default();
        datastream.set_id(Some(Id::Long(7)));
        datastream.name = Some("Temperature".to_string());

        let time = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let observation = Observation::new(json!(21.5), time).with_datastream(&datastream);

        assert_eq!(
            serde_json::to_value(&observation).unwrap(),
            json!({
                "phenomenonTime": "2024-05-01T12:00:00Z",
                "result": 21.5,
                "Datastream": {"@iot.id": 7}
            })
        );
    }

    #[test]
    fn no_navigation_collections() {
        let mut observation = Observation::default();
        assert!(observation.navigation_lists_mut().is_empty());
        assert!(observation.navigation_mut(EntityType::Observations).is_none());
    }
}
