//! The SensorThings entity catalogue.

mod datastream;
mod feature_of_interest;
mod location;
mod observation;
mod sensor;
mod thing;
mod unit;

pub use datastream::{Datastream, OM_MEASUREMENT};
pub use feature_of_interest::FeatureOfInterest;
pub use location::{HistoricalLocation, Location};
pub use observation::Observation;
pub use sensor::{ObservedProperty, Sensor};
pub use thing::Thing;
pub use unit::UnitOfMeasurement;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entity, Navigation};
    use crate::entity_type::EntityType;
    use crate::id::Id;
    use crate::service::SensorThingsService;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn assert_navigation_table<E: Entity>() {
        let mut entity = E::default();
        for &kind in E::NAVIGATION {
            match entity.navigation_mut(kind) {
                Some(Navigation::List(list)) => {
                    assert!(kind.is_collection(), "{} -> {kind}", E::KIND);
                    assert_eq!(list.entity_type(), kind);
                }
                Some(Navigation::Entity) => {
                    assert!(!kind.is_collection(), "{} -> {kind}", E::KIND);
                }
                None => panic!("{} declares {kind} but has no accessor", E::KIND),
            }
        }
        for kind in EntityType::ALL {
            if !E::NAVIGATION.contains(&kind) {
                assert!(entity.navigation_mut(kind).is_none(), "{} -> {kind}", E::KIND);
            }
        }
        let lists = E::NAVIGATION.iter().filter(|k| k.is_collection()).count();
        assert_eq!(entity.navigation_lists_mut().len(), lists);
    }

    #[test]
    fn navigation_tables_are_consistent() {
        assert_navigation_table::<Thing>();
        assert_navigation_table::<Location>();
        assert_navigation_table::<HistoricalLocation>();
        assert_navigation_table::<Datastream>();
        assert_navigation_table::<Sensor>();
        assert_navigation_table::<ObservedProperty>();
        assert_navigation_table::<Observation>();
        assert_navigation_table::<FeatureOfInterest>();
    }

    #[test]
    fn service_cascades_to_collections_only() {
        let service = Arc::new(SensorThingsService::parse("http://x/v1.1").unwrap());
        let mut thing = Thing::new("Weather station", "Rooftop");
        thing.datastreams.push(Datastream::default());

        thing.set_service(&service);

        assert!(Arc::ptr_eq(thing.service().unwrap(), &service));
        assert!(Arc::ptr_eq(thing.locations.service().unwrap(), &service));
        assert!(Arc::ptr_eq(thing.historical_locations.service().unwrap(), &service));
        assert!(Arc::ptr_eq(thing.datastreams.service().unwrap(), &service));
        assert!(thing.datastreams.entities()[0].service().is_none());
    }

    #[test]
    fn service_assignment_is_idempotent() {
        let first = Arc::new(SensorThingsService::parse("http://x/v1.1").unwrap());
        let second = Arc::new(SensorThingsService::parse("http://y/v1.1").unwrap());
        let mut foi = FeatureOfInterest::default();

        foi.set_service(&first);
        foi.set_service(&first);
        assert_eq!(Arc::strong_count(&first), 3);

        foi.set_service(&second);
        assert!(Arc::ptr_eq(foi.observations.service().unwrap(), &second));
        assert_eq!(Arc::strong_count(&first), 1);
    }

    #[test]
    fn entities_work_as_set_keys() {
        let mut a = Thing::new("A", "first fetch");
        a.set_id(Some(Id::Long(1)));
        let mut b = Thing::default();
        b.set_id(Some(Id::Long(1)));
        let mut c = Thing::default();
        c.set_id(Some(Id::Long(2)));

        let set: HashSet<Thing> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn display_names_kind_and_id() {
        let mut sensor = Sensor::default();
        assert_eq!(sensor.to_string(), "Sensor(no id)");
        sensor.set_id(Some(Id::from("s-1")));
        assert_eq!(sensor.to_string(), "Sensor(s-1)");
    }
}
