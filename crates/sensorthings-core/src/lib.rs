//! # SensorThings Core
//!
//! Client-side entity model for the OGC SensorThings API.
//!
//! This crate provides:
//! - The eight SensorThings entities with identity-based equality
//! - Navigation collections carrying `@iot.count` and `@iot.nextLink`
//! - The reconciler routing `@iot.*` namespaced properties onto entities
//! - Decoding of entity and entity-set payloads
//! - SWE Common components resolved through a discriminator registry

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod entity;
pub mod entity_type;
pub mod id;
pub mod link;
pub mod list;
pub mod model;
pub mod reconcile;
pub mod registry;
pub mod service;
pub mod swe;
pub mod time;

pub use codec::{decode, decode_page, DecodeError, Decoded, PropertyOutcome};
pub use entity::{Entity, Navigation, NavigationList};
pub use entity_type::EntityType;
pub use id::Id;
pub use link::{Link, LinkError};
pub use list::EntityList;
pub use model::{
    Datastream, FeatureOfInterest, HistoricalLocation, Location, Observation, ObservedProperty,
    Sensor, Thing, UnitOfMeasurement,
};
pub use reconcile::{reconcile, reconcile_list, MalformedValue, Outcome, UnknownReason};
pub use registry::{RegistryError, TypeRegistry};
pub use service::SensorThingsService;
pub use time::{TimeError, TimeInterval, TimeObject};
