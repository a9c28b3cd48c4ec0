//! The closed set of SensorThings entity kinds.

/// Kind of a SensorThings entity or entity set.
///
/// Each kind has a canonical name. Singular names identify to-one
/// relations and single entities, plural names identify entity sets and
/// to-many relations. The same names prefix namespaced JSON properties
/// such as `Observations@iot.count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityType {
    /// A single datastream
    Datastream,
    /// A set of datastreams
    Datastreams,
    /// A single feature of interest
    FeatureOfInterest,
    /// A set of features of interest
    FeaturesOfInterest,
    /// A single historical location
    HistoricalLocation,
    /// A set of historical locations
    HistoricalLocations,
    /// A single location
    Location,
    /// A set of locations
    Locations,
    /// A single observation
    Observation,
    /// A set of observations
    Observations,
    /// A single observed property
    ObservedProperty,
    /// A set of observed properties
    ObservedProperties,
    /// A single sensor
    Sensor,
    /// A set of sensors
    Sensors,
    /// A single thing
    Thing,
    /// A set of things
    Things,
}

impl EntityType {
    /// Every kind, singular and plural.
    pub const ALL: [EntityType; 16] = [
        EntityType::Datastream,
        EntityType::Datastreams,
        EntityType::FeatureOfInterest,
        EntityType::FeaturesOfInterest,
        EntityType::HistoricalLocation,
        EntityType::HistoricalLocations,
        EntityType::Location,
        EntityType::Locations,
        EntityType::Observation,
        EntityType::Observations,
        EntityType::ObservedProperty,
        EntityType::ObservedProperties,
        EntityType::Sensor,
        EntityType::Sensors,
        EntityType::Thing,
        EntityType::Things,
    ];

    /// Canonical name, as used in JSON and resource paths.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EntityType::Datastream => "Datastream",
            EntityType::Datastreams => "Datastreams",
            EntityType::FeatureOfInterest => "FeatureOfInterest",
            EntityType::FeaturesOfInterest => "FeaturesOfInterest",
            EntityType::HistoricalLocation => "HistoricalLocation",
            EntityType::HistoricalLocations => "HistoricalLocations",
            EntityType::Location => "Location",
            EntityType::Locations => "Locations",
            EntityType::Observation => "Observation",
            EntityType::Observations => "Observations",
            EntityType::ObservedProperty => "ObservedProperty",
            EntityType::ObservedProperties => "ObservedProperties",
            EntityType::Sensor => "Sensor",
            EntityType::Sensors => "Sensors",
            EntityType::Thing => "Thing",
            EntityType::Things => "Things",
        }
    }

    /// Look up a kind by its canonical name. Matching is case-sensitive.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Whether this kind names an entity set.
    #[must_use]
    pub const fn is_collection(self) -> bool {
        matches!(
            self,
            EntityType::Datastreams
                | EntityType::FeaturesOfInterest
                | EntityType::HistoricalLocations
                | EntityType::Locations
                | EntityType::Observations
                | EntityType::ObservedProperties
                | EntityType::Sensors
                | EntityType::Things
        )
    }

    /// The entity-set kind. Plural kinds map to themselves.
    #[must_use]
    pub const fn plural(self) -> Self {
        match self {
            EntityType::Datastream => EntityType::Datastreams,
            EntityType::FeatureOfInterest => EntityType::FeaturesOfInterest,
            EntityType::HistoricalLocation => EntityType::HistoricalLocations,
            EntityType::Location => EntityType::Locations,
            EntityType::Observation => EntityType::Observations,
            EntityType::ObservedProperty => EntityType::ObservedProperties,
            EntityType::Sensor => EntityType::Sensors,
            EntityType::Thing => EntityType::Things,
            plural => plural,
        }
    }

    /// The single-entity kind. Singular kinds map to themselves.
    #[must_use]
    pub const fn singular(self) -> Self {
        match self {
            EntityType::Datastreams => EntityType::Datastream,
            EntityType::FeaturesOfInterest => EntityType::FeatureOfInterest,
            EntityType::HistoricalLocations => EntityType::HistoricalLocation,
            EntityType::Locations => EntityType::Location,
            EntityType::Observations => EntityType::Observation,
            EntityType::ObservedProperties => EntityType::ObservedProperty,
            EntityType::Sensors => EntityType::Sensor,
            EntityType::Things => EntityType::Thing,
            singular => singular,
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
