//! Routing of namespaced properties onto entities and navigation collections.
//!
//! SensorThings overlays metadata onto the flat JSON object of an entity:
//!
//! | Key | Target |
//! |-----|--------|
//! | `@iot.selfLink` | self-link of the entity |
//! | `Observations@iot.count` | total of the entity's `Observations` collection |
//! | `Observations@iot.nextLink` | next page of the entity's `Observations` collection |
//! | `Datastream@iot.navigationLink` | ignored |
//!
//! Links may be absolute or relative; only strings that are not URI
//! references at all are rejected.
//!
//! Every key that structural decoding did not bind is passed to [`reconcile`].
//! Unknown and malformed keys are logged and dropped; reconciliation never
//! fails, so vendor extensions cannot break decoding of a valid payload.

use crate::entity::{Entity, Navigation, NavigationList};
use crate::entity_type::EntityType;
use crate::link::Link;
use serde_json::Value;

/// Namespace carried by SensorThings annotations.
const IOT_NAMESPACE: &str = "iot.";

/// What a namespaced property applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// The entity (or entity set) the key appears on
    Entity,
    /// The relation named by the prefix
    Navigation(&'a str),
}

/// The facet named by a namespaced property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation<'a> {
    /// `iot.selfLink`
    SelfLink,
    /// `iot.count`
    Count,
    /// `iot.nextLink`
    NextLink,
    /// `iot.navigationLink`
    NavigationLink,
    /// Anything else, verbatim
    Other(&'a str),
}

impl<'a> Annotation<'a> {
    fn parse(suffix: &'a str) -> Self {
        match suffix.strip_prefix(IOT_NAMESPACE).unwrap_or(suffix) {
            "selfLink" => Self::SelfLink,
            "count" => Self::Count,
            "nextLink" => Self::NextLink,
            "navigationLink" => Self::NavigationLink,
            _ => Self::Other(suffix),
        }
    }
}

/// A property name split into target and annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamespacedProperty<'a> {
    /// What the annotation applies to
    pub target: Target<'a>,
    /// Which facet is set
    pub annotation: Annotation<'a>,
}

impl<'a> NamespacedProperty<'a> {
    /// Split `name` on its first `@`.
    ///
    /// An empty prefix or `iot` targets the entity itself. Names without `@`
    /// are only accepted in the bare `iot.<facet>` form.
    #[must_use]
    pub fn parse(name: &'a str) -> Option<Self> {
        let (target, suffix) = match name.split_once('@') {
            Some(("" | "iot", suffix)) => (Target::Entity, suffix),
            Some((prefix, suffix)) => (Target::Navigation(prefix), suffix),
            None if name.starts_with(IOT_NAMESPACE) => (Target::Entity, name),
            None => return None,
        };
        Some(Self {
            target,
            annotation: Annotation::parse(suffix),
        })
    }
}

/// What happened to a property during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The value was stored
    Applied,
    /// Recognized and deliberately not stored (`iot.navigationLink`)
    Ignored,
    /// Dropped because the name did not resolve
    Unknown(UnknownReason),
    /// Dropped because the value was unusable
    Malformed(MalformedValue),
}

impl Outcome {
    /// Whether the property changed the model.
    #[must_use]
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// Why a property name did not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownReason {
    /// No `@` and not an `iot.` annotation
    NotNamespaced,
    /// Annotation not defined for the target
    Annotation,
    /// Prefix is not an entity kind
    EntityType,
    /// The entity declares no such relation
    Navigation,
    /// The relation is to-one and carries no collection facets
    NotACollection,
}

/// Which value could not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedValue {
    /// `iot.selfLink` is not a URI reference string
    SelfLink,
    /// `iot.count` is not a non-negative number
    Count,
    /// `iot.nextLink` is not a URI reference string
    NextLink,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Applied => write!(f, "applied"),
            Outcome::Ignored => write!(f, "ignored"),
            Outcome::Unknown(reason) => write!(f, "dropped (unknown {reason:?})"),
            Outcome::Malformed(value) => write!(f, "dropped (malformed {value:?})"),
        }
    }
}

/// Apply one leftover property of an entity's JSON object.
pub fn reconcile<E: Entity>(entity: &mut E, name: &str, value: &Value) -> Outcome {
    let Some(property) = NamespacedProperty::parse(name) else {
        tracing::info!(entity = %E::KIND, property = name, "Ignoring unknown property");
        return Outcome::Unknown(UnknownReason::NotNamespaced);
    };

    let prefix = match property.target {
        Target::Entity => return apply_to_entity(entity, name, property.annotation, value),
        Target::Navigation(prefix) => prefix,
    };

    let Some(kind) = EntityType::by_name(prefix) else {
        tracing::info!(entity = %E::KIND, property = name, "Unknown entity type in property");
        return Outcome::Unknown(UnknownReason::EntityType);
    };

    match entity.navigation_mut(kind) {
        Some(Navigation::List(list)) => apply_to_list(list, name, property.annotation, value),
        Some(Navigation::Entity) => {
            tracing::info!(
                entity = %E::KIND,
                property = name,
                "Ignoring annotation on to-one relation"
            );
            Outcome::Unknown(UnknownReason::NotACollection)
        }
        None => {
            tracing::info!(
                entity = %E::KIND,
                navigation = %kind,
                property = name,
                "Entity has no such navigation property"
            );
            Outcome::Unknown(UnknownReason::Navigation)
        }
    }
}

/// Apply one leftover property of an entity-set response to the list.
///
/// Only entity-level annotations (`@iot.count`, `@iot.nextLink`) apply.
pub fn reconcile_list(list: &mut dyn NavigationList, name: &str, value: &Value) -> Outcome {
    match NamespacedProperty::parse(name) {
        Some(NamespacedProperty {
            target: Target::Entity,
            annotation,
        }) => apply_to_list(list, name, annotation, value),
        Some(_) => {
            tracing::info!(
                entity_set = %list.entity_type(),
                property = name,
                "Ignoring navigation annotation on entity set"
            );
            Outcome::Unknown(UnknownReason::Navigation)
        }
        None => {
            tracing::info!(
                entity_set = %list.entity_type(),
                property = name,
                "Ignoring unknown property"
            );
            Outcome::Unknown(UnknownReason::NotNamespaced)
        }
    }
}

fn apply_to_entity<E: Entity>(
    entity: &mut E,
    name: &str,
    annotation: Annotation<'_>,
    value: &Value,
) -> Outcome {
    if annotation != Annotation::SelfLink {
        tracing::info!(entity = %E::KIND, property = name, "Ignoring unknown annotation");
        return Outcome::Unknown(UnknownReason::Annotation);
    }

    if let Some(link) = parse_link(value) {
        entity.set_self_link(Some(link));
        Outcome::Applied
    } else {
        tracing::warn!(entity = %E::KIND, selflink = %value, "Invalid selfLink");
        Outcome::Malformed(MalformedValue::SelfLink)
    }
}

fn apply_to_list(
    list: &mut dyn NavigationList,
    name: &str,
    annotation: Annotation<'_>,
    value: &Value,
) -> Outcome {
    match annotation {
        Annotation::Count => {
            if let Some(count) = parse_count(value) {
                list.set_count(count);
                Outcome::Applied
            } else {
                tracing::error!(property = name, %value, "Count should be a non-negative number");
                Outcome::Malformed(MalformedValue::Count)
            }
        }
        Annotation::NextLink => {
            if let Some(link) = parse_link(value) {
                list.set_next_link(link);
                Outcome::Applied
            } else {
                tracing::warn!(property = name, %value, "Invalid nextLink");
                Outcome::Malformed(MalformedValue::NextLink)
            }
        }
        Annotation::NavigationLink => Outcome::Ignored,
        Annotation::SelfLink | Annotation::Other(_) => {
            tracing::info!(
                entity_set = %list.entity_type(),
                property = name,
                "Ignoring unknown annotation"
            );
            Outcome::Unknown(UnknownReason::Annotation)
        }
    }
}

/// 2^64, the first float past the range of `u64`.
const COUNT_LIMIT: f64 = 18_446_744_073_709_551_616.0;

fn parse_link(value: &Value) -> Option<Link> {
    value.as_str().and_then(|s| Link::parse(s).ok())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_count(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| (0.0..COUNT_LIMIT).contains(f))
            .map(|f| f as u64)
    })
}
