//! Decoding of entity and entity-set payloads.
//!
//! Decoding runs in two passes. The structural pass binds declared fields
//! through the entity's `serde` derive; every key it leaves over is then
//! handed to the reconciler. Only the structural pass can fail.

use crate::entity::Entity;
use crate::entity_type::EntityType;
use crate::list::EntityList;
use crate::reconcile::{reconcile, reconcile_list, Outcome};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Property name of the element array in entity-set responses.
const PAGE_VALUE: &str = "value";

/// The outcome of one leftover property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyOutcome {
    /// Property name as found in the payload
    pub name: String,
    /// What reconciliation did with it
    pub outcome: Outcome,
}

/// A decoded entity (or entity set) with the fate of each leftover property.
#[derive(Debug, Clone)]
pub struct Decoded<T> {
    /// The decoded value
    pub entity: T,
    /// One outcome per leftover property
    pub outcomes: Vec<PropertyOutcome>,
}

impl<T> Decoded<T> {
    /// Outcome for the named property, if it was left over.
    #[must_use]
    pub fn outcome(&self, name: &str) -> Option<Outcome> {
        self.outcomes
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.outcome)
    }

    /// Properties that were not stored.
    pub fn dropped(&self) -> impl Iterator<Item = &PropertyOutcome> {
        self.outcomes
            .iter()
            .filter(|o| !matches!(o.outcome, Outcome::Applied | Outcome::Ignored))
    }
}

#[derive(Deserialize)]
struct Structural<E> {
    #[serde(flatten)]
    entity: E,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

/// Decode one entity from a JSON object.
///
/// # Errors
///
/// Returns error if `value` is not an object or a declared field has the
/// wrong shape. Namespaced properties never cause an error.
pub fn decode<E: Entity>(value: Value) -> Result<Decoded<E>, DecodeError> {
    if !value.is_object() {
        return Err(DecodeError::NotAnObject { kind: E::KIND });
    }

    let Structural { mut entity, rest } =
        serde_json::from_value::<Structural<E>>(value).map_err(|e| DecodeError::Structure {
            kind: E::KIND,
            message: e.to_string(),
        })?;

    let mut outcomes = Vec::with_capacity(rest.len());
    for (name, value) in &rest {
        let outcome = reconcile(&mut entity, name, value);
        outcomes.push(PropertyOutcome {
            name: name.clone(),
            outcome,
        });
    }

    tracing::debug!(
        entity = %E::KIND,
        id = ?entity.id(),
        leftover = outcomes.len(),
        "Decoded entity"
    );

    Ok(Decoded { entity, outcomes })
}

/// Parse and decode one entity from JSON text.
///
/// # Errors
///
/// Returns error if the text is not JSON or [`decode`] fails.
pub fn from_str<E: Entity>(json: &str) -> Result<Decoded<E>, DecodeError> {
    let value: Value = serde_json::from_str(json).map_err(|e| DecodeError::Json(e.to_string()))?;
    decode(value)
}

/// Decode an entity-set response (`{"@iot.count": .., "value": [..]}`).
///
/// Elements are decoded like single entities. `@iot.count` and
/// `@iot.nextLink` on the response apply to the returned list.
///
/// # Errors
///
/// Returns error if `value` is not an object, has no `value` array, or an
/// element fails to decode.
pub fn decode_page<E: Entity>(value: Value) -> Result<Decoded<EntityList<E>>, DecodeError> {
    let kind = E::KIND.plural();
    let Value::Object(mut object) = value else {
        return Err(DecodeError::NotAnObject { kind });
    };
    let elements = object
        .remove(PAGE_VALUE)
        .ok_or(DecodeError::MissingValue { kind })?;

    let mut list: EntityList<E> =
        serde_json::from_value(elements).map_err(|e| DecodeError::Structure {
            kind,
            message: e.to_string(),
        })?;

    let mut outcomes = Vec::with_capacity(object.len());
    for (name, value) in &object {
        let outcome = reconcile_list(&mut list, name, value);
        outcomes.push(PropertyOutcome {
            name: name.clone(),
            outcome,
        });
    }

    tracing::debug!(
        entity_set = %kind,
        len = list.len(),
        count = ?list.count(),
        "Decoded entity set"
    );

    Ok(Decoded {
        entity: list,
        outcomes,
    })
}

/// Parse and decode an entity-set response from JSON text.
///
/// # Errors
///
/// Returns error if the text is not JSON or [`decode_page`] fails.
pub fn page_from_str<E: Entity>(json: &str) -> Result<Decoded<EntityList<E>>, DecodeError> {
    let value: Value = serde_json::from_str(json).map_err(|e| DecodeError::Json(e.to_string()))?;
    decode_page(value)
}

/// `deserialize_with` helper for inline to-one relations, decoding them
/// through the reconciler like top-level entities.
pub(crate) fn nested<'de, D, E>(deserializer: D) -> Result<Option<Box<E>>, D::Error>
where
    D: Deserializer<'de>,
    E: Entity,
{
    Option::<Value>::deserialize(deserializer)?
        .map(|value| decode::<E>(value).map(|decoded| Box::new(decoded.entity)))
        .transpose()
        .map_err(serde::de::Error::custom)
}

/// Errors that can occur decoding payloads.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DecodeError {
    /// Input is not valid JSON
    #[error("invalid JSON: {0}")]
    Json(String),
    /// Payload is not a JSON object
    #[error("{kind} payload must be a JSON object")]
    NotAnObject {
        /// Kind being decoded
        kind: EntityType,
    },
    /// Entity-set payload has no element array
    #[error("{kind} response has no \"value\" array")]
    MissingValue {
        /// Entity set being decoded
        kind: EntityType,
    },
    /// A declared field has the wrong shape
    #[error("invalid {kind} payload: {message}")]
    Structure {
        /// Kind being decoded
        kind: EntityType,
        /// Underlying serde error
        message: String,
    },
}
