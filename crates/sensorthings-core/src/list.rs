//! Navigation collections.

use crate::codec;
use crate::entity::{Entity, NavigationList};
use crate::entity_type::EntityType;
use crate::link::Link;
use crate::service::SensorThingsService;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

/// An ordered, possibly partial list of related entities.
///
/// Besides the locally present elements it carries the total reported by
/// the server (`@iot.count`) and the link to the next page
/// (`@iot.nextLink`). In JSON it is a plain array of its elements.
#[derive(Debug, Clone)]
pub struct EntityList<E> {
    entities: Vec<E>,
    count: Option<u64>,
    next_link: Option<Link>,
    service: Option<Arc<SensorThingsService>>,
}

impl<E> Default for EntityList<E> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            count: None,
            next_link: None,
            service: None,
        }
    }
}

impl<E: Entity> EntityList<E> {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Kind of the entity set held by this list.
    #[must_use]
    pub fn entity_type(&self) -> EntityType {
        E::KIND.plural()
    }

    /// Number of locally present elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether no element is locally present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// The locally present elements.
    #[must_use]
    pub fn entities(&self) -> &[E] {
        &self.entities
    }

    /// Iterate over the locally present elements.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.entities.iter()
    }

    /// Append an element.
    pub fn push(&mut self, entity: E) {
        self.entities.push(entity);
    }

    /// Replace the elements, keeping count, next link and service.
    pub fn replace_all(&mut self, entities: impl IntoIterator<Item = E>) {
        self.entities = entities.into_iter().collect();
    }

    /// Server-reported total, independent of [`len`](Self::len).
    #[must_use]
    pub fn count(&self) -> Option<u64> {
        self.count
    }

    /// Set the server-reported total.
    pub fn set_count(&mut self, count: u64) {
        self.count = Some(count);
    }

    /// Link to the next page of elements.
    #[must_use]
    pub fn next_link(&self) -> Option<&Link> {
        self.next_link.as_ref()
    }

    /// Set the link to the next page.
    pub fn set_next_link(&mut self, link: Link) {
        self.next_link = Some(link);
    }

    /// The service this list belongs to.
    #[must_use]
    pub fn service(&self) -> Option<&Arc<SensorThingsService>> {
        self.service.as_ref()
    }

    /// Attach the list to a service. Elements are left untouched.
    pub fn set_service(&mut self, service: &Arc<SensorThingsService>) {
        self.service = Some(Arc::clone(service));
    }

    /// Take the elements out of the list.
    #[must_use]
    pub fn into_vec(self) -> Vec<E> {
        self.entities
    }

    /// Iterate mutably over the locally present elements.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, E> {
        self.entities.iter_mut()
    }
}

impl<E: Entity> NavigationList for EntityList<E> {
    fn entity_type(&self) -> EntityType {
        EntityList::entity_type(self)
    }

    fn count(&self) -> Option<u64> {
        self.count
    }

    fn set_count(&mut self, count: u64) {
        EntityList::set_count(self, count);
    }

    fn next_link(&self) -> Option<&Link> {
        self.next_link.as_ref()
    }

    fn set_next_link(&mut self, link: Link) {
        EntityList::set_next_link(self, link);
    }

    fn service(&self) -> Option<&Arc<SensorThingsService>> {
        self.service.as_ref()
    }

    fn set_service(&mut self, service: &Arc<SensorThingsService>) {
        EntityList::set_service(self, service);
    }
}

impl<E> FromIterator<E> for EntityList<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            entities: iter.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl<'a, E> IntoIterator for &'a EntityList<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

impl<E: Serialize> Serialize for EntityList<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.entities)
    }
}

impl<'de, E: Entity> Deserialize<'de> for EntityList<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<serde_json::Value>::deserialize(deserializer)?;
        values
            .into_iter()
            .map(|value| codec::decode::<E>(value).map(|decoded| decoded.entity))
            .collect::<Result<Self, _>>()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::Id;
    use crate::model::Observation;

    fn observation(id: i64) -> Observation {
        let mut observation = Observation::default();
        observation.set_id(Some(Id::Long(id)));
        observation
    }

    #[test]
    fn list_kind_is_plural() {
        let list = EntityList::<Observation>::new();
        assert_eq!(list.entity_type(), EntityType::Observations);
    }

    #[test]
    fn count_is_independent_of_len() {
        let mut list: EntityList<Observation> = [observation(1), observation(2)]
            .into_iter()
            .collect();
        list.set_count(250);

        assert_eq!(list.len(), 2);
        assert_eq!(list.count(), Some(250));
    }

    #[test]
    fn replace_all_keeps_paging_facets() {
        let mut list = EntityList::<Observation>::new();
        list.set_count(3);
        list.set_next_link(Link::parse("Observations?$skip=3").unwrap());

        list.replace_all(vec![observation(9)]);

        assert_eq!(list.len(), 1);
        assert_eq!(list.count(), Some(3));
        assert_eq!(
            list.next_link().map(Link::as_str),
            Some("Observations?$skip=3")
        );
    }

    #[test]
    fn serializes_as_array() {
        let list: EntityList<Observation> = [observation(1)].into_iter().collect();
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json, serde_json::json!([{"@iot.id": 1}]));
    }

    #[test]
    fn deserializes_elements_with_annotations() {
        let list: EntityList<Observation> = serde_json::from_value(serde_json::json!([
            {"@iot.id": 1, "@iot.selfLink": "http://x/Observations(1)"},
            {"@iot.id": 2}
        ]))
        .unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(
            list.entities()[0].self_link().map(Link::as_str),
            Some("http://x/Observations(1)")
        );
        assert!(list.count().is_none());
    }
}
