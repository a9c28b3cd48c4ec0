//! The contract shared by all SensorThings entities.
//!
//! An entity is identified by its kind and its `@iot.id`; every other field
//! is payload. Equality and hashing only look at the identity, so two
//! copies of the same remote resource compare equal no matter which fields
//! were fetched.

use crate::entity_type::EntityType;
use crate::id::Id;
use crate::link::Link;
use crate::service::SensorThingsService;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Paging facets of a to-many relation, independent of the element type.
pub trait NavigationList {
    /// Kind of the entity set (always plural).
    fn entity_type(&self) -> EntityType;

    /// Server-reported total number of related entities.
    fn count(&self) -> Option<u64>;

    /// Set the server-reported total.
    fn set_count(&mut self, count: u64);

    /// Continuation link for the next page.
    fn next_link(&self) -> Option<&Link>;

    /// Set the continuation link.
    fn set_next_link(&mut self, link: Link);

    /// The service this collection issues requests through.
    fn service(&self) -> Option<&Arc<SensorThingsService>>;

    /// Attach the collection to a service.
    fn set_service(&mut self, service: &Arc<SensorThingsService>);
}

/// Result of looking up a relation on an entity.
pub enum Navigation<'a> {
    /// A to-many relation backed by a navigation collection
    List(&'a mut dyn NavigationList),
    /// A to-one relation
    Entity,
}

/// A SensorThings entity.
pub trait Entity: Serialize + DeserializeOwned + Default + Clone + std::fmt::Debug {
    /// The kind of this entity. Fixed per type.
    const KIND: EntityType;

    /// Relations declared by this kind, singular for to-one and plural for
    /// to-many.
    const NAVIGATION: &'static [EntityType];

    /// The entity's kind.
    fn entity_type(&self) -> EntityType {
        Self::KIND
    }

    /// Server-assigned identifier; `None` for entities not yet created.
    fn id(&self) -> Option<&Id>;

    /// Replace the identifier.
    fn set_id(&mut self, id: Option<Id>);

    /// Canonical resource link, as reported by the server. May be relative.
    fn self_link(&self) -> Option<&Link>;

    /// Replace the self-link. Meant for decoding server responses.
    fn set_self_link(&mut self, link: Option<Link>);

    /// The owning service, if attached.
    fn service(&self) -> Option<&Arc<SensorThingsService>>;

    /// Store the service without touching navigation collections.
    fn replace_service(&mut self, service: Arc<SensorThingsService>);

    /// Every to-many relation of this entity.
    fn navigation_lists_mut(&mut self) -> Vec<&mut dyn NavigationList>;

    /// Look up the relation named by `target`.
    ///
    /// Returns `None` when this kind declares no such relation.
    fn navigation_mut(&mut self, target: EntityType) -> Option<Navigation<'_>> {
        if !Self::NAVIGATION.contains(&target) {
            return None;
        }
        if !target.is_collection() {
            return Some(Navigation::Entity);
        }
        self.navigation_lists_mut()
            .into_iter()
            .find(|list| list.entity_type() == target)
            .map(Navigation::List)
    }

    /// Attach the entity and its navigation collections to a service.
    ///
    /// No-op when the entity already belongs to this service instance. The
    /// cascade stops at the entity's own collections; it never follows
    /// collection elements or to-one relations.
    fn set_service(&mut self, service: &Arc<SensorThingsService>) {
        if self
            .service()
            .is_some_and(|current| Arc::ptr_eq(current, service))
        {
            return;
        }
        self.replace_service(Arc::clone(service));
        for list in self.navigation_lists_mut() {
            list.set_service(service);
        }
    }

    /// Copy holding only the identifier, for linking this entity from
    /// another entity's payload.
    #[must_use]
    fn with_only_id(&self) -> Self {
        let mut copy = Self::default();
        copy.set_id(self.id().cloned());
        copy
    }
}

/// Accessor methods of [`Entity`] over the `id`, `self_link` and `service`
/// fields every entity struct carries.
macro_rules! entity_accessors {
    () => {
        fn id(&self) -> Option<&$crate::id::Id> {
            self.id.as_ref()
        }

        fn set_id(&mut self, id: Option<$crate::id::Id>) {
            self.id = id;
        }

        fn self_link(&self) -> Option<&$crate::link::Link> {
            self.self_link.as_ref()
        }

        fn set_self_link(&mut self, link: Option<$crate::link::Link>) {
            self.self_link = link;
        }

        fn service(&self) -> Option<&std::sync::Arc<$crate::service::SensorThingsService>> {
            self.service.as_ref()
        }

        fn replace_service(
            &mut self,
            service: std::sync::Arc<$crate::service::SensorThingsService>,
        ) {
            self.service = Some(service);
        }
    };
}

/// Identity-based `PartialEq`, `Eq`, `Hash` and `Display` for an entity.
macro_rules! entity_identity {
    ($ty:ty) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
            }
        }

        impl Eq for $ty {}

        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                std::hash::Hash::hash(&<$ty as $crate::entity::Entity>::KIND, state);
                std::hash::Hash::hash(&self.id, state);
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let kind = <$ty as $crate::entity::Entity>::KIND;
                match &self.id {
                    Some(id) => write!(f, "{kind}({id})"),
                    None => write!(f, "{kind}(no id)"),
                }
            }
        }
    };
}

pub(crate) use entity_accessors;
pub(crate) use entity_identity;
