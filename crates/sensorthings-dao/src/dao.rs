//! Data-access objects.
//!
//! A [`Dao`] knows where the entities of one kind live on a service and how
//! to turn response bodies into entities attached to that service. It does
//! not perform requests; callers fetch the URLs with the HTTP client of
//! their choice and hand the bodies back for decoding.

use crate::encoding::entity_path;
use sensorthings_core::codec::{self, DecodeError, Decoded};
use sensorthings_core::{Entity, EntityList, EntityType, Id, SensorThingsService};
use std::marker::PhantomData;
use std::sync::Arc;
use url::Url;

/// Data-access object for entities of kind `E`.
#[derive(Debug)]
pub struct Dao<E> {
    service: Arc<SensorThingsService>,
    parent: Option<String>,
    entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Dao<E> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            parent: self.parent.clone(),
            entity: PhantomData,
        }
    }
}

impl<E: Entity> Dao<E> {
    /// Create a DAO addressing the top-level entity set of `E`.
    #[must_use]
    pub fn new(service: Arc<SensorThingsService>) -> Self {
        Self {
            service,
            parent: None,
            entity: PhantomData,
        }
    }

    /// Address the entities of `E` related to `parent` instead, e.g.
    /// `Things(1)/Datastreams`.
    ///
    /// # Errors
    ///
    /// Returns error if `parent` has no id or declares no to-many relation
    /// to `E`.
    pub fn with_parent<P: Entity>(mut self, parent: &P) -> Result<Self, DaoError> {
        let target = E::KIND.plural();
        if !P::NAVIGATION.contains(&target) {
            return Err(DaoError::NoRelation {
                parent: P::KIND,
                target,
            });
        }
        let id = parent
            .id()
            .ok_or(DaoError::MissingParentId { kind: P::KIND })?;

        self.parent = Some(entity_path(P::KIND, id));
        Ok(self)
    }

    /// The service this DAO addresses.
    #[must_use]
    pub fn service(&self) -> &Arc<SensorThingsService> {
        &self.service
    }

    /// Kind of the entity set addressed.
    #[must_use]
    pub fn entity_type(&self) -> EntityType {
        E::KIND.plural()
    }

    /// URL of the entity set, parent-relative if a parent is set.
    ///
    /// # Errors
    ///
    /// Returns error if the URL cannot be built.
    pub fn collection_url(&self) -> Result<Url, DaoError> {
        let set = E::KIND.plural().name();
        let path = match &self.parent {
            Some(parent) => format!("{parent}/{set}"),
            None => set.to_string(),
        };
        let url = self.resolve(&path)?;
        tracing::debug!(entity_set = set, %url, "Built collection URL");
        Ok(url)
    }

    /// Canonical URL of one entity. Always top-level, even with a parent.
    ///
    /// # Errors
    ///
    /// Returns error if the URL cannot be built.
    pub fn entity_url(&self, id: &Id) -> Result<Url, DaoError> {
        let url = self.resolve(&entity_path(E::KIND, id))?;
        tracing::debug!(entity = %E::KIND, %id, %url, "Built entity URL");
        Ok(url)
    }

    /// Decode a single-entity response body and attach it to the service.
    ///
    /// # Errors
    ///
    /// Returns error if the body is not a valid entity of kind `E`.
    pub fn decode_entity(&self, body: &str) -> Result<Decoded<E>, DaoError> {
        let mut decoded = codec::from_str::<E>(body)?;
        decoded.entity.set_service(&self.service);
        Self::log_dropped(&decoded);
        Ok(decoded)
    }

    /// Decode an entity-set response body. The list and every element are
    /// attached to the service.
    ///
    /// # Errors
    ///
    /// Returns error if the body is not a valid entity-set response.
    pub fn decode_page(&self, body: &str) -> Result<Decoded<EntityList<E>>, DaoError> {
        let mut decoded = codec::page_from_str::<E>(body)?;
        decoded.entity.set_service(&self.service);
        for entity in decoded.entity.iter_mut() {
            entity.set_service(&self.service);
        }
        Self::log_dropped(&decoded);
        Ok(decoded)
    }

    fn resolve(&self, path: &str) -> Result<Url, DaoError> {
        self.service
            .resolve(path)
            .map_err(|e| DaoError::Url(format!("{path}: {e}")))
    }

    fn log_dropped<T>(decoded: &Decoded<T>) {
        let dropped = decoded.dropped().count();
        if dropped > 0 {
            tracing::debug!(entity = %E::KIND, dropped, "Response carried unusable properties");
        }
    }
}

/// Access to DAOs from an entity's own service.
pub trait EntityDaoExt: Entity {
    /// DAO for this entity's kind.
    ///
    /// # Errors
    ///
    /// Returns error if the entity is not attached to a service.
    fn dao(&self) -> Result<Dao<Self>, DaoError>;

    /// DAO for the entities of kind `T` related to this entity.
    ///
    /// # Errors
    ///
    /// Returns error if the entity is not attached to a service, has no id,
    /// or declares no relation to `T`.
    fn navigation_dao<T: Entity>(&self) -> Result<Dao<T>, DaoError>;
}

impl<E: Entity> EntityDaoExt for E {
    fn dao(&self) -> Result<Dao<Self>, DaoError> {
        let service = self
            .service()
            .ok_or(DaoError::MissingService { kind: E::KIND })?;
        Ok(Dao::new(Arc::clone(service)))
    }

    fn navigation_dao<T: Entity>(&self) -> Result<Dao<T>, DaoError> {
        let service = self
            .service()
            .ok_or(DaoError::MissingService { kind: E::KIND })?;
        Dao::new(Arc::clone(service)).with_parent(self)
    }
}

/// Errors that can occur with data-access objects.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DaoError {
    /// Entity is not attached to a service
    #[error("{kind} is not attached to a service")]
    MissingService {
        /// Kind of the entity
        kind: EntityType,
    },
    /// Parent entity has no id
    #[error("{kind} has no id and cannot be used as a parent")]
    MissingParentId {
        /// Kind of the parent
        kind: EntityType,
    },
    /// Parent declares no relation to the target
    #[error("{parent} has no {target} relation")]
    NoRelation {
        /// Kind of the parent
        parent: EntityType,
        /// Entity set requested
        target: EntityType,
    },
    /// URL could not be built
    #[error("invalid URL: {0}")]
    Url(String),
    /// Response body could not be decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensorthings_core::{Datastream, Observation, Sensor, Thing};

    fn service() -> Arc<SensorThingsService> {
        Arc::new(SensorThingsService::parse("http://localhost:8080/FROST-Server/v1.1").unwrap())
    }

    fn stored<E: Entity>(id: i64) -> E {
        let mut entity = E::default();
        entity.set_id(Some(Id::Long(id)));
        entity
    }

    #[test]
    fn collection_and_entity_urls() {
        let dao = Dao::<Thing>::new(service());
        assert_eq!(
            dao.collection_url().unwrap().as_str(),
            "http://localhost:8080/FROST-Server/v1.1/Things"
        );
        assert_eq!(
            dao.entity_url(&Id::from("a b")).unwrap().as_str(),
            "http://localhost:8080/FROST-Server/v1.1/Things('a%20b')"
        );
    }

    #[test]
    fn parent_relative_collection() {
        let thing: Thing = stored(1);
        let dao = Dao::<Datastream>::new(service())
            .with_parent(&thing)
            .unwrap();

        assert_eq!(
            dao.collection_url().unwrap().as_str(),
            "http://localhost:8080/FROST-Server/v1.1/Things(1)/Datastreams"
        );
        assert_eq!(
            dao.entity_url(&Id::Long(5)).unwrap().as_str(),
            "http://localhost:8080/FROST-Server/v1.1/Datastreams(5)"
        );
    }

    #[test]
    fn parent_must_be_stored_and_related() {
        let err = Dao::<Datastream>::new(service())
            .with_parent(&Thing::default())
            .unwrap_err();
        assert!(matches!(
            err,
            DaoError::MissingParentId {
                kind: EntityType::Thing
            }
        ));

        let sensor: Sensor = stored(2);
        let err = Dao::<Observation>::new(service())
            .with_parent(&sensor)
            .unwrap_err();
        assert!(matches!(
            err,
            DaoError::NoRelation {
                parent: EntityType::Sensor,
                target: EntityType::Observations
            }
        ));
    }

    #[test]
    fn decoded_entity_is_attached() {
        let service = service();
        let dao = Dao::<Datastream>::new(Arc::clone(&service));
        let decoded = dao
            .decode_entity(r#"{"@iot.id": 3, "Observations@iot.count": 12}"#)
            .unwrap();

        let datastream = decoded.entity;
        assert!(Arc::ptr_eq(datastream.service().unwrap(), &service));
        assert!(Arc::ptr_eq(datastream.observations.service().unwrap(), &service));
        assert_eq!(datastream.observations.count(), Some(12));
    }

    #[test]
    fn decoded_page_elements_are_attached() {
        let service = service();
        let dao = Dao::<Observation>::new(Arc::clone(&service));
        let page = dao
            .decode_page(r#"{"@iot.count": 2, "value": [{"@iot.id": 1}, {"@iot.id": 2}]}"#)
            .unwrap()
            .entity;

        assert!(Arc::ptr_eq(page.service().unwrap(), &service));
        assert!(page
            .iter()
            .all(|o| Arc::ptr_eq(o.service().unwrap(), &service)));
    }

    #[test]
    fn decode_errors_propagate() {
        let dao = Dao::<Thing>::new(service());
        assert!(matches!(
            dao.decode_entity("[]"),
            Err(DaoError::Decode(DecodeError::NotAnObject { .. }))
        ));
    }

    #[test]
    fn entity_dao_requires_service() {
        let thing: Thing = stored(1);
        assert!(matches!(
            thing.dao(),
            Err(DaoError::MissingService {
                kind: EntityType::Thing
            })
        ));
        assert!(matches!(
            thing.navigation_dao::<Datastream>(),
            Err(DaoError::MissingService { .. })
        ));
    }

    #[test]
    fn navigation_dao_from_attached_entity() {
        let service = service();
        let mut thing: Thing = stored(7);
        thing.set_service(&service);

        let dao = thing.navigation_dao::<Datastream>().unwrap();
        assert!(Arc::ptr_eq(dao.service(), &service));
        assert_eq!(
            dao.collection_url().unwrap().as_str(),
            "http://localhost:8080/FROST-Server/v1.1/Things(7)/Datastreams"
        );
        assert_eq!(
            thing.dao().unwrap().collection_url().unwrap().as_str(),
            "http://localhost:8080/FROST-Server/v1.1/Things"
        );
    }
}
