//! Person use-case service.

use super::{on_missing, ServiceResult, ValidationError};
use crate::dao::Dao;
use crate::model::person::Person;
use crate::model::EntityId;
use log::info;

const NOT_FOUND_KEY: &str = "person.validation.message.notFound";

/// CRUD entry points for persons.
pub struct PersonService<D: Dao<Entity = Person>> {
    dao: D,
}

impl<D: Dao<Entity = Person>> PersonService<D> {
    pub fn new(dao: D) -> Self {
        Self { dao }
    }

    pub fn list(&self) -> ServiceResult<Vec<Person>> {
        Ok(self.dao.list()?)
    }

    pub fn get(&self, id: EntityId) -> ServiceResult<Person> {
        match self.dao.get(id) {
            Ok(Some(person)) => Ok(person),
            Ok(None) => Err(ValidationError::new(NOT_FOUND_KEY, vec![id.to_string()]).into()),
            Err(err) => Err(on_missing(err, NOT_FOUND_KEY, id)),
        }
    }

    /// Persists `person` and returns its store-assigned id.
    pub fn create(&self, person: &Person) -> ServiceResult<EntityId> {
        let id = self.dao.create(person)?;
        info!("event=person_create module=service status=ok id={id}");
        Ok(id)
    }

    pub fn update(&self, id: EntityId, person: Person) -> ServiceResult<()> {
        self.dao
            .update(id, person)
            .map_err(|err| on_missing(err, NOT_FOUND_KEY, id))?;
        info!("event=person_update module=service status=ok id={id}");
        Ok(())
    }

    pub fn delete(&self, id: EntityId) -> ServiceResult<()> {
        self.dao
            .delete(id)
            .map_err(|err| on_missing(err, NOT_FOUND_KEY, id))?;
        info!("event=person_delete module=service status=ok id={id}");
        Ok(())
    }
}
