//! Role use-case service.
//!
//! # Invariants
//! - Role names are non-blank and at most 255 characters before persistence.

use super::validation::{test_max_length, test_not_empty};
use super::{on_missing, ServiceError, ServiceResult, ValidationError, ValidationErrors};
use crate::dao::Dao;
use crate::model::role::Role;
use crate::model::EntityId;
use log::info;

const NOT_FOUND_KEY: &str = "role.validation.message.notFound";
const MAX_CHARACTERS: usize = 255;

/// CRUD entry points for roles.
pub struct RoleService<D: Dao<Entity = Role>> {
    dao: D,
}

impl<D: Dao<Entity = Role>> RoleService<D> {
    pub fn new(dao: D) -> Self {
        Self { dao }
    }

    pub fn validate(&self, role: &Role, errors: &mut ValidationErrors) {
        let label = "localize:role.data.column.name";
        test_not_empty(&role.name, "name", errors, label);
        test_max_length(&role.name, "name", errors, MAX_CHARACTERS, label);
    }

    /// Lists roles ordered by id.
    pub fn list(&self) -> ServiceResult<Vec<Role>> {
        Ok(self.dao.list()?)
    }

    pub fn get(&self, id: EntityId) -> ServiceResult<Role> {
        match self.dao.get(id) {
            Ok(Some(role)) => Ok(role),
            Ok(None) => Err(ValidationError::new(NOT_FOUND_KEY, vec![id.to_string()]).into()),
            Err(err) => Err(on_missing(err, NOT_FOUND_KEY, id)),
        }
    }

    pub fn create(&self, role: &Role) -> ServiceResult<EntityId> {
        self.check(role)?;
        let id = self.dao.create(role)?;
        info!("event=role_create module=service status=ok id={id}");
        Ok(id)
    }

    pub fn update(&self, id: EntityId, role: Role) -> ServiceResult<()> {
        self.check(&role)?;
        self.dao
            .update(id, role)
            .map_err(|err| on_missing(err, NOT_FOUND_KEY, id))?;
        info!("event=role_update module=service status=ok id={id}");
        Ok(())
    }

    /// Deletes role `id`; a missing role is reported as not found.
    pub fn delete(&self, id: EntityId) -> ServiceResult<()> {
        self.dao
            .delete(id)
            .map_err(|err| on_missing(err, NOT_FOUND_KEY, id))?;
        info!("event=role_delete module=service status=ok id={id}");
        Ok(())
    }

    fn check(&self, role: &Role) -> ServiceResult<()> {
        let mut errors = ValidationErrors::new();
        self.validate(role, &mut errors);
        if errors.has_errors() {
            return Err(ServiceError::Rejected(errors));
        }
        Ok(())
    }
}
