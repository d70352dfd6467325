//! Permission catalog maintenance.
//!
//! Changes made here are not seen by an already-built
//! [`PermissionCatalog`](crate::security::PermissionCatalog) until its owner
//! refreshes it.

use super::validation::{test_max_length, test_not_empty};
use super::{on_missing, ServiceError, ServiceResult, ValidationError, ValidationErrors};
use crate::dao::{Dao, DaoErrorKind};
use crate::model::permission::Permission;
use crate::model::EntityId;
use log::info;

const NOT_FOUND_KEY: &str = "permission.validation.message.notFound";
const DUPLICATE_KEY: &str = "permission.validation.message.duplicateEntry";
const MAX_CHARACTERS: usize = 255;

pub struct PermissionService<D: Dao<Entity = Permission>> {
    dao: D,
}

impl<D: Dao<Entity = Permission>> PermissionService<D> {
    pub fn new(dao: D) -> Self {
        Self { dao }
    }

    pub fn list(&self) -> ServiceResult<Vec<Permission>> {
        Ok(self.dao.list()?)
    }

    pub fn create(&self, permission: &Permission) -> ServiceResult<EntityId> {
        let mut errors = ValidationErrors::new();
        let label = "localize:permission.data.column.name";
        test_not_empty(&permission.name, "name", &mut errors, label);
        test_max_length(&permission.name, "name", &mut errors, MAX_CHARACTERS, label);
        if errors.has_errors() {
            return Err(ServiceError::Rejected(errors));
        }

        let id = self.dao.create(permission).map_err(|err| match err.kind() {
            DaoErrorKind::IntegrityViolation => {
                ValidationError::new(DUPLICATE_KEY, vec![permission.name.clone()]).into()
            }
            _ => ServiceError::from(err),
        })?;
        info!("event=permission_create module=service status=ok id={id}");
        Ok(id)
    }

    pub fn delete(&self, id: EntityId) -> ServiceResult<()> {
        self.dao
            .delete(id)
            .map_err(|err| on_missing(err, NOT_FOUND_KEY, id))?;
        info!("event=permission_delete module=service status=ok id={id}");
        Ok(())
    }
}
