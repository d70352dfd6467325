//! Use-case services over the data-access layer.
//!
//! # Responsibility
//! - Validate input and assemble transfer objects.
//! - Translate data-access failures into operator-facing validation errors.
//! - Keep UI handlers decoupled from storage details.
//!
//! # Invariants
//! - Only `NotFound` and `IntegrityViolation` kinds are translated; every
//!   other failure passes through as `ServiceError::Dao`.

pub mod errors;
pub mod messages;
pub mod permission_service;
pub mod person_service;
pub mod role_service;
pub mod user_service;
pub mod validation;

pub use errors::{ServiceError, ServiceResult, ValidationError};
pub use permission_service::PermissionService;
pub use person_service::PersonService;
pub use role_service::RoleService;
pub use user_service::UserService;
pub use validation::{FieldError, ValidationErrors};

use crate::dao::{
    DaoError, DaoErrorKind, SqlitePermissionDao, SqlitePersonDao, SqliteRoleDao, SqliteUserDao,
};
use crate::model::EntityId;
use crate::security::Argon2PasswordEncoder;

pub type SqlitePersonService<'s> = PersonService<SqlitePersonDao<'s>>;
pub type SqliteRoleService<'s> = RoleService<SqliteRoleDao<'s>>;
pub type SqlitePermissionService<'s> = PermissionService<SqlitePermissionDao<'s>>;
pub type SqliteUserService<'s> =
    UserService<SqliteUserDao<'s>, SqlitePermissionDao<'s>, Argon2PasswordEncoder>;

/// Maps a missing-row failure to `not_found_key`; passes anything else on.
pub(crate) fn on_missing(err: DaoError, not_found_key: &'static str, id: EntityId) -> ServiceError {
    match err.kind() {
        DaoErrorKind::NotFound => {
            ValidationError::new(not_found_key, vec![id.to_string()]).into()
        }
        _ => err.into(),
    }
}
