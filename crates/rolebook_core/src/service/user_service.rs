//! User management and authentication lookup.
//!
//! # Responsibility
//! - Validate, encode and persist user accounts.
//! - Convert between `User` models and `UserDto` transfer objects.
//! - Build authentication principals with resolved authorities.
//!
//! # Invariants
//! - Passwords reach the store only in encoded form.
//! - Updating with a blank password keeps the stored hash.
//! - A principal holding `ROLE_ADMIN` receives every catalog permission.
//! - The permission catalog is loaded in `init` and only replaced by
//!   `refresh_permissions`; it does not track later store changes.

use super::validation::{test_max_length, test_not_empty};
use super::{ServiceError, ServiceResult, ValidationError, ValidationErrors};
use crate::dao::{Dao, DaoError, DaoErrorKind, UserDao};
use crate::model::permission::{Permission, ADMIN_PERMISSION};
use crate::model::user::{User, UserDto};
use crate::model::EntityId;
use crate::security::{GrantedAuthority, PasswordEncoder, PermissionCatalog, UserPrincipal};
use log::{info, warn};
use std::collections::HashSet;

const MAX_CHARACTERS: usize = 255;
const USERNAME_FIELD: &str = "username";
const USERNAME_LABEL: &str = "localize:user.data.column.username";
const DUPLICATE_KEY: &str = "user.validation.message.duplicateEntry";
const NOT_FOUND_KEY: &str = "user.validation.message.notFound";

/// User use-case service.
pub struct UserService<U, P, E>
where
    U: UserDao,
    P: Dao<Entity = Permission>,
    E: PasswordEncoder,
{
    users: U,
    permissions: P,
    encoder: E,
    catalog: PermissionCatalog,
}

impl<U, P, E> UserService<U, P, E>
where
    U: UserDao,
    P: Dao<Entity = Permission>,
    E: PasswordEncoder,
{
    /// Builds the service and loads the permission catalog.
    pub fn init(users: U, permissions: P, encoder: E) -> ServiceResult<Self> {
        let catalog = load_catalog(&permissions)?;
        Ok(Self {
            users,
            permissions,
            encoder,
            catalog,
        })
    }

    /// Reloads the permission catalog and swaps it in.
    pub fn refresh_permissions(&mut self) -> ServiceResult<()> {
        self.catalog = load_catalog(&self.permissions)?;
        Ok(())
    }

    pub fn catalog(&self) -> &PermissionCatalog {
        &self.catalog
    }

    /// Runs field checks on `user`, appending every violation to `errors`.
    pub fn validate(&self, user: &UserDto, errors: &mut ValidationErrors) {
        test_not_empty(&user.username, USERNAME_FIELD, errors, USERNAME_LABEL);
        test_max_length(
            &user.username,
            USERNAME_FIELD,
            errors,
            MAX_CHARACTERS,
            USERNAME_LABEL,
        );
    }

    /// Lists every user ordered by id.
    pub fn list(&self) -> ServiceResult<Vec<UserDto>> {
        let users = self.users.list()?;
        Ok(users.iter().map(|user| self.create_dto(user)).collect())
    }

    pub fn get(&self, id: EntityId) -> ServiceResult<UserDto> {
        match self.users.get(id) {
            Ok(Some(user)) => Ok(self.create_dto(&user)),
            Ok(None) => Err(not_found(id)),
            Err(err) => Err(self.on_get_failure(id, err)),
        }
    }

    /// Encodes the password and persists a new user.
    ///
    /// # Errors
    /// - `Rejected` when field validation fails.
    /// - `Validation(duplicateEntry)` when the username is taken.
    pub fn create(&self, mut user: UserDto) -> ServiceResult<EntityId> {
        self.check(&user)?;
        user.password = self.encoder.encode(&user.password)?;

        let model = self.create_model(&user);
        let id = self
            .users
            .create(&model)
            .map_err(|err| self.on_create_failure(model.clone(), err))?;
        info!("event=user_create module=service status=ok id={id}");
        Ok(id)
    }

    /// Updates an existing user.
    ///
    /// A blank `password` keeps the stored hash; anything else is encoded.
    pub fn update(&self, mut user: UserDto) -> ServiceResult<()> {
        let id = user
            .id
            .ok_or_else(|| ValidationError::new(NOT_FOUND_KEY, vec!["<none>".to_string()]))?;
        self.check(&user)?;

        let original = self.get(id)?;
        if user.password.is_empty() {
            user.password = original.password;
        } else {
            user.password = self.encoder.encode(&user.password)?;
        }

        let model = self.create_model(&user);
        self.users
            .update(id, model.clone())
            .map_err(|err| self.on_update_failure(model, err))?;
        info!("event=user_update module=service status=ok id={id}");
        Ok(())
    }

    pub fn delete(&self, id: EntityId) -> ServiceResult<()> {
        self.users
            .delete(id)
            .map_err(|err| self.on_get_failure(id, err))?;
        info!("event=user_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Looks up a principal by login name.
    ///
    /// Returns `Ok(None)` when no such user exists.
    pub fn load_user_by_username(&self, username: &str) -> ServiceResult<Option<UserPrincipal>> {
        let Some(user) = self.users.get_by_username(username)? else {
            info!("event=principal_lookup module=service status=absent");
            return Ok(None);
        };

        Ok(Some(UserPrincipal {
            username: username.to_string(),
            authorities: self.get_authorities(&user.permissions),
            password: user.password,
        }))
    }

    /// Returns the principal when `raw_password` matches the stored hash.
    pub fn authenticate(
        &self,
        username: &str,
        raw_password: &str,
    ) -> ServiceResult<Option<UserPrincipal>> {
        let principal = self
            .load_user_by_username(username)?
            .filter(|principal| self.encoder.matches(raw_password, &principal.password));
        let status = if principal.is_some() { "ok" } else { "denied" };
        info!("event=authenticate module=service status={status}");
        Ok(principal)
    }

    /// Maps permissions to authority tokens.
    ///
    /// Holding `ROLE_ADMIN` yields the full catalog in store order; otherwise
    /// the held permissions are returned sorted by name.
    pub fn get_authorities(&self, permissions: &HashSet<Permission>) -> Vec<GrantedAuthority> {
        if permissions.contains(&Permission::new(ADMIN_PERMISSION)) {
            return self
                .catalog
                .all()
                .iter()
                .map(|permission| GrantedAuthority::new(permission.name.as_str()))
                .collect();
        }

        let mut authorities: Vec<_> = permissions
            .iter()
            .map(|permission| GrantedAuthority::new(permission.name.as_str()))
            .collect();
        authorities.sort();
        authorities
    }

    pub fn create_dto(&self, model: &User) -> UserDto {
        let mut permissions: Vec<String> = model
            .permissions
            .iter()
            .map(|permission| permission.name.clone())
            .collect();
        permissions.sort();

        UserDto {
            id: model.id,
            username: model.username.clone(),
            password: model.password.clone(),
            permissions,
        }
    }

    /// Builds a model, resolving permission names through the catalog.
    ///
    /// Names missing from the catalog are dropped.
    pub fn create_model(&self, dto: &UserDto) -> User {
        let permissions = dto
            .permissions
            .iter()
            .filter_map(|name| {
                let resolved = self.catalog.resolve(name).cloned();
                if resolved.is_none() {
                    warn!("event=permission_resolve module=service status=dropped name={name}");
                }
                resolved
            })
            .collect();

        User {
            id: dto.id,
            username: dto.username.clone(),
            password: dto.password.clone(),
            permissions,
        }
    }

    fn check(&self, user: &UserDto) -> ServiceResult<()> {
        let mut errors = ValidationErrors::new();
        self.validate(user, &mut errors);
        if errors.has_errors() {
            return Err(ServiceError::Rejected(errors));
        }
        Ok(())
    }

    fn on_create_failure(&self, mut user: User, cause: DaoError) -> ServiceError {
        user.id = None;
        self.on_update_failure(user, cause)
    }

    fn on_update_failure(&self, user: User, cause: DaoError) -> ServiceError {
        match cause.kind() {
            DaoErrorKind::IntegrityViolation => {
                ValidationError::new(DUPLICATE_KEY, vec![user.username.clone()])
                    .with_target(self.create_dto(&user))
                    .into()
            }
            DaoErrorKind::NotFound => match user.id {
                Some(id) => not_found(id),
                None => cause.into(),
            },
            _ => cause.into(),
        }
    }

    fn on_get_failure(&self, id: EntityId, cause: DaoError) -> ServiceError {
        match cause.kind() {
            DaoErrorKind::NotFound => not_found(id),
            _ => cause.into(),
        }
    }
}

fn not_found(id: EntityId) -> ServiceError {
    ValidationError::new(NOT_FOUND_KEY, vec![id.to_string()])
        .with_target(UserDto::default())
        .into()
}

fn load_catalog<P: Dao<Entity = Permission>>(permissions: &P) -> ServiceResult<PermissionCatalog> {
    let catalog = PermissionCatalog::new(permissions.list()?);
    info!(
        "event=permission_catalog_load module=service status=ok count={}",
        catalog.len()
    );
    Ok(catalog)
}
