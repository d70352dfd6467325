//! Application wiring for the console front end.
//!
//! # Responsibility
//! - Construct every service over one `SessionFactory`.
//! - Assemble the nested operator menus.
//!
//! # Invariants
//! - The user service permission catalog is loaded here, once per process.

use crate::dao::{SqlitePermissionDao, SqlitePersonDao, SqliteRoleDao, SqliteUserDao};
use crate::db::SessionFactory;
use crate::security::Argon2PasswordEncoder;
use crate::service::{
    PermissionService, PersonService, RoleService, ServiceResult, SqlitePermissionService,
    SqlitePersonService, SqliteRoleService, SqliteUserService, UserService,
};
use crate::ui::person::{
    CreatePersonUiHandler, DeletePersonUiHandler, ListPersonsUiHandler, UpdatePersonUiHandler,
};
use crate::ui::role::{
    CreateRoleUiHandler, DeleteRoleUiHandler, ListRolesUiHandler, UpdateRoleUiHandler,
};
use crate::ui::user::{
    CreateUserUiHandler, DeleteUserUiHandler, ListPermissionsUiHandler, ListUsersUiHandler,
    SignInUiHandler, UpdateUserUiHandler,
};
use crate::ui::{ExitUiHandler, MenuUiHandler};

/// Every service the console needs, bound to one store.
pub struct AdminServices<'s> {
    pub persons: SqlitePersonService<'s>,
    pub roles: SqliteRoleService<'s>,
    pub permissions: SqlitePermissionService<'s>,
    pub users: SqliteUserService<'s>,
}

impl<'s> AdminServices<'s> {
    pub fn init(sessions: &'s SessionFactory) -> ServiceResult<Self> {
        Ok(Self {
            persons: PersonService::new(SqlitePersonDao::new(sessions)),
            roles: RoleService::new(SqliteRoleDao::new(sessions)),
            permissions: PermissionService::new(SqlitePermissionDao::new(sessions)),
            users: UserService::init(
                SqliteUserDao::new(sessions),
                SqlitePermissionDao::new(sessions),
                Argon2PasswordEncoder::new(),
            )?,
        })
    }
}

/// Builds the top-level menu with one sub-menu per record type.
pub fn build_main_menu<'a>(services: &'a AdminServices<'a>) -> MenuUiHandler<'a> {
    let persons = MenuUiHandler::new("Manage persons")
        .with(ListPersonsUiHandler::new("List persons", &services.persons))
        .with(CreatePersonUiHandler::new("Create person", &services.persons))
        .with(UpdatePersonUiHandler::new("Update person", &services.persons))
        .with(DeletePersonUiHandler::new("Delete person", &services.persons))
        .with(ExitUiHandler::new("Back"));

    let roles = MenuUiHandler::new("Manage roles")
        .with(ListRolesUiHandler::new("List roles", &services.roles))
        .with(CreateRoleUiHandler::new("Create role", &services.roles))
        .with(UpdateRoleUiHandler::new("Update role", &services.roles))
        .with(DeleteRoleUiHandler::new("Delete role", &services.roles))
        .with(ExitUiHandler::new("Back"));

    let users = MenuUiHandler::new("Manage users")
        .with(ListUsersUiHandler::new("List users", &services.users))
        .with(CreateUserUiHandler::new("Create user", &services.users))
        .with(UpdateUserUiHandler::new("Update user", &services.users))
        .with(DeleteUserUiHandler::new("Delete user", &services.users))
        .with(ListPermissionsUiHandler::new(
            "List permissions",
            &services.permissions,
        ))
        .with(ExitUiHandler::new("Back"));

    MenuUiHandler::new("Main menu")
        .with(persons)
        .with(roles)
        .with(users)
        .with(SignInUiHandler::new("Sign in", &services.users))
        .with(ExitUiHandler::new("Exit"))
}
