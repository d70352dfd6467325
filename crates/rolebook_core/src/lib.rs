//! Core of the Rolebook administration console.
//! Owns the person/role/user/permission records, their persistence, and the
//! rules applied before anything reaches the store.

pub mod app;
pub mod dao;
pub mod db;
pub mod logging;
pub mod model;
pub mod security;
pub mod service;
pub mod ui;

pub use app::{build_main_menu, AdminServices};
pub use dao::{
    execute_transaction, Dao, DaoError, DaoErrorKind, DaoResult, SqlitePermissionDao,
    SqlitePersonDao, SqliteRoleDao, SqliteUserDao, UserDao,
};
pub use db::{open_store, open_store_in_memory, DbError, SessionFactory};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::name::Name;
pub use model::permission::{Permission, ADMIN_PERMISSION};
pub use model::person::Person;
pub use model::role::Role;
pub use model::user::{User, UserDto};
pub use model::EntityId;
pub use security::{
    Argon2PasswordEncoder, GrantedAuthority, PasswordEncoder, PermissionCatalog, UserPrincipal,
};
pub use service::{
    PermissionService, PersonService, RoleService, ServiceError, ServiceResult, UserService,
    ValidationError, ValidationErrors,
};
pub use ui::{Console, StdConsole, UiError, UiHandler, UiResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
