//! Data-access contracts and SQLite implementations.
//!
//! # Responsibility
//! - Provide per-entity list/get/create/update/delete over the store.
//! - Keep SQL and session handling out of the service layer.
//!
//! # Invariants
//! - Listing runs in a read-only session, ordered by `id` ascending.
//! - Every write runs inside [`execute_transaction`].
//! - Store failures leave this layer as `DaoError`, classified by
//!   [`DaoErrorKind`]; callers never match on SQLite error types.

use crate::db::DbError;
use crate::model::EntityId;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod permission_dao;
pub mod person_dao;
pub mod role_dao;
mod transaction_scope;
pub mod user_dao;

pub use permission_dao::SqlitePermissionDao;
pub use person_dao::SqlitePersonDao;
pub use role_dao::SqliteRoleDao;
pub use transaction_scope::execute_transaction;
pub use user_dao::{SqliteUserDao, UserDao};

pub type DaoResult<T> = Result<T, DaoError>;

/// Closed set of failure categories the service layer may translate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaoErrorKind {
    /// The addressed row does not exist.
    NotFound,
    /// A uniqueness or foreign-key constraint rejected the write.
    IntegrityViolation,
    /// A persisted row could not be mapped back into a model.
    InvalidData,
    /// Any other store failure.
    Other,
}

/// Failure of a store operation, with the original cause attached.
#[derive(Debug)]
pub enum DaoError {
    Db(DbError),
    NotFound { entity: &'static str, id: EntityId },
    InvalidData(String),
}

impl DaoError {
    pub fn kind(&self) -> DaoErrorKind {
        match self {
            Self::NotFound { .. } => DaoErrorKind::NotFound,
            Self::InvalidData(_) => DaoErrorKind::InvalidData,
            Self::Db(err) => match err.sqlite() {
                Some(rusqlite::Error::QueryReturnedNoRows) => DaoErrorKind::NotFound,
                Some(sqlite) if sqlite.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) => {
                    DaoErrorKind::IntegrityViolation
                }
                _ => DaoErrorKind::Other,
            },
        }
    }
}

impl Display for DaoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "store operation failed: {err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for DaoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for DaoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for DaoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// CRUD contract shared by every entity DAO.
pub trait Dao {
    type Entity;

    /// Returns every row ordered by identity ascending.
    fn list(&self) -> DaoResult<Vec<Self::Entity>>;
    fn get(&self, id: EntityId) -> DaoResult<Option<Self::Entity>>;
    /// Persists a new row and returns the store-assigned identity.
    fn create(&self, entity: &Self::Entity) -> DaoResult<EntityId>;
    /// Overwrites row `id`; the entity's own identity is replaced by `id`.
    fn update(&self, id: EntityId, entity: Self::Entity) -> DaoResult<()>;
    /// Fetches row `id` and deletes it in one transaction.
    fn delete(&self, id: EntityId) -> DaoResult<()>;
}
