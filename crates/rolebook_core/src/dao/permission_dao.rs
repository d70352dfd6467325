//! Permission data access over the `permissions` table.
//!
//! Deleting a permission cascades to `user_permissions`.

use super::{execute_transaction, Dao, DaoError, DaoResult};
use crate::db::SessionFactory;
use crate::model::permission::Permission;
use crate::model::EntityId;
use rusqlite::{params, Connection, OptionalExtension, Row};

const ENTITY: &str = "permission";

/// SQLite-backed permission DAO.
pub struct SqlitePermissionDao<'s> {
    sessions: &'s SessionFactory,
}

impl<'s> SqlitePermissionDao<'s> {
    pub fn new(sessions: &'s SessionFactory) -> Self {
        Self { sessions }
    }
}

impl Dao for SqlitePermissionDao<'_> {
    type Entity = Permission;

    fn list(&self) -> DaoResult<Vec<Permission>> {
        let session = self.sessions.open_read_only_session()?;
        let mut stmt = session
            .connection()
            .prepare("SELECT id, name FROM permissions ORDER BY id ASC;")?;
        let permissions = stmt
            .query_map([], parse_permission_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(permissions)
    }

    fn get(&self, id: EntityId) -> DaoResult<Option<Permission>> {
        let session = self.sessions.open_read_only_session()?;
        find_permission(session.connection(), id)
    }

    fn create(&self, permission: &Permission) -> DaoResult<EntityId> {
        execute_transaction(self.sessions, |tx| {
            tx.execute(
                "INSERT INTO permissions (name) VALUES (?1);",
                [permission.name.as_str()],
            )?;
            Ok(tx.last_insert_rowid())
        })
    }

    fn update(&self, id: EntityId, mut permission: Permission) -> DaoResult<()> {
        permission.id = Some(id);
        execute_transaction(self.sessions, |tx| {
            let changed = tx.execute(
                "UPDATE permissions SET name = ?1 WHERE id = ?2;",
                params![permission.name.as_str(), permission.id],
            )?;
            if changed == 0 {
                return Err(DaoError::NotFound { entity: ENTITY, id });
            }
            Ok(())
        })
    }

    fn delete(&self, id: EntityId) -> DaoResult<()> {
        execute_transaction(self.sessions, |tx| {
            let permission =
                find_permission(tx, id)?.ok_or(DaoError::NotFound { entity: ENTITY, id })?;
            tx.execute("DELETE FROM permissions WHERE id = ?1;", [permission.id])?;
            Ok(())
        })
    }
}

fn find_permission(conn: &Connection, id: EntityId) -> DaoResult<Option<Permission>> {
    let permission = conn
        .query_row(
            "SELECT id, name FROM permissions WHERE id = ?1;",
            [id],
            parse_permission_row,
        )
        .optional()?;
    Ok(permission)
}

fn parse_permission_row(row: &Row<'_>) -> rusqlite::Result<Permission> {
    Ok(Permission {
        id: Some(row.get("id")?),
        name: row.get("name")?,
    })
}
