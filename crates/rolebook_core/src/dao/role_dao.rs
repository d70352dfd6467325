//! Role data access over the `roles` table.

use super::{execute_transaction, Dao, DaoError, DaoResult};
use crate::db::SessionFactory;
use crate::model::role::Role;
use crate::model::EntityId;
use rusqlite::{params, Connection, OptionalExtension, Row};

const ENTITY: &str = "role";

/// SQLite-backed role DAO.
pub struct SqliteRoleDao<'s> {
    sessions: &'s SessionFactory,
}

impl<'s> SqliteRoleDao<'s> {
    pub fn new(sessions: &'s SessionFactory) -> Self {
        Self { sessions }
    }
}

impl Dao for SqliteRoleDao<'_> {
    type Entity = Role;

    fn list(&self) -> DaoResult<Vec<Role>> {
        let session = self.sessions.open_read_only_session()?;
        let mut stmt = session
            .connection()
            .prepare("SELECT id, name FROM roles ORDER BY id ASC;")?;
        let roles = stmt
            .query_map([], parse_role_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(roles)
    }

    fn get(&self, id: EntityId) -> DaoResult<Option<Role>> {
        let session = self.sessions.open_read_only_session()?;
        find_role(session.connection(), id)
    }

    fn create(&self, role: &Role) -> DaoResult<EntityId> {
        execute_transaction(self.sessions, |tx| {
            tx.execute("INSERT INTO roles (name) VALUES (?1);", [role.name.as_str()])?;
            Ok(tx.last_insert_rowid())
        })
    }

    fn update(&self, id: EntityId, mut role: Role) -> DaoResult<()> {
        role.id = Some(id);
        execute_transaction(self.sessions, |tx| {
            let changed = tx.execute(
                "UPDATE roles SET name = ?1 WHERE id = ?2;",
                params![role.name.as_str(), role.id],
            )?;
            if changed == 0 {
                return Err(DaoError::NotFound { entity: ENTITY, id });
            }
            Ok(())
        })
    }

    fn delete(&self, id: EntityId) -> DaoResult<()> {
        execute_transaction(self.sessions, |tx| {
            let role = find_role(tx, id)?.ok_or(DaoError::NotFound { entity: ENTITY, id })?;
            tx.execute("DELETE FROM roles WHERE id = ?1;", [role.id])?;
            Ok(())
        })
    }
}

fn find_role(conn: &Connection, id: EntityId) -> DaoResult<Option<Role>> {
    let role = conn
        .query_row("SELECT id, name FROM roles WHERE id = ?1;", [id], parse_role_row)
        .optional()?;
    Ok(role)
}

fn parse_role_row(row: &Row<'_>) -> rusqlite::Result<Role> {
    Ok(Role {
        id: Some(row.get("id")?),
        name: row.get("name")?,
    })
}
