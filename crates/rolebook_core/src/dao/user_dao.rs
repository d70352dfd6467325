//! User data access over `users` and the `user_permissions` link table.
//!
//! # Invariants
//! - `users.username` is unique; duplicates surface as an integrity violation.
//! - A user row and its permission links are written in one transaction.
//! - Permission links are resolved by name; names missing from the catalog
//!   produce no link.

use super::{execute_transaction, Dao, DaoError, DaoResult};
use crate::db::SessionFactory;
use crate::model::permission::Permission;
use crate::model::user::User;
use crate::model::EntityId;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashSet;

const ENTITY: &str = "user";
const USER_SELECT_SQL: &str = "SELECT id, username, password FROM users";

/// User DAO contract: generic CRUD plus lookup by login name.
pub trait UserDao: Dao<Entity = User> {
    fn get_by_username(&self, username: &str) -> DaoResult<Option<User>>;
}

/// SQLite-backed user DAO.
pub struct SqliteUserDao<'s> {
    sessions: &'s SessionFactory,
}

impl<'s> SqliteUserDao<'s> {
    pub fn new(sessions: &'s SessionFactory) -> Self {
        Self { sessions }
    }
}

impl Dao for SqliteUserDao<'_> {
    type Entity = User;

    fn list(&self) -> DaoResult<Vec<User>> {
        let session = self.sessions.open_read_only_session()?;
        let conn = session.connection();
        let mut stmt = conn.prepare(&format!("{USER_SELECT_SQL} ORDER BY id ASC;"))?;
        let rows = stmt
            .query_map([], parse_user_row)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut users = Vec::with_capacity(rows.len());
        for mut user in rows {
            user.permissions = load_permissions(conn, user_id(&user)?)?;
            users.push(user);
        }
        Ok(users)
    }

    fn get(&self, id: EntityId) -> DaoResult<Option<User>> {
        let session = self.sessions.open_read_only_session()?;
        find_user(session.connection(), "id", &id)
    }

    fn create(&self, user: &User) -> DaoResult<EntityId> {
        execute_transaction(self.sessions, |tx| {
            tx.execute(
                "INSERT INTO users (username, password) VALUES (?1, ?2);",
                params![user.username.as_str(), user.password.as_str()],
            )?;
            let id = tx.last_insert_rowid();
            link_permissions(tx, id, &user.permissions)?;
            Ok(id)
        })
    }

    fn update(&self, id: EntityId, mut user: User) -> DaoResult<()> {
        user.id = Some(id);
        execute_transaction(self.sessions, |tx| {
            let changed = tx.execute(
                "UPDATE users SET username = ?1, password = ?2 WHERE id = ?3;",
                params![user.username.as_str(), user.password.as_str(), user.id],
            )?;
            if changed == 0 {
                return Err(DaoError::NotFound { entity: ENTITY, id });
            }
            tx.execute("DELETE FROM user_permissions WHERE user_id = ?1;", [id])?;
            link_permissions(tx, id, &user.permissions)?;
            Ok(())
        })
    }

    fn delete(&self, id: EntityId) -> DaoResult<()> {
        execute_transaction(self.sessions, |tx| {
            let user =
                find_user(tx, "id", &id)?.ok_or(DaoError::NotFound { entity: ENTITY, id })?;
            tx.execute("DELETE FROM users WHERE id = ?1;", [user.id])?;
            Ok(())
        })
    }
}

impl UserDao for SqliteUserDao<'_> {
    fn get_by_username(&self, username: &str) -> DaoResult<Option<User>> {
        let session = self.sessions.open_read_only_session()?;
        find_user(session.connection(), "username", &username)
    }
}

fn find_user(
    conn: &Connection,
    key_column: &'static str,
    key: &dyn rusqlite::ToSql,
) -> DaoResult<Option<User>> {
    let user = conn
        .query_row(
            &format!("{USER_SELECT_SQL} WHERE {key_column} = ?1;"),
            [key],
            parse_user_row,
        )
        .optional()?;

    match user {
        Some(mut user) => {
            user.permissions = load_permissions(conn, user_id(&user)?)?;
            Ok(Some(user))
        }
        None => Ok(None),
    }
}

fn load_permissions(conn: &Connection, user_id: EntityId) -> DaoResult<HashSet<Permission>> {
    let mut stmt = conn.prepare(
        "SELECT p.id, p.name
         FROM user_permissions up
         INNER JOIN permissions p ON p.id = up.permission_id
         WHERE up.user_id = ?1;",
    )?;
    let permissions = stmt
        .query_map([user_id], |row| {
            Ok(Permission {
                id: Some(row.get("id")?),
                name: row.get("name")?,
            })
        })?
        .collect::<Result<HashSet<_>, _>>()?;
    Ok(permissions)
}

fn link_permissions(
    conn: &Connection,
    user_id: EntityId,
    permissions: &HashSet<Permission>,
) -> DaoResult<()> {
    for permission in permissions {
        conn.execute(
            "INSERT INTO user_permissions (user_id, permission_id)
             SELECT ?1, id
             FROM permissions
             WHERE name = ?2;",
            params![user_id, permission.name.as_str()],
        )?;
    }
    Ok(())
}

fn user_id(user: &User) -> DaoResult<EntityId> {
    user.id
        .ok_or_else(|| DaoError::InvalidData("users.id is null".to_string()))
}

fn parse_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: Some(row.get("id")?),
        username: row.get("username")?,
        password: row.get("password")?,
        permissions: HashSet::new(),
    })
}
