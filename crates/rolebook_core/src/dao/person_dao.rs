//! Person data access over the `persons` table.

use super::{execute_transaction, Dao, DaoError, DaoResult};
use crate::db::SessionFactory;
use crate::model::name::Name;
use crate::model::person::Person;
use crate::model::EntityId;
use rusqlite::{params, Connection, OptionalExtension, Row};

const ENTITY: &str = "person";
const PERSON_SELECT_SQL: &str = "SELECT id, last_name, first_name, middle_name FROM persons";

/// SQLite-backed person DAO.
pub struct SqlitePersonDao<'s> {
    sessions: &'s SessionFactory,
}

impl<'s> SqlitePersonDao<'s> {
    pub fn new(sessions: &'s SessionFactory) -> Self {
        Self { sessions }
    }
}

impl Dao for SqlitePersonDao<'_> {
    type Entity = Person;

    fn list(&self) -> DaoResult<Vec<Person>> {
        let session = self.sessions.open_read_only_session()?;
        let mut stmt = session
            .connection()
            .prepare(&format!("{PERSON_SELECT_SQL} ORDER BY id ASC;"))?;
        let persons = stmt
            .query_map([], parse_person_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(persons)
    }

    fn get(&self, id: EntityId) -> DaoResult<Option<Person>> {
        let session = self.sessions.open_read_only_session()?;
        find_person(session.connection(), id)
    }

    fn create(&self, person: &Person) -> DaoResult<EntityId> {
        execute_transaction(self.sessions, |tx| {
            tx.execute(
                "INSERT INTO persons (last_name, first_name, middle_name)
                 VALUES (?1, ?2, ?3);",
                params![
                    person.name.last(),
                    person.name.first(),
                    person.name.middle()
                ],
            )?;
            Ok(tx.last_insert_rowid())
        })
    }

    fn update(&self, id: EntityId, mut person: Person) -> DaoResult<()> {
        person.id = Some(id);
        execute_transaction(self.sessions, |tx| {
            let changed = tx.execute(
                "UPDATE persons
                 SET
                    last_name = ?1,
                    first_name = ?2,
                    middle_name = ?3
                 WHERE id = ?4;",
                params![
                    person.name.last(),
                    person.name.first(),
                    person.name.middle(),
                    person.id
                ],
            )?;
            if changed == 0 {
                return Err(DaoError::NotFound { entity: ENTITY, id });
            }
            Ok(())
        })
    }

    fn delete(&self, id: EntityId) -> DaoResult<()> {
        execute_transaction(self.sessions, |tx| {
            let person =
                find_person(tx, id)?.ok_or(DaoError::NotFound { entity: ENTITY, id })?;
            tx.execute("DELETE FROM persons WHERE id = ?1;", [person.id])?;
            Ok(())
        })
    }
}

fn find_person(conn: &Connection, id: EntityId) -> DaoResult<Option<Person>> {
    let person = conn
        .query_row(
            &format!("{PERSON_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_person_row,
        )
        .optional()?;
    Ok(person)
}

fn parse_person_row(row: &Row<'_>) -> rusqlite::Result<Person> {
    Ok(Person {
        id: Some(row.get("id")?),
        name: Name::new(
            row.get::<_, String>("last_name")?,
            row.get::<_, String>("first_name")?,
            row.get::<_, String>("middle_name")?,
        ),
    })
}
