use rolebook_core::db::migrations::latest_version;
use rolebook_core::db::{open_store, open_store_in_memory, DbError, SessionFactory};
use rusqlite::Connection;

#[test]
fn in_memory_store_applies_all_migrations() {
    let sessions = open_store_in_memory().unwrap();
    let session = sessions.open_session().unwrap();
    let conn = session.connection();

    assert_eq!(schema_version(conn), latest_version());
    for table in ["persons", "roles", "permissions", "users", "user_permissions"] {
        assert_table_exists(conn, table);
    }
    assert_eq!(sessions.mode(), "memory");
}

#[test]
fn initial_migration_seeds_permission_catalog() {
    let sessions = open_store_in_memory().unwrap();
    let names = permission_names(&sessions);

    assert_eq!(
        names,
        vec![
            "ROLE_ADMIN",
            "ROLE_USER",
            "PERSON_READ",
            "PERSON_WRITE",
            "ROLE_READ",
            "ROLE_WRITE"
        ]
    );
}

#[test]
fn in_memory_stores_are_isolated() {
    let first = open_store_in_memory().unwrap();
    let second = open_store_in_memory().unwrap();

    first
        .open_session()
        .unwrap()
        .connection()
        .execute("INSERT INTO roles (name) VALUES ('auditor');", [])
        .unwrap();

    assert_eq!(role_count(&first), 1);
    assert_eq!(role_count(&second), 0);
}

#[test]
fn reopening_file_store_is_idempotent_and_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rolebook.sqlite3");

    let sessions = open_store(&path).unwrap();
    sessions
        .open_session()
        .unwrap()
        .connection()
        .execute("INSERT INTO roles (name) VALUES ('auditor');", [])
        .unwrap();
    drop(sessions);

    let reopened = open_store(&path).unwrap();
    assert_eq!(reopened.mode(), "file");
    assert_eq!(role_count(&reopened), 1);
    assert_eq!(permission_names(&reopened).len(), 6);
}

#[test]
fn read_only_session_rejects_writes() {
    let sessions = open_store_in_memory().unwrap();
    let session = sessions.open_read_only_session().unwrap();

    assert!(session.is_read_only());
    let result = session
        .connection()
        .execute("INSERT INTO roles (name) VALUES ('auditor');", []);
    assert!(result.is_err());
}

#[test]
fn sessions_enable_foreign_keys() {
    let sessions = open_store_in_memory().unwrap();
    let session = sessions.open_session().unwrap();

    let result = session.connection().execute(
        "INSERT INTO user_permissions (user_id, permission_id) VALUES (999, 999);",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn opening_store_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_store(&path) {
        Err(DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        }) => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected unsupported schema version"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn role_count(sessions: &SessionFactory) -> i64 {
    sessions
        .open_read_only_session()
        .unwrap()
        .connection()
        .query_row("SELECT COUNT(*) FROM roles;", [], |row| row.get(0))
        .unwrap()
}

fn permission_names(sessions: &SessionFactory) -> Vec<String> {
    let session = sessions.open_read_only_session().unwrap();
    let mut stmt = session
        .connection()
        .prepare("SELECT name FROM permissions ORDER BY id;")
        .unwrap();
    let names = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap();
    names
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
