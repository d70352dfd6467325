//! Store bootstrap utilities.
//!
//! # Responsibility
//! - Open file or shared in-memory SQLite stores.
//! - Run schema migrations once before any session is handed out.
//!
//! # Invariants
//! - A returned `SessionFactory` points at a fully migrated store.

use super::migrations::apply_migrations;
use super::session::{configure_connection, SessionFactory};
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Instant;
use uuid::Uuid;

/// Opens a SQLite store file and applies all pending migrations.
///
/// # Side effects
/// - Creates the file when missing.
/// - Emits `store_open` logging events with duration and status.
pub fn open_store(path: impl AsRef<Path>) -> DbResult<SessionFactory> {
    let target = path.as_ref().to_path_buf();
    bootstrap(target, "file").map(|(target, _)| SessionFactory::new(target, "file", None))
}

/// Opens a private shared-cache in-memory store and applies all migrations.
///
/// Every call yields a distinct store; it lives as long as the returned
/// factory.
pub fn open_store_in_memory() -> DbResult<SessionFactory> {
    let target = PathBuf::from(format!(
        "file:rolebook-{}?mode=memory&cache=shared",
        Uuid::new_v4().simple()
    ));
    bootstrap(target, "memory")
        .map(|(target, anchor)| SessionFactory::new(target, "memory", Some(anchor)))
}

fn bootstrap(target: PathBuf, mode: &'static str) -> DbResult<(PathBuf, Connection)> {
    let started_at = Instant::now();
    info!("event=store_open module=db status=start mode={mode}");

    let result = Connection::open(&target)
        .map_err(DbError::from)
        .and_then(|mut conn| {
            configure_connection(&conn)?;
            apply_migrations(&mut conn)?;
            Ok(conn)
        });

    match result {
        Ok(conn) => {
            info!(
                "event=store_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok((target, conn))
        }
        Err(err) => {
            error!(
                "event=store_open module=db status=error mode={mode} duration_ms={} error_code=store_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}
