//! Per-call SQLite sessions.
//!
//! # Responsibility
//! - Open one connection per data-access call against a configured target.
//! - Release the connection when the `Session` goes out of scope.
//!
//! # Invariants
//! - Read-only sessions run with `query_only=ON`.
//! - In-memory stores stay alive while the factory holds its anchor connection.

use super::DbResult;
use log::debug;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Hands out sessions for one store.
///
/// Built by [`open_store`](super::open_store) or
/// [`open_store_in_memory`](super::open_store_in_memory) after migrations
/// have been applied.
pub struct SessionFactory {
    target: PathBuf,
    mode: &'static str,
    // Shared-cache memory databases are dropped when their last connection
    // closes.
    _anchor: Option<Connection>,
}

impl SessionFactory {
    pub(super) fn new(target: PathBuf, mode: &'static str, anchor: Option<Connection>) -> Self {
        Self {
            target,
            mode,
            _anchor: anchor,
        }
    }

    /// Opens a read/write session.
    pub fn open_session(&self) -> DbResult<Session> {
        let conn = self.connect()?;
        debug!(
            "event=session_open module=db status=ok mode={} read_only=false",
            self.mode
        );
        Ok(Session {
            conn,
            read_only: false,
        })
    }

    /// Opens a session that rejects writes.
    pub fn open_read_only_session(&self) -> DbResult<Session> {
        let conn = self.connect()?;
        conn.execute_batch("PRAGMA query_only = ON;")?;
        debug!(
            "event=session_open module=db status=ok mode={} read_only=true",
            self.mode
        );
        Ok(Session {
            conn,
            read_only: true,
        })
    }

    /// Returns `file` or `memory`.
    pub fn mode(&self) -> &'static str {
        self.mode
    }

    pub fn target(&self) -> &Path {
        self.target.as_path()
    }

    fn connect(&self) -> DbResult<Connection> {
        let conn = Connection::open(&self.target)?;
        configure_connection(&conn)?;
        Ok(conn)
    }
}

pub(super) fn configure_connection(conn: &Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(())
}

/// One open connection to the store.
pub struct Session {
    conn: Connection,
    read_only: bool,
}

impl Session {
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Starts an immediate transaction bound to this session.
    pub fn begin(&mut self) -> DbResult<Transaction<'_>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        Ok(tx)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!(
            "event=session_close module=db status=ok read_only={}",
            self.read_only
        );
    }
}
