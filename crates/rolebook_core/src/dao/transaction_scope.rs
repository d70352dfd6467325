//! Scoped transaction runner.
//!
//! # Invariants
//! - One session per unit of work; released on every exit path.
//! - Commit only when the unit of work returns `Ok`.
//! - On `Err` the transaction is rolled back and the original error returned.

use super::{DaoError, DaoResult};
use crate::db::SessionFactory;
use log::{debug, warn};
use rusqlite::Transaction;

/// Runs `unit_of_work` inside a fresh session and transaction.
///
/// # Errors
/// - Session or `BEGIN` failures are returned as `DaoError::Db`.
/// - Errors from `unit_of_work` are returned unchanged after rollback.
/// - Commit failures are returned as `DaoError::Db`; nothing is persisted.
pub fn execute_transaction<T, F>(sessions: &SessionFactory, unit_of_work: F) -> DaoResult<T>
where
    F: FnOnce(&Transaction<'_>) -> DaoResult<T>,
{
    let mut session = sessions.open_session()?;
    let tx = session.begin()?;

    match unit_of_work(&tx) {
        Ok(value) => {
            tx.commit().map_err(DaoError::from)?;
            debug!("event=tx_commit module=dao status=ok");
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback() {
                warn!(
                    "event=tx_rollback module=dao status=error error={}",
                    rollback_err
                );
            } else {
                debug!(
                    "event=tx_rollback module=dao status=ok kind={:?}",
                    err.kind()
                );
            }
            Err(err)
        }
    }
}
