//! Schema steps for the notebook database.
//!
//! # Invariants
//! - Step versions start at 1 and increase by exactly one.
//! - All pending steps apply in one transaction.

use crate::db::{DbError, DbResult};
use log::debug;
use rusqlite::Connection;

/// Ordered `(version, sql)` steps.
const STEPS: &[(u32, &str)] = &[(1, include_str!("0001_kv_entries.sql"))];

/// Schema version this build writes.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |(version, _)| *version)
}

/// Brings `conn` up to [`latest_version`].
///
/// # Errors
/// - `SchemaTooNew` when the file was written by a newer build.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let tx = conn.transaction()?;
    for (version, sql) in STEPS.iter().filter(|(version, _)| *version > found) {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", *version)?;
        debug!("event=db_migrate module=db status=ok version={version}");
    }
    tx.commit()?;
    Ok(())
}
