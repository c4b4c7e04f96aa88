//! Embedded schema steps for the key-value database.
//!
//! Each step is a SQL file compiled into the binary. Step `n` moves
//! `user_version` from `n - 1` to `n`; the blob format stored inside
//! `kv_entries.value` is owned by repositories and never migrated here.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Ordered schema steps; index `i` holds version `i + 1`.
const STEPS: &[&str] = &[include_str!("0001_kv_entries.sql")];

/// Schema version a fully migrated database reports.
pub fn latest_version() -> u32 {
    STEPS.len() as u32
}

/// Reads `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Brings `conn` up to [`latest_version`] in a single transaction.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file is ahead of this binary.
/// - `Sqlite` when a step fails; the version is left untouched.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from = schema_version(conn)?;
    let to = latest_version();
    if from > to {
        return Err(DbError::schema_mismatch(from, to));
    }
    if from == to {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, sql) in (1..).zip(STEPS).skip(from as usize) {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from} to_version={to}");
    Ok(())
}
