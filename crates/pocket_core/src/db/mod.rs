//! SQLite engine behind the on-device key-value store.
//!
//! The only schema is `kv_entries(key, value, updated_at)`. Screens never
//! see SQL: they go through `storage::SqliteKvStore`, which accepts only a
//! connection produced here.
//!
//! # Invariants
//! - `PRAGMA user_version` equals the number of the last applied migration.
//! - A store refuses connections whose version differs from this binary's,
//!   in either direction.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failures opening or checking the key-value database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// File was written by a newer build; we cannot read it safely.
    UnsupportedSchemaVersion { db_version: u32, latest_supported: u32 },
    /// Connection did not go through `open_db*`, so tables may be missing.
    SchemaNotMigrated { db_version: u32, expected: u32 },
}

impl DbError {
    /// Classifies a schema version that is not the one this binary expects.
    pub fn schema_mismatch(db_version: u32, expected: u32) -> Self {
        if db_version > expected {
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported: expected,
            }
        } else {
            Self::SchemaNotMigrated {
                db_version,
                expected,
            }
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "key-value schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::SchemaNotMigrated {
                db_version,
                expected,
            } => write!(
                f,
                "key-value schema version {db_version} is not migrated; expected {expected}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
