//! Schema version stamp for flightrecords databases.
//!
//! Datasets written by earlier tools have the five record tables but no
//! `metadata` table. Opening one adds the missing tables and indexes and
//! records [`CURRENT_VERSION`]; rows are left as they are. Departure and
//! Arrival values stored with seconds (`2023-01-01T08:00:00`) stay that way,
//! and lookups match them only when typed the same way.

use rusqlite::{Connection, OptionalExtension};
use tracing::info;

use crate::error::{Error, Result};

use super::schema::SCHEMA_STATEMENTS;

/// Layout version written to new and adopted datasets.
pub const CURRENT_VERSION: i32 = 1;

const VERSION_KEY: &str = "schema_version";

/// Bring a connection's layout up to [`CURRENT_VERSION`].
///
/// Creates the five record tables, their indexes and the `metadata` table
/// when missing, then stamps an unversioned file with [`CURRENT_VERSION`].
///
/// # Errors
///
/// Returns [`Error::DatabaseMigration`] if the file carries a newer or
/// unreadable version stamp, or a query error if the DDL fails.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }

    match stored_version(conn)? {
        None => {
            info!("Stamping dataset with schema version {}", CURRENT_VERSION);
            write_version(conn, CURRENT_VERSION)
        }
        Some(CURRENT_VERSION) => Ok(()),
        Some(version) => Err(Error::DatabaseMigration {
            message: format!(
                "database schema version {version} is not supported (expected {CURRENT_VERSION})"
            ),
        }),
    }
}

/// The recorded version, or `None` for a fresh or legacy file.
fn stored_version(conn: &Connection) -> Result<Option<i32>> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            [VERSION_KEY],
            |row| row.get(0),
        )
        .optional()?;

    value
        .map(|v| {
            v.parse().map_err(|_| Error::DatabaseMigration {
                message: format!("invalid schema version: {v}"),
            })
        })
        .transpose()
}

fn write_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        (VERSION_KEY, version.to_string()),
    )?;
    Ok(())
}
