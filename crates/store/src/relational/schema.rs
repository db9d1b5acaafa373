//! SQLite schema for the clinical record store.
//!
//! Created once at first startup; the `schema_version` table gates
//! re-initialization. The VARCHAR widths mirror the field limits the
//! service enforces - SQLite itself does not check them.

use rusqlite::Connection;

use crate::error::{StoreError, StoreResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

const STORE: &str = "record";

/// Initializes the database schema if it has not been created yet.
pub fn initialize_schema(conn: &Connection) -> StoreResult<()> {
    let current = schema_version(conn)?;
    if current == 0 {
        create_schema_v1(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    }
    Ok(())
}

/// Reads the current schema version, creating the version table if needed.
fn schema_version(conn: &Connection) -> StoreResult<i32> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| {
        StoreError::internal(STORE, format!("failed to create schema_version table: {e}"))
    })?;

    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .ok();

    Ok(version.unwrap_or(0))
}

fn set_schema_version(conn: &Connection, version: i32) -> StoreResult<()> {
    conn.execute("DELETE FROM schema_version", [])
        .map_err(|e| StoreError::internal(STORE, format!("failed to clear schema_version: {e}")))?;

    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )
    .map_err(|e| StoreError::internal(STORE, format!("failed to set schema_version: {e}")))?;

    Ok(())
}

fn create_schema_v1(conn: &Connection) -> StoreResult<()> {
    // AUTOINCREMENT keeps deleted ids from ever being reassigned.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS patient_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            patient_id TEXT NOT NULL,
            record_date TEXT NOT NULL,
            record_type VARCHAR(50) NOT NULL,
            description VARCHAR(1000) NOT NULL,
            treatment VARCHAR(1000) NOT NULL,
            diagnosis VARCHAR(1000) NOT NULL,
            prescription VARCHAR(500) NOT NULL,
            notes VARCHAR(2000) NOT NULL,
            dentist_name VARCHAR(100) NOT NULL
        )",
        [],
    )
    .map_err(|e| {
        StoreError::internal(STORE, format!("failed to create patient_records table: {e}"))
    })?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_patient_records_patient
            ON patient_records (patient_id, record_date DESC)",
        [],
    )
    .map_err(|e| {
        StoreError::internal(
            STORE,
            format!("failed to create patient_records index: {e}"),
        )
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        initialize_schema(&conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_fresh_database_starts_at_version_zero() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(schema_version(&conn).unwrap(), 0);
    }
}
