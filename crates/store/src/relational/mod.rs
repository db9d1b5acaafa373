//! Relational store for clinical records.
//!
//! Records live in a single SQLite table behind an `r2d2` connection pool.
//! Timestamps are persisted as RFC 3339 text in UTC, so lexicographic
//! ordering in SQL is chronological ordering.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use molar_model::PatientRecord;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::RecordStorage;
use crate::error::{StoreError, StoreResult};

mod schema;

pub use schema::SCHEMA_VERSION;

const STORE: &str = "record";

/// Configuration for the SQLite record store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqliteStoreConfig {
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of idle connections.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in milliseconds.
    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,

    /// SQLite busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Enable WAL mode for better concurrency.
    #[serde(default = "default_true")]
    pub enable_wal: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout_ms() -> u64 {
    30000
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

fn default_true() -> bool {
    true
}

impl Default for SqliteStoreConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout_ms: default_connection_timeout_ms(),
            busy_timeout_ms: default_busy_timeout_ms(),
            enable_wal: true,
        }
    }
}

/// SQLite-backed store for [`PatientRecord`] entities.
pub struct SqliteRecordStore {
    pool: Pool<SqliteConnectionManager>,
    config: SqliteStoreConfig,
    is_memory: bool,
}

impl std::fmt::Debug for SqliteRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteRecordStore")
            .field("config", &self.config)
            .field("is_memory", &self.is_memory)
            .finish_non_exhaustive()
    }
}

impl SqliteRecordStore {
    /// Creates a new in-memory store. Intended for tests.
    pub fn in_memory() -> StoreResult<Self> {
        Self::with_config(":memory:", SqliteStoreConfig::default())
    }

    /// Opens or creates a file-based database.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Self::with_config(path, SqliteStoreConfig::default())
    }

    /// Creates a store with custom configuration.
    pub fn with_config<P: AsRef<Path>>(path: P, mut config: SqliteStoreConfig) -> StoreResult<Self> {
        let path_str = path.as_ref().to_string_lossy();
        let is_memory = path_str == ":memory:";

        // A :memory: database exists per connection; the pool must never
        // hand out a second one.
        if is_memory {
            config.max_connections = 1;
            config.min_connections = 1;
        }

        let manager = SqliteConnectionManager::file(path.as_ref());
        let pool = Pool::builder()
            .max_size(config.max_connections)
            .min_idle(Some(config.min_connections))
            .connection_timeout(Duration::from_millis(config.connection_timeout_ms))
            .build(manager)
            .map_err(|e| StoreError::connection(STORE, e))?;

        let store = Self {
            pool,
            config,
            is_memory,
        };
        store.configure_connection()?;
        debug!(is_memory, "clinical record store opened");
        Ok(store)
    }

    /// Initializes the database schema.
    pub fn init_schema(&self) -> StoreResult<()> {
        let conn = self.connection()?;
        schema::initialize_schema(&conn)
    }

    /// Returns whether this is an in-memory database.
    pub fn is_memory(&self) -> bool {
        self.is_memory
    }

    /// Returns the store configuration.
    pub fn config(&self) -> &SqliteStoreConfig {
        &self.config
    }

    fn connection(&self) -> StoreResult<PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|e| StoreError::connection(STORE, e))
    }

    fn configure_connection(&self) -> StoreResult<()> {
        let conn = self.connection()?;

        conn.busy_timeout(Duration::from_millis(self.config.busy_timeout_ms))
            .map_err(|e| StoreError::internal(STORE, format!("failed to set busy timeout: {e}")))?;

        if self.config.enable_wal && !self.is_memory {
            conn.pragma_update(None, "journal_mode", "WAL")
                .map_err(|e| {
                    StoreError::internal(STORE, format!("failed to enable WAL mode: {e}"))
                })?;
        }

        Ok(())
    }
}

const SELECT_COLUMNS: &str = "id, patient_id, record_date, record_type, description, \
     treatment, diagnosis, prescription, notes, dentist_name";

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<PatientRecord> {
    let date: String = row.get(2)?;
    let record_date = DateTime::parse_from_rfc3339(&date)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(PatientRecord {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        record_date,
        record_type: row.get(3)?,
        description: row.get(4)?,
        treatment: row.get(5)?,
        diagnosis: row.get(6)?,
        prescription: row.get(7)?,
        notes: row.get(8)?,
        dentist_name: row.get(9)?,
    })
}

fn insert_row(conn: &Connection, record: &PatientRecord) -> StoreResult<i64> {
    conn.execute(
        "INSERT INTO patient_records (patient_id, record_date, record_type, description, \
         treatment, diagnosis, prescription, notes, dentist_name)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            record.patient_id,
            record.record_date.to_rfc3339(),
            record.record_type,
            record.description,
            record.treatment,
            record.diagnosis,
            record.prescription,
            record.notes,
            record.dentist_name,
        ],
    )
    .map_err(|e| StoreError::internal(STORE, e))?;

    Ok(conn.last_insert_rowid())
}

#[async_trait]
impl RecordStorage for SqliteRecordStore {
    fn store_name(&self) -> &'static str {
        "sqlite"
    }

    async fn insert(&self, record: &PatientRecord) -> StoreResult<i64> {
        let conn = self.connection()?;
        insert_row(&conn, record)
    }

    async fn insert_batch(&self, records: &[PatientRecord]) -> StoreResult<Vec<i64>> {
        let mut conn = self.connection()?;
        let tx = conn
            .transaction()
            .map_err(|e| StoreError::internal(STORE, e))?;

        let mut ids = Vec::with_capacity(records.len());
        for record in records {
            ids.push(insert_row(&tx, record)?);
        }

        tx.commit().map_err(|e| StoreError::internal(STORE, e))?;
        Ok(ids)
    }

    async fn get(&self, id: i64) -> StoreResult<Option<PatientRecord>> {
        let conn = self.connection()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM patient_records WHERE id = ?1"
            ))
            .map_err(|e| StoreError::internal(STORE, e))?;

        match stmt.query_row(params![id], row_to_record) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::internal(STORE, e)),
        }
    }

    async fn list_for_patient(&self, patient_id: &str) -> StoreResult<Vec<PatientRecord>> {
        let conn = self.connection()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM patient_records \
                 WHERE patient_id = ?1 ORDER BY record_date DESC, id DESC"
            ))
            .map_err(|e| StoreError::internal(STORE, e))?;

        let rows = stmt
            .query_map(params![patient_id], row_to_record)
            .map_err(|e| StoreError::internal(STORE, e))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(|e| StoreError::internal(STORE, e))?);
        }
        Ok(records)
    }

    async fn replace(&self, record: &PatientRecord) -> StoreResult<bool> {
        let conn = self.connection()?;
        let changed = conn
            .execute(
                "UPDATE patient_records SET record_date = ?2, record_type = ?3, \
                 description = ?4, treatment = ?5, diagnosis = ?6, prescription = ?7, \
                 notes = ?8, dentist_name = ?9 WHERE id = ?1",
                params![
                    record.id,
                    record.record_date.to_rfc3339(),
                    record.record_type,
                    record.description,
                    record.treatment,
                    record.diagnosis,
                    record.prescription,
                    record.notes,
                    record.dentist_name,
                ],
            )
            .map_err(|e| StoreError::internal(STORE, e))?;
        Ok(changed > 0)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let conn = self.connection()?;
        let changed = conn
            .execute("DELETE FROM patient_records WHERE id = ?1", params![id])
            .map_err(|e| StoreError::internal(STORE, e))?;
        Ok(changed > 0)
    }

    async fn count(&self) -> StoreResult<u64> {
        let conn = self.connection()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM patient_records", [], |row| row.get(0))
            .map_err(|e| StoreError::internal(STORE, e))?;
        Ok(count as u64)
    }
}
