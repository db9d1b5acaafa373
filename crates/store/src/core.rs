//! Core storage traits.
//!
//! These traits are the seams between the storage adapters and everything
//! above them: the record service and the HTTP handlers are generic over
//! them, and tests substitute in-memory or temporary engines freely.
//!
//! Absence is expressed in the types - `Option` for lookups, a found-flag
//! for replace/delete - so only engine failures surface as errors.

use async_trait::async_trait;
use molar_model::{Patient, PatientRecord};

use crate::error::StoreResult;

/// Storage contract for the patient document store.
///
/// Keys are patient ids; there is no secondary index, and `search` is a
/// full scan by design - the store holds at most a few thousand entries.
#[async_trait]
pub trait PatientStorage: Send + Sync {
    /// Returns a human-readable name for this store.
    fn store_name(&self) -> &'static str;

    /// Inserts a patient under its id.
    ///
    /// Ids are expected to be freshly generated; inserting with an id that
    /// is already present overwrites that entry (document-store keys are
    /// unique, which is what upholds the one-patient-per-id invariant).
    async fn insert(&self, patient: &Patient) -> StoreResult<()>;

    /// Looks up a patient by id.
    async fn get(&self, id: &str) -> StoreResult<Option<Patient>>;

    /// Returns all patients, in storage order.
    async fn list(&self) -> StoreResult<Vec<Patient>>;

    /// Searches by id or name fragment.
    ///
    /// An exact id match returns exactly that patient. Otherwise the query
    /// is matched case-insensitively as a substring of the first name, the
    /// last name, or the concatenated full name.
    async fn search(&self, query: &str) -> StoreResult<Vec<Patient>>;

    /// Replaces an existing patient wholesale.
    ///
    /// Returns `false` without writing when no patient has the given id.
    async fn replace(&self, patient: &Patient) -> StoreResult<bool>;

    /// Deletes a patient by id, returning whether one existed.
    async fn delete(&self, id: &str) -> StoreResult<bool>;

    /// Checks whether a patient with the given id exists.
    async fn exists(&self, id: &str) -> StoreResult<bool>;

    /// Number of stored patients.
    async fn count(&self) -> StoreResult<u64>;
}

/// Storage contract for the relational clinical-record store.
///
/// Record ids are assigned by the store on insert, monotonically
/// increasing and never reused. The `patient_id` column references a
/// patient in the separate document store; nothing at this layer enforces
/// that reference.
#[async_trait]
pub trait RecordStorage: Send + Sync {
    /// Returns a human-readable name for this store.
    fn store_name(&self) -> &'static str;

    /// Inserts a record, ignoring its `id` field, and returns the
    /// store-assigned id.
    async fn insert(&self, record: &PatientRecord) -> StoreResult<i64>;

    /// Inserts a batch of records in a single transaction.
    ///
    /// All-or-nothing: any failure rolls the whole batch back. Returns the
    /// assigned ids in input order.
    async fn insert_batch(&self, records: &[PatientRecord]) -> StoreResult<Vec<i64>>;

    /// Looks up a record by id.
    async fn get(&self, id: i64) -> StoreResult<Option<PatientRecord>>;

    /// Returns all records for a patient, ordered by `record_date`
    /// descending (most recent visit first). Empty when the patient has no
    /// records - or does not exist; this is a pure filter.
    async fn list_for_patient(&self, patient_id: &str) -> StoreResult<Vec<PatientRecord>>;

    /// Replaces the mutable fields of an existing record. The `id` and
    /// `patient_id` columns are left untouched.
    ///
    /// Returns `false` without writing when no record has the given id.
    async fn replace(&self, record: &PatientRecord) -> StoreResult<bool>;

    /// Deletes a record by id, returning whether one existed.
    async fn delete(&self, id: i64) -> StoreResult<bool>;

    /// Number of stored records.
    async fn count(&self) -> StoreResult<u64>;
}
