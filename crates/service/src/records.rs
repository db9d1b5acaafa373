//! The record service.
//!
//! Coordinates the patient document store and the clinical record store.
//! The two stores are physically separate systems with no shared
//! transaction, so the referential-integrity check at record creation is
//! an explicit service-level step, and the combined chart view is an
//! explicit two-fetch-then-combine step in application memory.

use std::sync::Arc;

use chrono::Utc;
use molar_model::{PatientChart, PatientRecord, PatientSummary, RecordDraft};
use molar_store::{PatientStorage, RecordStorage};
use tracing::debug;

use crate::error::{ServiceError, ServiceResult};

/// Service coordinating patients and their clinical records.
///
/// Generic over the two storage traits; holds explicitly constructed,
/// owned store handles passed in at construction.
pub struct RecordService<P, R> {
    patients: Arc<P>,
    records: Arc<R>,
}

// Manually implement Clone since the stores are behind Arcs and need not
// be Clone themselves.
impl<P, R> Clone for RecordService<P, R> {
    fn clone(&self) -> Self {
        Self {
            patients: Arc::clone(&self.patients),
            records: Arc::clone(&self.records),
        }
    }
}

impl<P: PatientStorage, R: RecordStorage> RecordService<P, R> {
    /// Creates a service over the given store handles.
    pub fn new(patients: Arc<P>, records: Arc<R>) -> Self {
        Self { patients, records }
    }

    /// The patient store handle.
    pub fn patients(&self) -> &P {
        &self.patients
    }

    /// The record store handle.
    pub fn records(&self) -> &R {
        &self.records
    }

    /// Creates a clinical record after verifying the referenced patient
    /// exists.
    ///
    /// The visit timestamp is normalized to UTC whatever offset the caller
    /// supplied; a missing timestamp defaults to the current time. Any id
    /// the draft carries is ignored - the store assigns one.
    ///
    /// Fails with [`ServiceError::ReferenceNotFound`] when no patient has
    /// the given id; nothing is persisted in that case.
    pub async fn create_record(
        &self,
        patient_id: &str,
        draft: RecordDraft,
    ) -> ServiceResult<PatientRecord> {
        draft.check_lengths()?;

        // The existence check and the insert are two independent store
        // calls; a patient deleted in between leaves an orphan record.
        // Accepted - the read paths tolerate orphans.
        if !self.patients.exists(patient_id).await? {
            return Err(ServiceError::ReferenceNotFound {
                patient_id: patient_id.to_string(),
            });
        }

        let record_date = match draft.record_date {
            Some(date) => date.with_timezone(&Utc),
            None => Utc::now(),
        };

        let mut record = PatientRecord {
            id: 0, // store-assigned
            patient_id: patient_id.to_string(),
            record_date,
            record_type: draft.record_type,
            description: draft.description,
            treatment: draft.treatment,
            diagnosis: draft.diagnosis,
            prescription: draft.prescription,
            notes: draft.notes,
            dentist_name: draft.dentist_name,
        };
        record.id = self.records.insert(&record).await?;

        debug!(
            id = record.id,
            patient_id = %record.patient_id,
            "record created"
        );
        Ok(record)
    }

    /// All records for a patient, most recent visit first.
    ///
    /// A pure filter over the record store: returns an empty list both for
    /// a patient without records and for a patient id that does not exist.
    /// Patient existence is deliberately not validated here.
    pub async fn records_for_patient(&self, patient_id: &str) -> ServiceResult<Vec<PatientRecord>> {
        Ok(self.records.list_for_patient(patient_id).await?)
    }

    /// Looks up a single record by id.
    pub async fn get_record(&self, id: i64) -> ServiceResult<Option<PatientRecord>> {
        Ok(self.records.get(id).await?)
    }

    /// Replaces all mutable fields of an existing record.
    ///
    /// `id` and `patient_id` are immutable; a missing visit timestamp
    /// keeps the stored one. Patient existence is checked at creation
    /// only, not here - an update cannot change which patient a record
    /// references.
    pub async fn update_record(&self, id: i64, draft: RecordDraft) -> ServiceResult<PatientRecord> {
        draft.check_lengths()?;

        let Some(current) = self.records.get(id).await? else {
            return Err(ServiceError::RecordNotFound { id });
        };

        let record_date = match draft.record_date {
            Some(date) => date.with_timezone(&Utc),
            None => current.record_date,
        };

        let record = PatientRecord {
            id: current.id,
            patient_id: current.patient_id,
            record_date,
            record_type: draft.record_type,
            description: draft.description,
            treatment: draft.treatment,
            diagnosis: draft.diagnosis,
            prescription: draft.prescription,
            notes: draft.notes,
            dentist_name: draft.dentist_name,
        };

        if !self.records.replace(&record).await? {
            return Err(ServiceError::RecordNotFound { id });
        }

        debug!(id, "record updated");
        Ok(record)
    }

    /// Deletes a record by id. Absent records are not an error; the
    /// returned flag reports whether anything was deleted.
    pub async fn delete_record(&self, id: i64) -> ServiceResult<bool> {
        Ok(self.records.delete(id).await?)
    }

    /// Combined patient-summary + records view.
    ///
    /// Fetches the patient and their records independently and joins them
    /// in memory. Returns `None` when the patient does not exist; a
    /// patient without records yields a chart with an empty record list.
    pub async fn patient_chart(&self, patient_id: &str) -> ServiceResult<Option<PatientChart>> {
        let Some(patient) = self.patients.get(patient_id).await? else {
            return Ok(None);
        };

        let records = self.records.list_for_patient(patient_id).await?;
        Ok(Some(PatientChart {
            patient: PatientSummary::from(&patient),
            records,
        }))
    }
}
