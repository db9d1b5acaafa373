//! Clinical visit record types.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::limits;
use crate::patient::PatientSummary;

/// A clinical visit record, owned by the relational store.
///
/// The `patient_id` references a [`Patient`](crate::Patient) held in the
/// separate document store. No foreign key enforces the reference; the
/// record service validates it at creation time only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    /// Store-assigned sequential id, unique and never reused.
    pub id: i64,

    /// Identifier of the referenced patient. Immutable once set.
    pub patient_id: String,

    /// Visit timestamp, always UTC.
    pub record_date: DateTime<Utc>,

    /// Kind of visit (checkup, filling, ...).
    pub record_type: String,

    /// What happened during the visit.
    pub description: String,

    /// Treatment performed.
    pub treatment: String,

    /// Clinical diagnosis.
    pub diagnosis: String,

    /// Prescribed medication, if any.
    pub prescription: String,

    /// Free-text notes.
    pub notes: String,

    /// Name of the treating dentist.
    pub dentist_name: String,
}

/// Payload for creating or replacing a clinical record.
///
/// The record id is always store-assigned and the patient id in the URL
/// path wins over the body, so both are optional here. The visit timestamp
/// keeps whatever offset the caller supplied; the record service normalizes
/// it to UTC before persistence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDraft {
    /// Record id carried by the body, if any. Ignored on creation; on
    /// update it must agree with the id in the URL path.
    #[serde(default)]
    pub id: Option<i64>,

    /// Referenced patient id. The id in the URL path takes precedence.
    #[serde(default)]
    pub patient_id: Option<String>,

    /// Visit timestamp as supplied by the caller, offset preserved.
    /// Missing dates default to the current time at creation.
    #[serde(default)]
    pub record_date: Option<DateTime<FixedOffset>>,

    /// Kind of visit.
    #[serde(default)]
    pub record_type: String,

    /// What happened during the visit.
    #[serde(default)]
    pub description: String,

    /// Treatment performed.
    #[serde(default)]
    pub treatment: String,

    /// Clinical diagnosis.
    #[serde(default)]
    pub diagnosis: String,

    /// Prescribed medication, if any.
    #[serde(default)]
    pub prescription: String,

    /// Free-text notes.
    #[serde(default)]
    pub notes: String,

    /// Name of the treating dentist.
    #[serde(default)]
    pub dentist_name: String,
}

/// A bounded text field exceeded its maximum length.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field `{field}` exceeds {max} characters (got {actual})")]
pub struct FieldTooLong {
    /// Wire name of the offending field.
    pub field: &'static str,

    /// The field's maximum length in characters.
    pub max: usize,

    /// Actual length of the submitted value.
    pub actual: usize,
}

impl RecordDraft {
    /// Checks every bounded field against its maximum length, naming the
    /// first field that overflows.
    pub fn check_lengths(&self) -> Result<(), FieldTooLong> {
        let bounded: [(&'static str, &str, usize); 7] = [
            ("recordType", &self.record_type, limits::RECORD_TYPE_MAX),
            ("description", &self.description, limits::DESCRIPTION_MAX),
            ("treatment", &self.treatment, limits::TREATMENT_MAX),
            ("diagnosis", &self.diagnosis, limits::DIAGNOSIS_MAX),
            ("prescription", &self.prescription, limits::PRESCRIPTION_MAX),
            ("notes", &self.notes, limits::NOTES_MAX),
            ("dentistName", &self.dentist_name, limits::DENTIST_NAME_MAX),
        ];

        for (field, value, max) in bounded {
            let actual = value.chars().count();
            if actual > max {
                return Err(FieldTooLong { field, max, actual });
            }
        }
        Ok(())
    }
}

/// Combined patient-summary + records view.
///
/// The two stores cannot be joined at the storage layer; this structure is
/// assembled in application memory from two independent fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientChart {
    /// Reduced view of the patient.
    pub patient: PatientSummary,

    /// The patient's records, most recent visit first.
    pub records: Vec<PatientRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_lengths_accepts_bounds() {
        let draft = RecordDraft {
            record_type: "x".repeat(limits::RECORD_TYPE_MAX),
            notes: "x".repeat(limits::NOTES_MAX),
            ..Default::default()
        };
        assert!(draft.check_lengths().is_ok());
    }

    #[test]
    fn test_check_lengths_names_offending_field() {
        let draft = RecordDraft {
            prescription: "x".repeat(limits::PRESCRIPTION_MAX + 1),
            ..Default::default()
        };
        let err = draft.check_lengths().unwrap_err();
        assert_eq!(err.field, "prescription");
        assert_eq!(err.max, limits::PRESCRIPTION_MAX);
        assert_eq!(err.actual, limits::PRESCRIPTION_MAX + 1);
    }

    #[test]
    fn test_check_lengths_counts_characters_not_bytes() {
        // 50 two-byte characters stay inside a 50-character limit.
        let draft = RecordDraft {
            record_type: "é".repeat(limits::RECORD_TYPE_MAX),
            ..Default::default()
        };
        assert!(draft.check_lengths().is_ok());
    }

    #[test]
    fn test_draft_deserializes_with_offset_preserved() {
        let draft: RecordDraft = serde_json::from_str(
            r#"{"recordDate": "2026-03-01T10:00:00+05:30", "recordType": "Checkup"}"#,
        )
        .unwrap();
        let date = draft.record_date.unwrap();
        assert_eq!(date.offset().local_minus_utc(), 5 * 3600 + 1800);
        assert_eq!(draft.record_type, "Checkup");
        assert!(draft.id.is_none());
        assert!(draft.patient_id.is_none());
    }

    #[test]
    fn test_record_wire_names_are_camel_case() {
        let record = PatientRecord {
            id: 3,
            patient_id: "p-1".to_string(),
            record_date: Utc::now(),
            record_type: "Cleaning".to_string(),
            description: String::new(),
            treatment: String::new(),
            diagnosis: String::new(),
            prescription: String::new(),
            notes: String::new(),
            dentist_name: "Dr. Adams".to_string(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("patientId").is_some());
        assert!(value.get("recordDate").is_some());
        assert!(value.get("dentistName").is_some());
    }
}
