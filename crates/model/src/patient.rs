//! Patient entity types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dental patient, owned by the embedded document store.
///
/// The `id` uniquely identifies at most one patient and is immutable once
/// assigned. All other fields are free text with no format validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Globally unique identifier (uuid-v4 text), generated at creation
    /// when absent.
    pub id: String,

    /// Given name.
    pub first_name: String,

    /// Family name.
    pub last_name: String,

    /// Contact email address.
    pub email: String,

    /// Contact phone number.
    pub phone_number: String,

    /// Postal address.
    pub address: String,

    /// Calendar date of birth.
    pub date_of_birth: NaiveDate,

    /// Timestamp of the most recent appointment.
    pub last_appointment: DateTime<Utc>,

    /// Timestamp of the next scheduled appointment, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_appointment: Option<DateTime<Utc>>,

    /// Free-text clinical notes.
    pub notes: String,
}

impl Patient {
    /// Concatenated given and family name, as matched by substring search.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Creation payload for a patient.
///
/// Identical to [`Patient`] except that the id is optional: when absent or
/// empty, a fresh uuid is generated on materialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDraft {
    /// Caller-chosen identifier; a fresh uuid is generated when missing.
    #[serde(default)]
    pub id: Option<String>,

    /// Given name.
    pub first_name: String,

    /// Family name.
    pub last_name: String,

    /// Contact email address.
    pub email: String,

    /// Contact phone number.
    pub phone_number: String,

    /// Postal address.
    pub address: String,

    /// Calendar date of birth.
    pub date_of_birth: NaiveDate,

    /// Timestamp of the most recent appointment.
    pub last_appointment: DateTime<Utc>,

    /// Timestamp of the next scheduled appointment, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_appointment: Option<DateTime<Utc>>,

    /// Free-text clinical notes.
    #[serde(default)]
    pub notes: String,
}

impl PatientDraft {
    /// Materializes the draft, generating a fresh id when none was given.
    pub fn into_patient(self) -> Patient {
        let id = match &self.id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => Uuid::new_v4().to_string(),
        };
        self.with_id(id)
    }

    /// Materializes the draft under a caller-chosen id, ignoring any id the
    /// draft carries.
    pub fn with_id(self, id: String) -> Patient {
        Patient {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            address: self.address,
            date_of_birth: self.date_of_birth,
            last_appointment: self.last_appointment,
            next_appointment: self.next_appointment,
            notes: self.notes,
        }
    }
}

/// Reduced patient view embedded in the combined chart response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    /// The patient's identifier.
    pub id: String,

    /// Full name (given and family name concatenated).
    pub name: String,

    /// Calendar date of birth.
    pub date_of_birth: NaiveDate,

    /// Contact phone number.
    pub phone_number: String,

    /// Timestamp of the next scheduled appointment, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_appointment: Option<DateTime<Utc>>,
}

impl From<&Patient> for PatientSummary {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.id.clone(),
            name: patient.full_name(),
            date_of_birth: patient.date_of_birth,
            phone_number: patient.phone_number.clone(),
            next_appointment: patient.next_appointment,
        }
    }
}
