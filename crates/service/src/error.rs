//! Error types for the record service.

use molar_model::FieldTooLong;
use molar_store::StoreError;
use thiserror::Error;

/// Errors surfaced by the record service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// A new record referenced a patient id with no matching patient.
    /// Nothing was persisted.
    #[error("referenced patient not found: {patient_id}")]
    ReferenceNotFound {
        /// The missing patient id.
        patient_id: String,
    },

    /// An update targeted a record id that does not exist.
    #[error("record not found: {id}")]
    RecordNotFound {
        /// The missing record id.
        id: i64,
    },

    /// A bounded text field exceeded its maximum length. Rejected before
    /// anything touched storage.
    #[error(transparent)]
    FieldTooLong(#[from] FieldTooLong),

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
